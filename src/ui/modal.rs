// Modal UI components.
// The path prompt and the keyboard help overlay.

use ratatui::{prelude::*, widgets::*};

use super::palette::Palette;

/// Create a centered rect clamped to the frame.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Draw the path prompt on top of the current view.
pub fn draw_path_prompt(frame: &mut Frame, input: &str, palette: &Palette) {
    let modal_area = centered(frame.area(), 60, 5);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(2), // Instructions
        ])
        .split(modal_area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(" Go to path ");

    let input_line = Line::from(vec![
        Span::styled("Path: ", palette.muted()),
        Span::raw(input),
        Span::styled("█", Style::default().fg(palette.warning)),
    ]);

    let input_widget = Paragraph::new(input_line)
        .block(input_block)
        .style(palette.base());
    frame.render_widget(input_widget, chunks[0]);

    let instructions = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(palette.warning)),
        Span::styled(" = Go  ", palette.muted()),
        Span::styled("Esc", Style::default().fg(palette.warning)),
        Span::styled(" = Cancel ", palette.muted()),
    ]);

    let instructions_widget = Paragraph::new(instructions)
        .alignment(Alignment::Center)
        .style(palette.base());
    frame.render_widget(instructions_widget, chunks[1]);
}

/// Draw the help overlay.
pub fn draw_help_overlay(frame: &mut Frame, palette: &Palette) {
    let popup_area = centered(frame.area(), 50, 16);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(palette.accent)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key("1-4", "Go to page"),
        key("Tab/S-Tab", "Next/previous page"),
        key(":", "Go to a path"),
        key("Backspace", "Go back"),
        key("↑/↓ or j/k", "Select project"),
        key("r", "Retry / refresh projects"),
        key("t", "Toggle light/dark theme"),
        key("?", "Show/hide this help"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", palette.muted()),
            Span::styled("Esc", Style::default().fg(palette.warning)),
            Span::styled(" or ", palette.muted()),
            Span::styled("?", Style::default().fg(palette.warning)),
            Span::styled(" to close", palette.muted()),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Help ")
                .title_style(palette.heading()),
        )
        .style(palette.base())
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
