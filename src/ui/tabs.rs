// Navigation bar rendering.
// Highlights the active page; NotFound highlights nothing.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::Route;

use super::palette::Palette;

/// Draw the navigation bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let current = app.router.current();

    let tab_titles: Vec<Line> = Route::NAV
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let style = if *route == current {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };

            Line::from(vec![
                Span::styled(format!("{} ", i + 1), palette.muted()),
                Span::styled(route.title(), style),
            ])
        })
        .collect();

    // Out of range on NotFound, so no tab is highlighted.
    let selected_index = Route::NAV
        .iter()
        .position(|r| *r == current)
        .unwrap_or(Route::NAV.len());

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(palette.muted())
                .title(format!(" {} ", app.site.title))
                .title_style(palette.heading()),
        )
        .select(selected_index)
        .style(palette.base())
        .highlight_style(Style::default().fg(palette.accent))
        .divider(Span::styled(" │ ", palette.muted()));

    frame.render_widget(tabs_widget, area);
}
