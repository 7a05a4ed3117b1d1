// Breadcrumb rendering for the navigation history.
// Shows recently visited paths with the current one highlighted, like an address bar.

use ratatui::{prelude::*, widgets::*};

use crate::state::{BreadcrumbNode, Route};

use super::palette::Palette;

const MAX_CRUMBS: usize = 5;

/// Render the breadcrumb trail.
pub fn draw_breadcrumb(
    frame: &mut Frame,
    breadcrumbs: &[BreadcrumbNode],
    palette: &Palette,
    area: Rect,
) {
    let skipped = breadcrumbs.len().saturating_sub(MAX_CRUMBS);
    let mut spans = Vec::new();

    if skipped > 0 {
        spans.push(Span::styled("… > ", palette.muted()));
    }

    let visible = &breadcrumbs[skipped..];
    for (i, node) in visible.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", palette.muted()));
        }

        let style = if i == visible.len() - 1 {
            // Current level is highlighted
            let color = if node.route == Route::NotFound {
                palette.error
            } else {
                palette.accent
            };
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };

        spans.push(Span::styled(node.path.clone(), style));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(palette.muted());

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .style(palette.base());

    frame.render_widget(paragraph, area);
}
