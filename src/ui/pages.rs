// Static page views.
// Home, About, Articles and NotFound are built from site content and the palette alone.

use ratatui::{prelude::*, widgets::*};

use crate::content::Site;
use crate::state::Route;

use super::palette::Palette;

fn page_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.muted())
        .title(format!(" {} ", title))
        .title_style(palette.heading())
}

fn render_paragraph(frame: &mut Frame, lines: Vec<Line>, title: &str, palette: &Palette, area: Rect) {
    let paragraph = Paragraph::new(lines)
        .block(page_block(title, palette))
        .wrap(Wrap { trim: false })
        .style(palette.base());
    frame.render_widget(paragraph, area);
}

/// Landing page: title, tagline, and where to go next.
pub fn render_home(frame: &mut Frame, site: &Site, palette: &Palette, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(site.title.as_str(), palette.heading())),
    ];
    if !site.tagline.is_empty() {
        lines.push(Line::from(Span::styled(site.tagline.as_str(), palette.muted())));
    }
    lines.push(Line::from(""));

    for (i, route) in Route::NAV.iter().enumerate().skip(1) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", i + 1), Style::default().fg(palette.accent)),
            Span::raw(route.title()),
            Span::styled(
                format!("  {}", route.path().unwrap_or_default()),
                palette.muted(),
            ),
        ]));
    }

    render_paragraph(frame, lines, Route::Home.title(), palette, area);
}

pub fn render_about(frame: &mut Frame, site: &Site, palette: &Palette, area: Rect) {
    let lines: Vec<Line> = if site.about.is_empty() {
        vec![Line::from(Span::styled(
            "Nothing here yet. Add an \"about\" section to the content file.",
            palette.muted(),
        ))]
    } else {
        site.about
            .iter()
            .flat_map(|paragraph| [Line::from(paragraph.as_str()), Line::from("")])
            .collect()
    };

    render_paragraph(frame, lines, Route::About.title(), palette, area);
}

pub fn render_articles(frame: &mut Frame, site: &Site, palette: &Palette, area: Rect) {
    if site.articles.is_empty() {
        let lines = vec![Line::from(Span::styled("No articles published yet.", palette.muted()))];
        return render_paragraph(frame, lines, Route::Articles.title(), palette, area);
    }

    let mut lines = Vec::new();
    for article in &site.articles {
        let date = article
            .published
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "draft".to_string());

        lines.push(Line::from(vec![
            Span::styled(format!("{}  ", date), palette.muted()),
            Span::styled(article.title.as_str(), Style::default().fg(palette.accent)),
        ]));
        if !article.summary.is_empty() {
            lines.push(Line::from(format!("            {}", article.summary)));
        }
        lines.push(Line::from(Span::styled(
            format!("            {}", article.url),
            Style::default().fg(palette.link),
        )));
        lines.push(Line::from(""));
    }

    render_paragraph(frame, lines, Route::Articles.title(), palette, area);
}

pub fn render_not_found(frame: &mut Frame, path: &str, palette: &Palette, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "404",
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Nothing lives at {:?}.", path)),
        Line::from(""),
        Line::from(Span::styled(
            "Press 1 for home or Backspace to go back.",
            palette.muted(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(page_block(Route::NotFound.title(), palette))
        .alignment(Alignment::Center)
        .style(palette.base());
    frame.render_widget(paragraph, area);
}
