// Projects list rendering.
// Covers loading, failure with retry, empty, and loaded states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::error::FetchError;
use crate::project::Project;
use crate::state::{LoadingState, ProjectsPageState};

use super::palette::Palette;

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 365 {
        format!("{}y ago", duration.num_days() / 365)
    } else if duration.num_days() > 30 {
        format!("{}mo ago", duration.num_days() / 30)
    } else if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, palette: &Palette, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(palette.base().fg(palette.warning));
    frame.render_widget(text, area);
}

/// Render a failed fetch with its retry affordance.
pub fn render_error(frame: &mut Frame, palette: &Palette, area: Rect, error: &FetchError) {
    let hint = if error.is_retryable() {
        "Press r to retry"
    } else {
        "Press : to open another path"
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("❌ {}", error.user_message()),
            Style::default().fg(palette.error),
        )),
        Line::from(Span::styled(format!("{}: {}", error.kind(), error), palette.muted())),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(palette.accent))),
    ];

    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(palette.base());
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, palette: &Palette, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(palette.base().fg(palette.muted));
    frame.render_widget(text, area);
}

/// One list row: name, language, stars, and age.
fn project_item<'a>(project: &'a Project, palette: &Palette, now: DateTime<Utc>) -> ListItem<'a> {
    let mut spans = vec![Span::styled(
        project.name.as_str(),
        Style::default().fg(palette.accent),
    )];

    if !project.language.is_empty() {
        spans.push(Span::styled(
            format!("  {}", project.language),
            Style::default().fg(palette.link),
        ));
    }

    spans.push(Span::styled(
        format!("  ★ {}", project.star_count),
        Style::default().fg(palette.warning),
    ));

    if project.has_timestamp() {
        spans.push(Span::styled(
            format!("  {}", format_relative_time(&project.last_updated, now)),
            palette.muted(),
        ));
    }

    ListItem::new(Line::from(spans))
}

/// Detail pane for the selected project.
fn render_detail(frame: &mut Frame, project: &Project, palette: &Palette, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(project.name.as_str(), palette.heading())),
        Line::from(Span::styled(
            project.url.as_str(),
            Style::default()
                .fg(palette.link)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
    ];

    if project.description.is_empty() {
        lines.push(Line::from(Span::styled("No description", palette.muted())));
    } else {
        lines.push(Line::from(project.description.as_str()));
    }

    if !project.topics.is_empty() {
        lines.push(Line::from(""));
        let topics: Vec<&str> = project.topics.iter().map(String::as_str).collect();
        lines.push(Line::from(Span::styled(
            format!("# {}", topics.join("  # ")),
            palette.muted(),
        )));
    }

    let detail = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.muted())
                .title(" Details "),
        )
        .wrap(Wrap { trim: true })
        .style(palette.base());
    frame.render_widget(detail, area);
}

/// Render the projects page body.
pub fn render_projects(
    frame: &mut Frame,
    page: &mut ProjectsPageState,
    owner: &str,
    palette: &Palette,
    area: Rect,
) {
    let projects = match &page.data {
        LoadingState::Idle => return render_empty(frame, palette, area, "Nothing loaded yet"),
        LoadingState::Loading => {
            return render_loading(frame, palette, area, &format!("Loading projects for {}", owner));
        }
        LoadingState::Error(e) => return render_error(frame, palette, area, e),
        LoadingState::Loaded(projects) => projects.clone(),
    };

    if projects.is_empty() {
        return render_empty(frame, palette, area, &format!("{} has no public projects", owner));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let now = Utc::now();
    let items: Vec<ListItem> = projects
        .iter()
        .map(|project| project_item(project, palette, now))
        .collect();

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.muted())
                .title(format!(" Projects ({}) ", projects.len())),
        )
        .style(palette.base())
        .highlight_style(palette.highlight())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, chunks[0], &mut page.list_state);

    if let Some(project) = page.selected_project() {
        render_detail(frame, project, palette, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now, now), "just now");
        assert_eq!(format_relative_time(&(now - chrono::Duration::minutes(5)), now), "5m ago");
        assert_eq!(format_relative_time(&(now - chrono::Duration::hours(3)), now), "3h ago");
        assert_eq!(format_relative_time(&(now - chrono::Duration::days(2)), now), "2d ago");
        assert_eq!(format_relative_time(&(now - chrono::Duration::days(95)), now), "3mo ago");
        assert_eq!(format_relative_time(&(now - chrono::Duration::days(800)), now), "2y ago");
    }
}
