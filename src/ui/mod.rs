// UI module for rendering the site.
// Every view is drawn from the routed page, the projects state, and the current theme.

mod breadcrumb;
mod list;
mod modal;
mod pages;
mod palette;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::Route;

use palette::Palette;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.theme.get());

    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Navigation bar
            Constraint::Length(2), // Breadcrumb
            Constraint::Min(1),    // Page content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, &palette, chunks[0]);
    breadcrumb::draw_breadcrumb(frame, &app.router.breadcrumbs(), &palette, chunks[1]);
    draw_page(frame, app, &palette, chunks[2]);
    draw_status_bar(frame, app, &palette, chunks[3]);

    // Overlays are rendered last, on top of everything
    if let Some(input) = &app.prompt {
        modal::draw_path_prompt(frame, input, &palette);
    } else if app.show_help {
        modal::draw_help_overlay(frame, &palette);
    }
}

/// Draw the page for the active route.
fn draw_page(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    match app.router.current() {
        Route::Home => pages::render_home(frame, &app.site, palette, area),
        Route::About => pages::render_about(frame, &app.site, palette, area),
        Route::Projects => {
            list::render_projects(frame, &mut app.projects, &app.owner, palette, area);
        }
        Route::Articles => pages::render_articles(frame, &app.site, palette, area),
        Route::NotFound => pages::render_not_found(frame, app.router.path(), palette, area),
    }
}

/// Draw the status bar with keybinding hints, theme, and rate limit.
fn draw_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mut hints = vec![
        Span::raw(" 1-4 "),
        Span::styled("Pages", palette.muted()),
        Span::raw("  : "),
        Span::styled("Path", palette.muted()),
        Span::raw("  ⌫ "),
        Span::styled("Back", palette.muted()),
    ];

    if app.router.current() == Route::Projects && app.projects.can_refresh() {
        hints.push(Span::raw("  r "));
        hints.push(Span::styled(
            if app.projects.can_retry() { "Retry" } else { "Refresh" },
            palette.muted(),
        ));
    }

    hints.extend([
        Span::raw("  t "),
        Span::styled(format!("Theme ({})", app.theme.get().as_str()), palette.muted()),
        Span::raw("  ? "),
        Span::styled("Help", palette.muted()),
        Span::raw("  q "),
        Span::styled("Quit", palette.muted()),
    ]);

    if app.projects.is_pending() {
        hints.push(Span::styled("  ⏳", Style::default().fg(palette.warning)));
    }

    // Add rate limit info on the right if available
    if let Some(rate) = app.rate_limit() {
        let rate_color = if rate.remaining < 10 {
            palette.error
        } else if rate.remaining < 30 {
            palette.warning
        } else {
            palette.muted
        };
        hints.push(Span::styled(
            format!("  API: {}/{}", rate.remaining, rate.limit),
            Style::default().fg(rate_color),
        ));
    }

    let status = Paragraph::new(Line::from(hints)).style(palette.base());
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ProjectCache;
    use crate::content::Site;
    use crate::error::FetchError;
    use crate::github::{FetchResult, ProjectSource};
    use crate::state::{MemoryPreferenceStore, ThemeState};
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;
    use tokio::runtime::Handle;

    struct Unavailable;

    #[async_trait]
    impl ProjectSource for Unavailable {
        async fn fetch(&self, _owner: &str) -> FetchResult {
            Err(FetchError::Remote {
                status: 503,
                body: "down".to_string(),
            })
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn app_at(path: &str) -> App {
        App::new(
            "octo".to_string(),
            Site::for_owner("octo"),
            path,
            ThemeState::load(Box::new(MemoryPreferenceStore::default())),
            Arc::new(ProjectCache::new(Arc::new(Unavailable))),
            Handle::current(),
        )
    }

    #[tokio::test]
    async fn test_not_found_page_renders() {
        let mut app = app_at("/nope");
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("404"));
        assert!(text.contains("/nope"));
    }

    #[tokio::test]
    async fn test_projects_failure_shows_retry() {
        let mut app = app_at("/projects");
        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while app.projects.is_pending() {
                tokio::task::yield_now().await;
                app.drain_results();
            }
        })
        .await
        .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("GitHub is having trouble"));
        assert!(text.contains("Press r to retry"));
    }
}
