// App state and main event loop.
// Routes navigation, spawns project fetches on the runtime, and applies their results.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::cache::ProjectCache;
use crate::content::Site;
use crate::github::{FetchResult, RateLimit};
use crate::state::{ProjectsPageState, RequestTicket, Route, Router, ThemeState};
use crate::ui;

const TICK: Duration = Duration::from_millis(100);

type Completion = (RequestTicket, FetchResult);

/// Main application state.
pub struct App {
    pub router: Router,
    pub theme: ThemeState,
    pub projects: ProjectsPageState,
    pub site: Site,
    /// GitHub user whose projects are shown.
    pub owner: String,
    /// Path being typed into the `:` prompt, if open.
    pub prompt: Option<String>,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    cache: Arc<ProjectCache>,
    runtime: Handle,
    results_tx: UnboundedSender<Completion>,
    results_rx: UnboundedReceiver<Completion>,
}

impl App {
    pub fn new(
        owner: String,
        site: Site,
        initial_path: &str,
        theme: ThemeState,
        cache: Arc<ProjectCache>,
        runtime: Handle,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            router: Router::new(initial_path),
            theme,
            projects: ProjectsPageState::new(),
            site,
            owner,
            prompt: None,
            show_help: false,
            should_quit: false,
            cache,
            runtime,
            results_tx,
            results_rx,
        };
        tracing::info!(path = initial_path, route = ?app.router.current(), "mounted");
        app.on_route_changed();
        app
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.drain_results();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Navigate to `path`, as if typed into the address bar.
    pub fn navigate(&mut self, path: &str) -> Route {
        let route = self.router.navigate(path);
        self.on_route_changed();
        route
    }

    /// Return to the previous path, if there is one.
    pub fn back(&mut self) {
        if self.router.back().is_some() {
            self.on_route_changed();
        }
    }

    /// Drop the cached projects and fetch them again.
    ///
    /// Ignored while a fetch is in flight or when the last failure would fail again.
    pub fn retry_projects(&mut self) {
        if self.router.current() != Route::Projects {
            return;
        }
        if !self.projects.can_refresh() {
            tracing::debug!(
                owner = %self.owner,
                pending = self.projects.is_pending(),
                "refresh ignored"
            );
            return;
        }
        self.cache.invalidate(&self.owner);
        self.request_projects();
    }

    /// Rate limit reported by the project source, for the status bar.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        self.cache.rate_limit()
    }

    /// Apply any fetches that have completed since the last tick.
    pub fn drain_results(&mut self) {
        while let Ok((ticket, result)) = self.results_rx.try_recv() {
            self.projects.complete(ticket, result, &self.router);
        }
    }

    fn on_route_changed(&mut self) {
        self.show_help = false;
        if self.router.current() == Route::Projects {
            self.request_projects();
        }
    }

    /// Ask the cache for projects in the background, tagged with the current route.
    fn request_projects(&mut self) {
        let ticket = RequestTicket::issue(&self.router);
        self.projects.begin(ticket);

        let cache = self.cache.clone();
        let owner = self.owner.clone();
        let tx = self.results_tx.clone();
        self.runtime.spawn(async move {
            let result = cache.get(&owner).await;
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send((ticket, result));
        });
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Esc => self.show_help = false,
            KeyCode::Char('t') => {
                let theme = self.theme.toggle();
                tracing::info!(theme = theme.as_str(), "theme toggled");
            }
            KeyCode::Char(':') => self.prompt = Some(String::new()),
            KeyCode::Tab => self.go_to(self.router.current().next()),
            KeyCode::BackTab => self.go_to(self.router.current().prev()),
            KeyCode::Backspace => self.back(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.go_to(Route::NAV[index]);
            }
            KeyCode::Char('r') => self.retry_projects(),
            KeyCode::Down | KeyCode::Char('j') if self.router.current() == Route::Projects => {
                self.projects.select_next();
            }
            KeyCode::Up | KeyCode::Char('k') if self.router.current() == Route::Projects => {
                self.projects.select_prev();
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                if let Some(path) = self.prompt.take() {
                    self.navigate(&path);
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.prompt.as_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.prompt.as_mut() {
                    input.push(c);
                }
            }
            _ => {}
        }
    }

    fn go_to(&mut self, route: Route) {
        if let Some(path) = route.path() {
            self.navigate(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::github::ProjectSource;
    use crate::project::Project;
    use crate::state::{LoadingState, MemoryPreferenceStore, Theme};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use crossterm::event::KeyModifiers;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        calls: AtomicUsize,
        failure: Option<FetchError>,
    }

    #[async_trait]
    impl ProjectSource for StubSource {
        async fn fetch(&self, owner: &str) -> FetchResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(e) = &self.failure {
                return Err(e.clone());
            }
            Ok(Arc::from(vec![Project {
                name: "site".to_string(),
                description: String::new(),
                url: format!("https://github.com/{}/site", owner),
                language: "Rust".to_string(),
                star_count: 1,
                last_updated: DateTime::<Utc>::UNIX_EPOCH,
                topics: BTreeSet::new(),
            }]))
        }
    }

    fn app_at(path: &str, fail: bool) -> (App, Arc<StubSource>) {
        let failure = fail.then(|| FetchError::Network("connection refused".to_string()));
        app_failing_with(path, failure)
    }

    fn app_failing_with(path: &str, failure: Option<FetchError>) -> (App, Arc<StubSource>) {
        let source = Arc::new(StubSource {
            calls: AtomicUsize::new(0),
            failure,
        });
        let cache = Arc::new(ProjectCache::new(source.clone()));
        let theme = ThemeState::load(Box::new(MemoryPreferenceStore::default()));
        let app = App::new(
            "octo".to_string(),
            Site::for_owner("octo"),
            path,
            theme,
            cache,
            Handle::current(),
        );
        (app, source)
    }

    async fn settle(app: &mut App) {
        let (ticket, result) = app.results_rx.recv().await.unwrap();
        app.projects.complete(ticket, result, &app.router);
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn test_mounting_on_projects_loads_them() {
        let (mut app, source) = app_at("/projects", false);
        assert!(app.projects.data.is_loading());

        settle(&mut app).await;
        assert_eq!(app.projects.data.data().unwrap().len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_other_pages_do_not_fetch() {
        let (mut app, source) = app_at("/", false);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.router.current(), Route::About);
        assert!(matches!(app.projects.data, LoadingState::Idle));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_leaving_projects_discards_response() {
        let (mut app, _) = app_at("/projects", false);
        app.navigate("/about");

        settle(&mut app).await;
        assert!(app.projects.data.data().is_none());
    }

    #[tokio::test]
    async fn test_revisiting_projects_uses_cache() {
        let (mut app, source) = app_at("/projects", false);
        settle(&mut app).await;

        app.navigate("/articles");
        app.navigate("/projects");
        settle(&mut app).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(app.projects.data.data().is_some());
    }

    #[tokio::test]
    async fn test_retry_refetches_after_failure() {
        let (mut app, source) = app_at("/projects", true);
        settle(&mut app).await;
        assert!(app.projects.can_retry());

        press(&mut app, KeyCode::Char('r'));
        settle(&mut app).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_after_success_refetches() {
        let (mut app, source) = app_at("/projects", false);
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('r'));
        assert!(app.projects.is_pending());
        settle(&mut app).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_ignored_while_fetch_in_flight() {
        let (mut app, source) = app_at("/projects", false);
        assert!(app.projects.is_pending());

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('r'));
        settle(&mut app).await;

        assert!(app.results_rx.try_recv().is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(app.projects.data.data().is_some());
    }

    #[tokio::test]
    async fn test_retry_skips_non_retryable_failure() {
        let not_found = FetchError::Remote {
            status: 404,
            body: "Not Found".to_string(),
        };
        let (mut app, source) = app_failing_with("/projects", Some(not_found));
        settle(&mut app).await;
        assert!(!app.projects.can_retry());

        press(&mut app, KeyCode::Char('r'));
        assert!(!app.projects.is_pending());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_path_prompt_navigates() {
        let (mut app, _) = app_at("/", false);

        press(&mut app, KeyCode::Char(':'));
        for c in "/nowhere".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // 'q' goes into the prompt rather than quitting.
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert!(app.prompt.is_none());
        assert!(!app.should_quit);
        assert_eq!(app.router.path(), "/nowhere");
        assert_eq!(app.router.current(), Route::NotFound);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.router.current(), Route::Home);
    }

    #[tokio::test]
    async fn test_theme_toggle_key() {
        let (mut app, _) = app_at("/", false);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.get(), Theme::Dark);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.get(), Theme::Light);
    }

    #[tokio::test]
    async fn test_tab_cycles_routes() {
        let (mut app, _) = app_at("/articles", false);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.router.current(), Route::Home);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.router.current(), Route::Articles);
    }
}
