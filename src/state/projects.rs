// Projects page state.
// Tracks the load lifecycle, list selection, and which request the page is waiting on.

use std::sync::Arc;

use ratatui::widgets::ListState;

use crate::error::FetchError;
use crate::github::FetchResult;
use crate::project::Project;

use super::router::{Route, Router};

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(FetchError),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Identifies one projects request by the router state it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub route: Route,
}

impl RequestTicket {
    pub fn issue(router: &Router) -> Self {
        Self {
            generation: router.generation(),
            route: router.current(),
        }
    }

    /// Whether the router has moved on since this ticket was issued.
    pub fn is_stale(&self, router: &Router) -> bool {
        router.generation() != self.generation || router.current() != self.route
    }
}

/// Complete state for the Projects page.
#[derive(Debug, Default)]
pub struct ProjectsPageState {
    pub data: LoadingState<Arc<[Project]>>,
    pub list_state: ListState,
    pending: Option<RequestTicket>,
}

impl ProjectsPageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a request is in flight for `ticket`.
    pub fn begin(&mut self, ticket: RequestTicket) {
        self.pending = Some(ticket);
        if self.data.data().is_none() {
            self.data = LoadingState::Loading;
        }
    }

    /// Apply a finished request if it is still the one the page is waiting on.
    /// Returns false when the result was discarded.
    pub fn complete(&mut self, ticket: RequestTicket, result: FetchResult, router: &Router) -> bool {
        if self.pending != Some(ticket) || ticket.is_stale(router) {
            tracing::debug!(?ticket, "discarding stale projects response");
            return false;
        }

        self.pending = None;
        match result {
            Ok(projects) => {
                let selected = if projects.is_empty() { None } else { Some(0) };
                self.data = LoadingState::Loaded(projects);
                self.list_state.select(selected);
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "projects failed to load");
                self.data = LoadingState::Error(e);
                self.list_state.select(None);
            }
        }
        true
    }

    /// Whether a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the page should offer a retry.
    pub fn can_retry(&self) -> bool {
        matches!(&self.data, LoadingState::Error(e) if e.is_retryable())
    }

    /// Whether `r` should refetch: nothing in flight, and loaded data or a retryable failure.
    pub fn can_refresh(&self) -> bool {
        !self.is_pending() && (self.can_retry() || matches!(self.data, LoadingState::Loaded(_)))
    }

    /// Get the selected project, if any.
    pub fn selected_project(&self) -> Option<&Project> {
        let projects = self.data.data()?;
        self.list_state.selected().and_then(|i| projects.get(i))
    }

    /// Select next project in list.
    pub fn select_next(&mut self) {
        let len = self.data.data().map_or(0, |p| p.len());
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select previous project in list.
    pub fn select_prev(&mut self) {
        if self.data.data().is_none_or(|p| p.is_empty()) {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}
