//! folio - a personal site rendered in the terminal.
//!
//! Pages are chosen by a path router; the projects page lists an owner's
//! GitHub repositories through a single-flight cache, and a persisted
//! light/dark preference styles every view.

pub mod app;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod github;
pub mod logging;
pub mod project;
pub mod state;
pub mod ui;

pub use error::{ErrorKind, FetchError, FolioError, Result};
pub use github::FetchResult;
pub use project::{Project, normalize, normalize_all};
pub use state::{Route, Theme, resolve};
