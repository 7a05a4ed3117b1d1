// State management module.
// Routing, theme preference, and the projects page lifecycle.

pub mod projects;
pub mod router;
pub mod theme;

pub use projects::{LoadingState, ProjectsPageState, RequestTicket};
pub use router::{BreadcrumbNode, Route, Router, resolve};
pub use theme::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Theme, ThemeState};
