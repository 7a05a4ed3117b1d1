// Filesystem locations used by folio.
// Preferences live in the platform config directory; the log file lives in the cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

const APP_NAME: &str = "folio";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the base config directory (~/.config/folio on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path to the persisted preferences file.
pub fn preferences_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("preferences.json"))
}

/// Path to the log file.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("folio.log"))
}
