// Tracing setup.
// The terminal belongs to the UI, so log lines go to a file in the cache directory.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const FILTER_ENV: &str = "FOLIO_LOG";
const DEFAULT_FILTER: &str = "folio=info";

/// Install the global subscriber writing to `path`.
///
/// Logging is skipped entirely when there is no path or the file cannot be opened.
pub fn init(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| DEFAULT_FILTER.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
}
