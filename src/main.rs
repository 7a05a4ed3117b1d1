//! folio - a personal site rendered in the terminal.

use std::sync::Arc;

use clap::Parser;

use folio::app::App;
use folio::cache::{ProjectCache, paths};
use folio::config::{Args, Config};
use folio::github::GitHubClient;
use folio::state::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ThemeState};

fn main() -> folio::Result<()> {
    let args = Args::parse();

    folio::logging::init(paths::log_path().as_deref());

    let config = Config::from_args(args)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let client = GitHubClient::new(&config.api_base, config.token.as_deref(), config.timeout)?;
    let cache = Arc::new(ProjectCache::new(Arc::new(client)).with_ttl(config.cache_ttl));

    let store: Box<dyn PreferenceStore> = match FilePreferenceStore::default_location() {
        Some(store) => {
            tracing::debug!(path = %store.path().display(), "using preference file");
            Box::new(store)
        }
        None => {
            tracing::warn!("no config directory; theme will not persist");
            Box::new(MemoryPreferenceStore::default())
        }
    };
    let theme = ThemeState::load(store);

    let mut app = App::new(
        config.owner,
        config.site,
        &config.initial_path,
        theme,
        cache,
        runtime.handle().clone(),
    );

    let mut terminal = ratatui::try_init()?;
    let result = app.run(&mut terminal);
    ratatui::restore();

    runtime.shutdown_background();
    result?;
    Ok(())
}
