// Command-line and environment configuration.
// Flags may also come from FOLIO_* variables; GITHUB_TOKEN is picked up when set.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::content::Site;
use crate::error::{FolioError, Result};
use crate::github::client::{DEFAULT_TIMEOUT, GITHUB_API_BASE};

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "A personal site for the terminal")]
pub struct Args {
    /// GitHub user whose repositories are listed on the projects page
    #[arg(long, env = "FOLIO_OWNER")]
    pub owner: String,

    /// Token sent with API requests to raise the rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "FOLIO_API_BASE", default_value = GITHUB_API_BASE)]
    pub api_base: String,

    /// Path to open at startup
    #[arg(long, default_value = "/")]
    pub path: String,

    /// JSON file with site title, about text and articles
    #[arg(long, env = "FOLIO_CONTENT")]
    pub content: Option<PathBuf>,

    /// Refetch projects after this many seconds (cached for the whole session if unset)
    #[arg(long, env = "FOLIO_CACHE_TTL")]
    pub cache_ttl: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "FOLIO_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub owner: String,
    pub token: Option<String>,
    pub api_base: String,
    pub initial_path: String,
    pub site: Site,
    pub cache_ttl: Option<Duration>,
    pub timeout: Duration,
}

impl Config {
    /// Build a config from parsed arguments, loading the content file if given.
    pub fn from_args(args: Args) -> Result<Self> {
        url::Url::parse(&args.api_base)
            .map_err(|e| FolioError::Config(format!("--api-base {:?}: {}", args.api_base, e)))?;

        if args.timeout == 0 {
            return Err(FolioError::Config("--timeout must be at least 1 second".to_string()));
        }

        let site = match &args.content {
            Some(path) => Site::load(path)?,
            None => Site::for_owner(&args.owner),
        };

        Ok(Self {
            owner: args.owner,
            token: args.token.filter(|t| !t.trim().is_empty()),
            api_base: args.api_base,
            initial_path: args.path,
            site,
            cache_ttl: args.cache_ttl.map(Duration::from_secs),
            timeout: Duration::from_secs(args.timeout),
        })
    }
}
