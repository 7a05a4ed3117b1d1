// GitHub API module.
// Provides the client, raw record types, and the project source seam used by the cache.

pub mod client;
pub mod endpoints;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::project::Project;

pub use client::GitHubClient;
pub use endpoints::validate_owner;
pub use types::*;

/// Outcome of one project fetch: the full ordered list, or a single failure.
pub type FetchResult = Result<Arc<[Project]>, FetchError>;

/// Anything that can list an owner's projects. One call is one outbound request.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch(&self, owner: &str) -> FetchResult;

    /// Most recent rate limit reported by the remote, if it reports one.
    fn rate_limit(&self) -> Option<RateLimit> {
        None
    }
}
