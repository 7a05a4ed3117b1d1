// GitHub API endpoint functions.
// Lists an owner's public repositories and shapes them into projects.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::project::{Project, normalize_all};

use super::client::GitHubClient;
use super::types::RateLimit;
use super::{FetchResult, ProjectSource};

const PER_PAGE: &str = "100";

/// Check that `owner` can be used as a path segment for a GitHub login.
pub fn validate_owner(owner: &str) -> Result<&str, FetchError> {
    let trimmed = owner.trim();
    let forbidden = |c: char| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%');

    if trimmed.is_empty() || trimmed.contains(forbidden) {
        return Err(FetchError::InvalidInput(owner.to_string()));
    }
    Ok(trimmed)
}

impl GitHubClient {
    /// Get the public repositories owned by `owner`, most recently updated first.
    ///
    /// Issues exactly one request; no retries and no pagination past the first page.
    pub async fn get_owner_projects(&self, owner: &str) -> Result<Vec<Project>, FetchError> {
        let owner = validate_owner(owner)?;
        let params = [
            ("type", "owner"),
            ("sort", "updated"),
            ("direction", "desc"),
            ("per_page", PER_PAGE),
        ];
        let body = self
            .get_text(&format!("/users/{}/repos", owner), &params)
            .await?;

        let records: Vec<Value> = serde_json::from_str(&body)
            .map_err(|e| FetchError::Parse(format!("expected a JSON array of repositories: {}", e)))?;

        let projects = normalize_all(records);
        tracing::info!(owner, count = projects.len(), "fetched projects");
        Ok(projects)
    }
}

#[async_trait]
impl ProjectSource for GitHubClient {
    async fn fetch(&self, owner: &str) -> FetchResult {
        self.get_owner_projects(owner).await.map(Arc::from)
    }

    fn rate_limit(&self) -> Option<RateLimit> {
        let rate_limit = GitHubClient::rate_limit(self);
        (rate_limit.limit > 0).then_some(rate_limit)
    }
}
