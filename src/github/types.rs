// GitHub API response types.
// Repository records are kept loosely typed so one odd field never sinks a whole listing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of a `/users/{owner}/repos` listing, before normalization.
///
/// Every field is a raw JSON value; missing keys deserialize to `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRepository {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub html_url: Value,
    #[serde(default)]
    pub url: Value,
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub language: Value,
    #[serde(default)]
    pub stargazers_count: Value,
    /// Star count under the camel-case key some mirrors emit.
    #[serde(default, rename = "starCount")]
    pub star_count: Value,
    #[serde(default)]
    pub pushed_at: Value,
    #[serde(default)]
    pub updated_at: Value,
    #[serde(default)]
    pub topics: Value,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
