// Static site content shown on the home, about and articles pages.
// Loaded from a JSON file when one is configured; otherwise derived from the owner.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A published article link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub published: Option<NaiveDate>,
    #[serde(default)]
    pub summary: String,
}

/// Everything on the site that does not come from GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub about: Vec<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Site {
    /// Minimal content for an owner with no content file.
    pub fn for_owner(owner: &str) -> Self {
        Self {
            title: owner.to_string(),
            tagline: format!("Projects and writing by {}", owner),
            about: Vec::new(),
            articles: Vec::new(),
        }
    }

    /// Read site content from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut site: Site = serde_json::from_str(&contents)?;
        // Newest first; undated articles sink to the end.
        site.articles
            .sort_by(|a, b| b.published.cmp(&a.published));
        tracing::info!(path = %path.display(), articles = site.articles.len(), "loaded site content");
        Ok(site)
    }
}
