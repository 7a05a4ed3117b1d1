// Project display model and the normalizer that builds it.
// Raw repository records are mapped best-effort; records without a name or url are dropped.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::github::RawRepository;

/// Display-ready repository metadata. Every optional field carries a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub url: String,
    pub language: String,
    pub star_count: u64,
    pub last_updated: DateTime<Utc>,
    pub topics: BTreeSet<String>,
}

impl Project {
    /// Whether the record carried a real timestamp rather than the epoch default.
    pub fn has_timestamp(&self) -> bool {
        self.last_updated != DateTime::<Utc>::UNIX_EPOCH
    }
}

/// Map one raw record into a project, or `None` if `name` or `url` is unusable.
pub fn normalize(raw: &RawRepository) -> Option<Project> {
    let name = non_blank(&raw.name)?;
    let url = non_blank(&raw.html_url)
        .or_else(|| non_blank(&raw.url))
        .filter(|candidate| Url::parse(candidate).is_ok())?;

    Some(Project {
        name,
        description: string_or_default(&raw.description),
        url,
        language: string_or_default(&raw.language),
        star_count: count(&raw.stargazers_count)
            .or_else(|| count(&raw.star_count))
            .unwrap_or(0),
        last_updated: timestamp(&raw.pushed_at)
            .or_else(|| timestamp(&raw.updated_at))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        topics: topic_set(&raw.topics),
    })
}

/// Normalize a listing, skipping invalid entries and keeping the order of the rest.
pub fn normalize_all(records: Vec<Value>) -> Vec<Project> {
    let total = records.len();
    let projects: Vec<Project> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<RawRepository>(record).ok())
        .filter_map(|raw| normalize(&raw))
        .collect();

    if projects.len() < total {
        tracing::debug!(
            skipped = total - projects.len(),
            kept = projects.len(),
            "dropped repository records without a usable name or url"
        );
    }

    projects
}

fn non_blank(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_or_default(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn topic_set(value: &Value) -> BTreeSet<String> {
    value
        .as_array()
        .map(|topics| {
            topics
                .iter()
                .filter_map(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRepository {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let project = normalize(&raw(json!({
            "name": "d3bug64describes",
            "url": "https://x/y",
            "starCount": null,
        })))
        .unwrap();

        assert_eq!(project.name, "d3bug64describes");
        assert_eq!(project.url, "https://x/y");
        assert_eq!(project.star_count, 0);
        assert_eq!(project.description, "");
        assert_eq!(project.language, "");
        assert!(project.topics.is_empty());
        assert!(!project.has_timestamp());
    }

    #[test]
    fn test_full_github_record() {
        let project = normalize(&raw(json!({
            "name": "hello-world",
            "html_url": "https://github.com/octo/hello-world",
            "url": "https://api.github.com/repos/octo/hello-world",
            "description": "My first repository",
            "language": "Rust",
            "stargazers_count": 42,
            "pushed_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-04-01T12:00:00Z",
            "topics": ["tui", "github", "tui"],
        })))
        .unwrap();

        assert_eq!(project.url, "https://github.com/octo/hello-world");
        assert_eq!(project.language, "Rust");
        assert_eq!(project.star_count, 42);
        assert_eq!(project.last_updated.to_rfc3339(), "2024-05-01T12:00:00+00:00");
        assert_eq!(project.topics.len(), 2);
        assert!(project.topics.contains("tui"));
    }

    #[test]
    fn test_missing_name_or_url_is_rejected() {
        assert!(normalize(&raw(json!({ "url": "https://x/y" }))).is_none());
        assert!(normalize(&raw(json!({ "name": "   ", "url": "https://x/y" }))).is_none());
        assert!(normalize(&raw(json!({ "name": "a" }))).is_none());
        assert!(normalize(&raw(json!({ "name": "a", "url": "not a url" }))).is_none());
        assert!(normalize(&raw(json!({ "name": 5, "url": "https://x/y" }))).is_none());
    }

    #[test]
    fn test_malformed_optional_fields_default() {
        let project = normalize(&raw(json!({
            "name": "a",
            "html_url": "https://x/a",
            "description": 17,
            "language": ["Rust"],
            "stargazers_count": "many",
            "pushed_at": "yesterday",
            "topics": "rust",
        })))
        .unwrap();

        assert_eq!(project.description, "");
        assert_eq!(project.language, "");
        assert_eq!(project.star_count, 0);
        assert!(!project.has_timestamp());
        assert!(project.topics.is_empty());
    }

    #[test]
    fn test_star_count_coercion() {
        assert_eq!(count(&json!(12)), Some(12));
        assert_eq!(count(&json!(12.9)), Some(12));
        assert_eq!(count(&json!("31")), Some(31));
        assert_eq!(count(&json!(-4)), None);
        assert_eq!(count(&json!(true)), None);
    }

    #[test]
    fn test_both_star_count_keys_keep_the_record() {
        let projects = normalize_all(vec![
            json!({ "name": "a", "html_url": "https://x/a", "stargazers_count": 3, "starCount": 9 }),
            json!({ "name": "b", "html_url": "https://x/b", "stargazers_count": null, "starCount": 5 }),
            json!({ "name": "c", "html_url": "https://x/c", "starCount": "7" }),
        ]);

        let stars: Vec<u64> = projects.iter().map(|p| p.star_count).collect();
        assert_eq!(stars, vec![3, 5, 7]);
    }

    #[test]
    fn test_updated_at_fallback() {
        let project = normalize(&raw(json!({
            "name": "a",
            "html_url": "https://x/a",
            "updated_at": "2023-01-02T03:04:05Z",
        })))
        .unwrap();
        assert!(project.has_timestamp());
    }

    #[test]
    fn test_normalize_all_preserves_order_and_skips_invalid() {
        let projects = normalize_all(vec![
            json!({ "name": "first", "html_url": "https://x/1" }),
            json!({ "html_url": "https://x/nameless" }),
            json!("not an object"),
            json!({ "name": "second", "html_url": "https://x/2" }),
            json!({ "name": "urlless" }),
            json!({ "name": "third", "url": "https://x/3" }),
        ]);

        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
