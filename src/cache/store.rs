// In-memory project cache with single-flight fetching.
// One entry per owner for the life of the process; failures are cached alongside successes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;

use crate::github::{FetchResult, ProjectSource, RateLimit};

/// A cached fetch outcome. Never modified after it is written.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Owner identifier the entry was fetched for.
    pub key: String,
    /// The fetch outcome.
    pub value: FetchResult,
    /// When the fetch completed.
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(key: &str, value: FetchResult) -> Self {
        Self {
            key: key.to_string(),
            value,
            fetched_at: Utc::now(),
        }
    }

    /// Check if this entry is older than `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.fetched_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed > ttl
    }
}

/// Slot shared by every caller asking for the same key.
/// Empty while the first fetch is in flight; later callers wait on it.
type Slot = Arc<OnceCell<CacheEntry>>;

/// Memoizes project fetches per owner, coalescing concurrent requests.
pub struct ProjectCache {
    source: Arc<dyn ProjectSource>,
    slots: Mutex<HashMap<String, Slot>>,
    ttl: Option<Duration>,
}

impl ProjectCache {
    /// Create a cache with no expiry in front of `source`.
    pub fn new(source: Arc<dyn ProjectSource>) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
            ttl: None,
        }
    }

    /// Expire entries older than `ttl`, starting a fresh fetch cycle on the next `get`.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Get the projects for `owner`, fetching at most once per key.
    pub async fn get(&self, owner: &str) -> FetchResult {
        let owner = owner.trim();
        let slot = self.slot(owner);
        let entry = slot
            .get_or_init(|| async move {
                tracing::debug!(owner, "cache miss, fetching");
                CacheEntry::new(owner, self.source.fetch(owner).await)
            })
            .await;

        if let Err(e) = &entry.value {
            tracing::debug!(owner, kind = %e.kind(), "serving failed fetch");
        }
        entry.value.clone()
    }

    /// Peek at a completed entry without fetching.
    pub fn entry(&self, owner: &str) -> Option<CacheEntry> {
        self.lock().get(owner.trim()).and_then(|slot| slot.get().cloned())
    }

    /// Drop the completed entry for `owner` so the next `get` starts a new request cycle.
    ///
    /// A fetch still in flight is left in place and its result stays cached.
    pub fn invalidate(&self, owner: &str) -> bool {
        let owner = owner.trim();
        let mut slots = self.lock();
        let completed = slots.get(owner).is_some_and(|slot| slot.get().is_some());
        if !completed {
            return false;
        }
        slots.remove(owner);
        tracing::info!(owner, "invalidated cached projects");
        true
    }

    /// Rate limit last reported by the underlying source.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        self.source.rate_limit()
    }

    /// Number of keys currently held, including in-flight fetches.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Find or register the slot for `owner`, replacing it if its entry has expired.
    fn slot(&self, owner: &str) -> Slot {
        let mut slots = self.lock();

        let expired = match (self.ttl, slots.get(owner)) {
            (Some(ttl), Some(existing)) => existing.get().is_some_and(|entry| entry.is_expired(ttl)),
            _ => false,
        };
        if expired {
            tracing::debug!(owner, "cached projects expired");
            slots.remove(owner);
        }

        slots
            .entry(owner.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
