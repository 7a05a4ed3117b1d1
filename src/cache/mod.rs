// Cache module.
// In-memory project memoization plus the on-disk locations folio writes to.

pub mod paths;
pub mod store;

pub use store::{CacheEntry, ProjectCache};
