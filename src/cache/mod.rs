//! Page cache for previously fetched documents
//!
//! This module handles:
//! - The cache trait used by the crawl engine
//! - Storage-safe key encoding of normalized URLs
//! - A file-per-URL JSON cache with optional expiry

mod file;

pub use file::FileCache;

use crate::document::PageRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during cache operations
///
/// These never escape the [`PageCache`] trait: reads degrade to a miss and
/// writes are logged.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// A persisted page record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub fetched_at: DateTime<Utc>,
    pub page: PageRecord,
}

/// Key-value store of page records keyed by normalized URL
///
/// Implementations must be safe to share between tasks. Concurrent writes to
/// the same key resolve as last-write-wins.
pub trait PageCache: Send + Sync {
    /// Looks up a page; any read or decode failure is a miss
    fn get(&self, url: &str) -> Option<PageRecord>;

    /// Stores a page; failures are logged and otherwise ignored
    fn put(&self, url: &str, page: &PageRecord);
}

/// Encodes a normalized URL as a storage-safe token
///
/// Every character that is not an ASCII letter or digit becomes `_`. The
/// encoding is deterministic but not injective: `a/b` and `a_b` share a key.
///
/// # Examples
///
/// ```
/// use doc_module_extractor::cache::cache_key;
///
/// assert_eq!(cache_key("https://example.com/docs"), "https___example_com_docs");
/// ```
pub fn cache_key(url: &str) -> String {
    url.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
