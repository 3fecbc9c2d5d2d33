//! File-per-URL cache implementation
//!
//! Each page is stored as one JSON file named after the encoded URL.

use crate::cache::{cache_key, CacheEntry, CacheResult, PageCache};
use crate::document::PageRecord;
use chrono::{Duration, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Cache storing one JSON document per normalized URL
#[derive(Debug, Clone)]
pub struct FileCache {
    directory: PathBuf,
    ttl: Option<Duration>,
}

impl FileCache {
    /// Opens (and creates if needed) a cache directory
    ///
    /// # Arguments
    ///
    /// * `directory` - Directory that holds the cache files
    /// * `ttl` - Maximum entry age; `None` keeps entries forever
    ///
    /// # Returns
    ///
    /// * `Ok(FileCache)` - Cache ready for use
    /// * `Err(std::io::Error)` - The directory could not be created
    pub fn open(directory: impl Into<PathBuf>, ttl: Option<Duration>) -> std::io::Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory, ttl })
    }

    /// Returns the cache directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the file path that holds the entry for `url`
    pub fn entry_path(&self, url: &str) -> PathBuf {
        self.directory.join(format!("{}.json", cache_key(url)))
    }

    /// Reads an entry, surfacing every failure
    ///
    /// Returns `Ok(None)` when the file does not exist or the entry is older
    /// than the configured TTL.
    pub fn try_get(&self, url: &str) -> CacheResult<Option<PageRecord>> {
        let path = self.entry_path(url);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let entry: CacheEntry = serde_json::from_str(&content)?;

        if let Some(ttl) = self.ttl {
            if Utc::now() - entry.fetched_at > ttl {
                tracing::debug!("Cache entry for {} is stale", url);
                return Ok(None);
            }
        }

        Ok(Some(entry.page))
    }

    /// Writes an entry, surfacing every failure
    ///
    /// The entry is written to a temporary file first and renamed into place
    /// so readers never observe a partial file.
    pub fn try_put(&self, url: &str, page: &PageRecord) -> CacheResult<()> {
        let entry = CacheEntry {
            fetched_at: Utc::now(),
            page: page.clone(),
        };
        let content = serde_json::to_string(&entry)?;

        let path = self.entry_path(url);
        let tmp_path = path.with_extension(format!("json.{}.tmp", std::process::id()));
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }
}

impl PageCache for FileCache {
    fn get(&self, url: &str) -> Option<PageRecord> {
        match self.try_get(url) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache entry for {}: {}", url, e);
                None
            }
        }
    }

    fn put(&self, url: &str, page: &PageRecord) {
        if let Err(e) = self.try_put(url, page) {
            tracing::warn!("Failed to cache {}: {}", url, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ContentBlock;
    use tempfile::TempDir;

    fn sample_page(url: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: "Users API".to_string(),
            content_blocks: vec![ContentBlock {
                level: 1,
                heading: "Users".to_string(),
                text: "List users.".to_string(),
            }],
            raw_html: "<h1>Users</h1><p>List users.</p>".to_string(),
        }
    }

    #[test]
    fn test_miss_on_empty_cache() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path(), None).unwrap();
        assert!(cache.get("https://example.com/docs").is_none());
    }

    #[test]
    fn test_put_then_get() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path(), None).unwrap();
        let url = "https://example.com/docs/api/users";
        let page = sample_page(url);

        cache.put(url, &page);

        assert!(cache.entry_path(url).exists());
        assert_eq!(cache.get(url), Some(page));
    }

    #[test]
    fn test_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path(), None).unwrap();
        let url = "https://example.com/docs/api/users";

        cache.put(url, &sample_page(url));
        let mut newer = sample_page(url);
        newer.title = "Users API v2".to_string();
        cache.put(url, &newer);

        assert_eq!(cache.get(url).unwrap().title, "Users API v2");
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path(), None).unwrap();
        let url = "https://example.com/docs/broken";

        fs::write(cache.entry_path(url), "{ not json").unwrap();

        assert!(cache.try_get(url).is_err());
        assert!(cache.get(url).is_none());
    }

    #[test]
    fn test_stale_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path(), Some(Duration::hours(1))).unwrap();
        let url = "https://example.com/docs/old";

        let entry = CacheEntry {
            fetched_at: Utc::now() - Duration::hours(2),
            page: sample_page(url),
        };
        fs::write(cache.entry_path(url), serde_json::to_string(&entry).unwrap()).unwrap();

        assert!(cache.get(url).is_none());
    }

    #[test]
    fn test_fresh_entry_within_ttl() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path(), Some(Duration::hours(1))).unwrap();
        let url = "https://example.com/docs/new";

        cache.put(url, &sample_page(url));
        assert!(cache.get(url).is_some());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path().join("sub"), None).unwrap();
        fs::remove_dir_all(cache.directory()).unwrap();

        let url = "https://example.com/docs";
        cache.put(url, &sample_page(url));
        assert!(cache.get(url).is_none());
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let cache = FileCache::open(&nested, None).unwrap();
        assert!(cache.directory().is_dir());
    }
}
