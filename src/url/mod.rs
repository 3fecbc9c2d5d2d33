//! URL handling module
//!
//! This module provides URL normalization, network location extraction,
//! link resolution, and the crawl scope policy.

mod domain;
mod normalize;

use crate::UrlError;
use std::collections::HashSet;
use url::Url;

// Re-export main functions
pub use domain::extract_netloc;
pub use normalize::{normalize_url, resolve_link};

/// Path suffixes that never point at a documentation page
pub const DENIED_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".pdf", ".css", ".js", ".zip", ".svg", ".woff", ".ttf",
];

/// Decides which URLs belong to the crawl
///
/// The set of allowed network locations is derived once from the seed URLs
/// and never changes for the lifetime of the policy.
#[derive(Debug, Clone)]
pub struct UrlPolicy {
    base_domains: HashSet<String>,
}

impl UrlPolicy {
    /// Builds a policy from the seed URLs
    ///
    /// # Arguments
    ///
    /// * `seeds` - The crawl's seed URLs
    ///
    /// # Returns
    ///
    /// * `Ok(UrlPolicy)` - Policy scoped to the seeds' network locations
    /// * `Err(UrlError)` - A seed could not be parsed or has no host
    pub fn from_seeds<S: AsRef<str>>(seeds: &[S]) -> Result<Self, UrlError> {
        let mut base_domains = HashSet::new();

        for seed in seeds {
            let url = Url::parse(seed.as_ref().trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
            let netloc = extract_netloc(&url).ok_or(UrlError::MissingDomain)?;
            base_domains.insert(netloc);
        }

        Ok(Self { base_domains })
    }

    /// Returns the network locations this policy accepts
    pub fn base_domains(&self) -> &HashSet<String> {
        &self.base_domains
    }

    /// Checks whether a URL is inside the crawl scope
    ///
    /// A URL is valid when its scheme is http or https, its network location
    /// is one of the seed locations, and its path does not end in a denied
    /// extension. Unparsable input is never valid.
    pub fn is_valid(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return false;
        }

        match extract_netloc(&parsed) {
            Some(netloc) if self.base_domains.contains(&netloc) => {}
            _ => return false,
        }

        let path = parsed.path().to_lowercase();
        !DENIED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
    }
}
