//! Outbound link discovery
//!
//! Turns the raw anchor hrefs of a page into crawl candidates:
//! - Resolve each href against the page's original URL
//! - Normalize the result for de-duplication
//! - Keep only URLs inside the crawl scope

use crate::url::{normalize_url, resolve_link, UrlPolicy};
use url::Url;

/// A link found on a page that is inside the crawl scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    /// Absolute URL as resolved, fragment and query intact
    pub absolute: String,

    /// De-duplication key
    pub normalized: String,
}

/// Links kept from one page, and how many the policy dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDiscovery {
    /// In-scope links in document order
    pub links: Vec<DiscoveredLink>,

    /// Resolvable hrefs rejected by the URL policy
    pub out_of_scope: usize,
}

/// Resolves and filters the hrefs found on a page
///
/// Relative hrefs are resolved against `page_url`, which must be the URL the
/// page was requested with (not its normalized form). Links outside the
/// policy's scope are dropped and counted. Hrefs that do not resolve to a
/// web URL at all (`mailto:`, bare fragments) are ignored without being
/// counted. Order follows the document; duplicates are kept, the frontier
/// deduplicates.
///
/// # Arguments
///
/// * `hrefs` - Raw href attribute values in document order
/// * `page_url` - The original URL of the page the hrefs came from
/// * `policy` - The crawl scope
///
/// # Example
///
/// ```
/// use doc_module_extractor::crawler::discover_links;
/// use doc_module_extractor::url::UrlPolicy;
///
/// let policy = UrlPolicy::from_seeds(&["https://example.com/docs/"]).unwrap();
/// let hrefs = vec!["api/users#list".to_string(), "https://other.com/".to_string()];
/// let found = discover_links(&hrefs, "https://example.com/docs/intro", &policy);
///
/// assert_eq!(found.links.len(), 1);
/// assert_eq!(found.links[0].absolute, "https://example.com/docs/api/users#list");
/// assert_eq!(found.links[0].normalized, "https://example.com/docs/api/users");
/// assert_eq!(found.out_of_scope, 1);
/// ```
pub fn discover_links(hrefs: &[String], page_url: &str, policy: &UrlPolicy) -> LinkDiscovery {
    let base_url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot resolve links against {}: {}", page_url, e);
            return LinkDiscovery::default();
        }
    };

    let mut found = LinkDiscovery::default();
    for absolute in hrefs.iter().filter_map(|href| resolve_link(href, &base_url)) {
        let Ok(normalized) = normalize_url(absolute.as_str()) else {
            continue;
        };
        if !policy.is_valid(&normalized) {
            tracing::trace!("Out of scope: {}", normalized);
            found.out_of_scope += 1;
            continue;
        }
        found.links.push(DiscoveredLink {
            absolute: absolute.into(),
            normalized,
        });
    }
    found
}
