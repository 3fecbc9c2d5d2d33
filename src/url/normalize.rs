use crate::UrlError;
use url::Url;

/// Normalizes a URL into its de-duplication key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Remove fragment (everything after #)
/// 3. Remove the query string
///
/// Scheme, host and path are preserved. Two URLs that differ only in their
/// fragment or query normalize to the same string.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(String)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse the URL
///
/// # Examples
///
/// ```
/// use doc_module_extractor::url::normalize_url;
///
/// let url = normalize_url("https://example.com/docs/intro?tab=1#setup").unwrap();
/// assert_eq!(url, "https://example.com/docs/intro");
/// ```
pub fn normalize_url(url_str: &str) -> Result<String, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    url.set_fragment(None);
    url.set_query(None);

    Ok(url.into())
}

/// Resolves a link href against the page it was found on
///
/// The base must be the page's original (non-normalized) URL.
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Empty and fragment-only hrefs
/// - Invalid URLs
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    base_url.join(href).ok()
}
