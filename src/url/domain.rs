use url::Url;

/// Extracts the network location (host[:port]) from a URL
///
/// The host is lowercased. The port is only included when the URL carries a
/// non-default port for its scheme.
///
/// # Arguments
///
/// * `url` - The URL to extract the network location from
///
/// # Returns
///
/// * `Some(String)` - The lowercase host, with `:port` when present
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_module_extractor::url::extract_netloc;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_netloc(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:8080/docs").unwrap();
/// assert_eq!(extract_netloc(&url), Some("localhost:8080".to_string()));
/// ```
pub fn extract_netloc(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
