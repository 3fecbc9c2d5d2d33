//! Segment inference strategies
//!
//! Each strategy looks at one aspect of a page and either proposes a list of
//! raw segments or declines. Strategies are tried in a fixed order and the
//! first non-empty proposal wins.

use crate::document::PageRecord;
use url::Url;

/// Single path segments that say nothing about where a page belongs
pub const LOW_INFORMATION_SEGMENTS: &[&str] = &["docs", "index", "home"];

/// Title separators, in priority order
pub const TITLE_SEPARATORS: &[&str] = &[" - ", " | ", " » ", " : "];

/// A source of raw module segments for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceStrategy {
    /// Path segments below the root directory of the first seed
    UrlPath,

    /// Parts of the page title split on a separator
    Title,
}

impl InferenceStrategy {
    /// Default priority order
    pub const CHAIN: [InferenceStrategy; 2] = [InferenceStrategy::UrlPath, InferenceStrategy::Title];

    /// Proposes raw segments for `page`, or `None` to defer to the next strategy
    pub fn apply(&self, page: &PageRecord, root_segments: &[String]) -> Option<Vec<String>> {
        let segments = match self {
            InferenceStrategy::UrlPath => {
                let segments = relevant_path_segments(&page.url, root_segments);
                if is_low_information(&segments) {
                    return None;
                }
                segments
            }
            InferenceStrategy::Title => title_segments(&page.title)?,
        };

        (!segments.is_empty()).then_some(segments)
    }
}

/// Path segments of a URL that carry structure
///
/// Empty tokens and tokens containing a `.` are dropped, then a leading
/// run matching `root_segments` position by position is removed. An
/// unparsable URL has no segments.
pub fn relevant_path_segments(url: &str, root_segments: &[String]) -> Vec<String> {
    let Ok(parsed) = Url::parse(url) else {
        return Vec::new();
    };

    let segments = path_tokens(parsed.path());
    let shared = segments
        .iter()
        .zip(root_segments)
        .take_while(|(segment, root)| segment == root)
        .count();

    segments.into_iter().skip(shared).collect()
}

/// Root segments for inference, taken from the directory of a seed URL
///
/// A seed ending in `/` contributes every path segment. Otherwise the last
/// segment names the seed page itself and is left out.
pub fn root_segments(seed: &str) -> Vec<String> {
    let Ok(parsed) = Url::parse(seed.trim()) else {
        return Vec::new();
    };

    let path = parsed.path();
    let directory = match path.rfind('/') {
        Some(index) => &path[..=index],
        None => "",
    };
    path_tokens(directory)
}

/// Splits a title on the first separator it contains
///
/// Returns up to two non-empty trimmed parts, or `None` when no separator
/// occurs.
pub fn title_segments(title: &str) -> Option<Vec<String>> {
    let separator = TITLE_SEPARATORS.iter().find(|sep| title.contains(**sep))?;

    let parts: Vec<String> = title
        .split(*separator)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(2)
        .map(String::from)
        .collect();

    Some(parts)
}

fn path_tokens(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|token| !token.is_empty() && !token.contains('.'))
        .map(String::from)
        .collect()
}

fn is_low_information(segments: &[String]) -> bool {
    match segments {
        [] => true,
        [only] => LOW_INFORMATION_SEGMENTS
            .iter()
            .any(|word| only.eq_ignore_ascii_case(word)),
        _ => false,
    }
}
