//! Document model and HTML content extraction
//!
//! This module defines the page records produced by a crawl and the
//! parser seam used to turn raw HTML into a title, content blocks and links.

mod extract;
pub mod walk;

pub use extract::Extractor;
pub use walk::{DocNode, DocumentWalk};

use serde::{Deserialize, Serialize};

/// A heading-delimited run of text from a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Heading level: 0 for text before any heading, 1-4 for `h1`..`h4`
    pub level: u8,

    /// Text of the heading that opened this block
    pub heading: String,

    /// Text under the heading, whitespace-joined
    pub text: String,
}

/// Output of parsing one HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub title: String,
    pub content_blocks: Vec<ContentBlock>,

    /// Raw `href` values of every anchor, unresolved
    pub links: Vec<String>,
}

/// A crawled page
///
/// Created once per fetched or cache-hit page and never modified afterwards.
/// The raw HTML is retained so links can be rediscovered from a cached copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Normalized URL of the page
    pub url: String,
    pub title: String,
    pub content_blocks: Vec<ContentBlock>,
    pub raw_html: String,
}

impl PageRecord {
    pub fn new(url: String, parsed: ParsedDocument, raw_html: String) -> Self {
        Self {
            url,
            title: parsed.title,
            content_blocks: parsed.content_blocks,
            raw_html,
        }
    }
}

/// Turns HTML into structured page content
///
/// Implementations must be deterministic and must not fail: malformed input
/// degrades to an empty title or empty content.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, html: &str) -> ParsedDocument;
}

/// Default parser built on `scraper`
///
/// Strips navigation and other boilerplate before splitting the main content
/// region into heading-delimited blocks.
#[derive(Debug, Default)]
pub struct HtmlDocumentParser {
    extractor: Extractor,
}

impl HtmlDocumentParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentParser for HtmlDocumentParser {
    fn parse(&self, html: &str) -> ParsedDocument {
        self.extractor.extract(html)
    }
}
