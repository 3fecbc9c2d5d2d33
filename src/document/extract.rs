//! Content extraction from HTML documents
//!
//! This module handles:
//! - Pruning navigation and other boilerplate regions
//! - Picking the main content region
//! - Splitting the content into heading-delimited blocks
//! - Collecting anchor hrefs outside boilerplate for link discovery

use crate::document::walk::{DocNode, DocumentWalk};
use crate::document::{ContentBlock, ParsedDocument};
use scraper::{ElementRef, Html, Selector};

/// Elements and selectors that never carry page content
const BOILERPLATE: &str = "nav, footer, script, style, noscript, iframe, header, aside, \
    .navigation, .sidebar, .menu, #menu, .footer, #footer, .cookie-banner, .ad, \
    .advertisement, .social-share, .breadcrumb, .toc";

/// Candidate content regions, tried in order
const CONTENT_REGIONS: &[&str] = &["main", "article", "div[role='main']", "body"];

/// Heading assigned to text that precedes the first heading
const DEFAULT_HEADING: &str = "Introduction";

/// Title used when a page has neither a `<title>` nor an `<h1>`
const UNTITLED: &str = "Untitled Document";

/// Extracts structure from HTML using precompiled selectors
#[derive(Debug)]
pub struct Extractor {
    boilerplate: Option<Selector>,
    title: Option<Selector>,
    anchors: Option<Selector>,
    regions: Vec<Selector>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            boilerplate: Selector::parse(BOILERPLATE).ok(),
            title: Selector::parse("title").ok(),
            anchors: Selector::parse("a[href]").ok(),
            regions: CONTENT_REGIONS
                .iter()
                .filter_map(|css| Selector::parse(css).ok())
                .collect(),
        }
    }

    /// Parses HTML content into a title, content blocks and raw link hrefs
    ///
    /// Parsing never fails: malformed markup degrades to whatever html5ever
    /// recovers, which may be an empty document.
    pub fn extract(&self, html: &str) -> ParsedDocument {
        let document = Html::parse_document(html);

        ParsedDocument {
            title: self.extract_title(&document),
            content_blocks: self.extract_blocks(&document),
            links: self.extract_links(&document),
        }
    }

    fn is_boilerplate(&self, element: &ElementRef) -> bool {
        self.boilerplate
            .as_ref()
            .is_some_and(|selector| selector.matches(element))
    }

    fn inside_boilerplate(&self, element: &ElementRef) -> bool {
        self.is_boilerplate(element)
            || element
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| self.is_boilerplate(&ancestor))
    }

    fn extract_title(&self, document: &Html) -> String {
        let from_title_tag = self.title.as_ref().and_then(|selector| {
            document
                .select(selector)
                .next()
                .map(|element| element_text(&element))
                .filter(|text| !text.is_empty())
        });

        if let Some(title) = from_title_tag {
            return title;
        }

        DocumentWalk::new(document.root_element(), |el: &ElementRef| self.is_boilerplate(el))
            .find_map(|node| match node {
                DocNode::Element(el) if el.value().name() == "h1" => Some(element_text(&el)),
                _ => None,
            })
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    fn content_region<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        self.regions.iter().find_map(|selector| {
            document
                .select(selector)
                .find(|element| !self.inside_boilerplate(element))
        })
    }

    fn extract_blocks(&self, document: &Html) -> Vec<ContentBlock> {
        let Some(region) = self.content_region(document) else {
            tracing::debug!("No content region found in document");
            return Vec::new();
        };

        let mut blocks = Vec::new();
        let mut heading = DEFAULT_HEADING.to_string();
        let mut level = 0u8;
        let mut text: Vec<&str> = Vec::new();

        let mut walk = DocumentWalk::new(region, |el: &ElementRef| self.is_boilerplate(el));
        while let Some(node) = walk.next() {
            match node {
                DocNode::Element(element) => {
                    if let Some(next_level) = heading_level(element.value().name()) {
                        flush_block(&mut blocks, &heading, level, &mut text);
                        heading = element_text(&element);
                        level = next_level;
                        walk.skip_subtree();
                    }
                }
                DocNode::Text(raw) => {
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        text.push(trimmed);
                    }
                }
            }
        }
        flush_block(&mut blocks, &heading, level, &mut text);

        blocks
    }

    fn extract_links(&self, document: &Html) -> Vec<String> {
        let Some(selector) = self.anchors.as_ref() else {
            return Vec::new();
        };

        document
            .select(selector)
            .filter(|element| element.value().attr("download").is_none())
            .filter(|element| !self.inside_boilerplate(element))
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

/// Returns 1-4 for `h1`..`h4`, None for everything else
fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        _ => None,
    }
}

/// Text content with each text node trimmed and joined by single spaces
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn flush_block(blocks: &mut Vec<ContentBlock>, heading: &str, level: u8, text: &mut Vec<&str>) {
    if text.is_empty() {
        return;
    }

    blocks.push(ContentBlock {
        level,
        heading: heading.to_string(),
        text: text.join(" "),
    });
    text.clear();
}
