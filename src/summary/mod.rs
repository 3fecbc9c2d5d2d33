//! Module descriptions from page content

use crate::document::ContentBlock;

/// Description used when there is no text to summarize
pub const NO_CONTENT_DESCRIPTION: &str = "No content available for description.";

/// Number of leading sentences kept by the heuristic summarizer
const SUMMARY_SENTENCES: usize = 3;

/// Characters kept when no sentence survives
const FALLBACK_CHARS: usize = 300;

/// Produces a description from content blocks
///
/// Implementations must be pure: the same blocks always give the same text.
pub trait Summarize: Send + Sync {
    fn summarize(&self, blocks: &[&ContentBlock]) -> String;
}

/// Leading-sentences summarizer
///
/// Joins the text of every block and keeps the first few sentences.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSummarizer;

impl HeuristicSummarizer {
    pub fn new() -> Self {
        Self
    }
}

impl Summarize for HeuristicSummarizer {
    fn summarize(&self, blocks: &[&ContentBlock]) -> String {
        let full_text = blocks
            .iter()
            .map(|block| block.text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if full_text.is_empty() {
            return NO_CONTENT_DESCRIPTION.to_string();
        }

        let summary = full_text
            .split('.')
            .take(SUMMARY_SENTENCES)
            .collect::<Vec<_>>()
            .join(". ");
        let summary = summary.trim();

        if summary.is_empty() {
            let head: String = full_text.chars().take(FALLBACK_CHARS).collect();
            return format!("{}...", head);
        }
        format!("{}.", summary)
    }
}
