//! Output module for module reports and crawl summaries
//!
//! This module handles:
//! - Turning the inferred module tree into described report entries
//! - Writing the JSON module report
//! - Generating markdown summaries of a run
//! - Recording run statistics

mod json;
mod markdown;
pub mod stats;

pub use json::{format_json_report, write_json_report};
pub use markdown::{format_markdown_report, write_markdown_report};
pub use stats::{print_statistics, RunSummary};

use crate::document::ContentBlock;
use crate::inference::ModuleTree;
use crate::summary::Summarize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Description for a module whose pages all sit in submodules
pub const CONTAINER_DESCRIPTION: &str = "Container module.";

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One entry of the module report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReport {
    pub module: String,

    #[serde(rename = "Description")]
    pub description: String,

    /// Submodule name to description
    #[serde(rename = "Submodules")]
    pub submodules: BTreeMap<String, String>,
}

/// Describes every module and submodule of `tree`
///
/// A module is described from the content of its own pages only; one with
/// no pages of its own is a container. Entries follow the tree's module
/// order.
pub fn build_report(tree: &ModuleTree<'_>, summarizer: &dyn Summarize) -> Vec<ModuleReport> {
    tracing::info!("Generating descriptions for {} modules", tree.len());

    tree.modules()
        .iter()
        .map(|module| {
            let description = if module.pages.is_empty() {
                CONTAINER_DESCRIPTION.to_string()
            } else {
                let blocks: Vec<&ContentBlock> = module
                    .pages
                    .iter()
                    .flat_map(|page| page.content_blocks.iter())
                    .collect();
                summarizer.summarize(&blocks)
            };

            let submodules = module
                .submodules
                .iter()
                .map(|submodule| {
                    let blocks: Vec<&ContentBlock> = submodule
                        .pages
                        .iter()
                        .flat_map(|page| page.content_blocks.iter())
                        .collect();
                    (submodule.name.clone(), summarizer.summarize(&blocks))
                })
                .collect();

            ModuleReport {
                module: module.name.clone(),
                description,
                submodules,
            }
        })
        .collect()
}
