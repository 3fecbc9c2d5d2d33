//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of an extraction
//! run, including crawl statistics and the described module hierarchy.

use crate::output::{ModuleReport, OutputResult, RunSummary};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary to `output_path`
///
/// # Arguments
///
/// * `report` - The described modules
/// * `summary` - Statistics of the run
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn write_markdown_report(
    report: &[ModuleReport],
    summary: &RunSummary,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(report, summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!("Saved markdown summary to {}", output_path.display());
    Ok(())
}

/// Formats a run as markdown
pub fn format_markdown_report(report: &[ModuleReport], summary: &RunSummary) -> String {
    let mut md = String::new();

    md.push_str("# Documentation Module Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n",
        summary.duration_seconds()
    ));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    if summary.stats.cancelled {
        md.push_str("- **Status**: cancelled\n");
    }
    md.push_str("- **Seeds**:\n");
    for seed in &summary.seeds {
        md.push_str(&format!("  - {}\n", seed));
    }
    md.push('\n');

    md.push_str("## Crawl Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Pages Collected | {} |\n", summary.stats.pages_total()));
    md.push_str(&format!("| Fetched | {} |\n", summary.stats.pages_fetched));
    md.push_str(&format!("| From Cache | {} |\n", summary.stats.cache_hits));
    md.push_str(&format!("| Failed Fetches | {} |\n", summary.stats.fetch_failures));
    md.push_str(&format!(
        "| Out of Scope | {} |\n",
        summary.stats.skipped_out_of_scope
    ));
    md.push_str(&format!("| Links Enqueued | {} |\n\n", summary.stats.links_enqueued));
    md.push_str(&format!(
        "- **Fetch Success Rate**: {:.2}%\n\n",
        summary.fetch_success_rate()
    ));

    md.push_str(&format!("## Modules ({})\n\n", report.len()));
    for entry in report {
        md.push_str(&format!("### {}\n\n", entry.module));
        md.push_str(&format!("{}\n\n", entry.description));

        if !entry.submodules.is_empty() {
            md.push_str("| Submodule | Description |\n");
            md.push_str("|-----------|-------------|\n");
            for (name, description) in &entry.submodules {
                md.push_str(&format!("| {} | {} |\n", name, escape_cell(description)));
            }
            md.push('\n');
        }
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
