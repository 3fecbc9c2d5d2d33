//! Run statistics
//!
//! This module collects what happened during one extraction run and prints
//! it to the console.

use crate::crawler::CrawlStats;
use chrono::{DateTime, Utc};

/// Everything the run summary reports
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Seed URLs of the crawl
    pub seeds: Vec<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Hash of the configuration file, when one was used
    pub config_hash: Option<String>,

    /// Crawl counters
    pub stats: CrawlStats,

    /// Number of modules in the report
    pub modules: usize,

    /// Number of submodules across all modules
    pub submodules: usize,
}

impl RunSummary {
    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Share of network fetches that succeeded, as a percentage
    pub fn fetch_success_rate(&self) -> f64 {
        let attempts = self.stats.pages_fetched + self.stats.fetch_failures;
        if attempts == 0 {
            return 100.0;
        }
        (self.stats.pages_fetched as f64 / attempts as f64) * 100.0
    }

    /// Share of collected pages that came from the cache, as a percentage
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.stats.pages_total();
        if total == 0 {
            return 0.0;
        }
        (self.stats.cache_hits as f64 / total as f64) * 100.0
    }
}

/// Prints run statistics to stdout
///
/// # Arguments
///
/// * `summary` - The run to display
pub fn print_statistics(summary: &RunSummary) {
    println!("=== Extraction Statistics ===\n");

    println!("Crawl:");
    println!("  Pages collected: {}", summary.stats.pages_total());
    println!("  Fetched: {}", summary.stats.pages_fetched);
    println!(
        "  From cache: {} ({:.1}%)",
        summary.stats.cache_hits,
        summary.cache_hit_rate()
    );
    println!("  Failed fetches: {}", summary.stats.fetch_failures);
    println!("  Out of scope: {}", summary.stats.skipped_out_of_scope);
    println!("  Links enqueued: {}", summary.stats.links_enqueued);
    if summary.stats.cancelled {
        println!("  Stopped early: cancelled");
    }
    println!();

    println!("Structure:");
    println!("  Modules: {}", summary.modules);
    println!("  Submodules: {}", summary.submodules);
    println!();

    println!(
        "Fetch Success Rate: {:.1}% in {} seconds",
        summary.fetch_success_rate(),
        summary.duration_seconds()
    );
}
