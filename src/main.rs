//! Doc Module Extractor main entry point
//!
//! This is the command-line interface for crawling a documentation site and
//! writing its module report.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use doc_module_extractor::config::{load_config_with_hash, validate, Config};
use doc_module_extractor::crawler::run_crawl;
use doc_module_extractor::inference::ModuleInference;
use doc_module_extractor::output::{
    build_report, print_statistics, write_json_report, write_markdown_report, RunSummary,
};
use doc_module_extractor::summary::HeuristicSummarizer;
use doc_module_extractor::ExtractorError;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Doc Module Extractor: maps a documentation site into modules
///
/// Crawls a documentation site confined to the seed domains, groups the
/// pages into modules and submodules, and writes a described JSON report.
#[derive(Parser, Debug)]
#[command(name = "doc-module-extractor")]
#[command(version)]
#[command(about = "Extracts a module hierarchy from a documentation site", long_about = None)]
struct Cli {
    /// Documentation URL(s) to crawl, comma-separated
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Path to save the JSON report
    #[arg(long, value_name = "PATH")]
    output: Option<String>,

    /// Also write a markdown summary to this path
    #[arg(long, value_name = "PATH")]
    markdown: Option<String>,

    /// Maximum link depth from the seeds
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum number of pages to collect
    #[arg(long)]
    max_pages: Option<usize>,

    /// Disable the page cache
    #[arg(long)]
    no_cache: bool,

    /// Directory of the page cache
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match build_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if let Err(e) = handle_extract(&config, config_hash, cli.quiet).await {
        tracing::error!("Extraction failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_module_extractor=info,warn"),
            1 => EnvFilter::new("doc_module_extractor=debug,info"),
            2 => EnvFilter::new("doc_module_extractor=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(urls) = &cli.url {
        config.seeds = urls
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(output) = &cli.output {
        config.output.json_path = output.clone();
    }
    if let Some(markdown) = &cli.markdown {
        config.output.markdown_path = Some(markdown.clone());
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }
    if let Some(cache_dir) = &cli.cache_dir {
        config.cache.directory = cache_dir.clone();
    }

    if config.seeds.is_empty() {
        return Err(ExtractorError::NoSeeds.into());
    }
    validate(&config)?;

    Ok((config, config_hash))
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Doc Module Extractor Dry Run ===\n");

    println!("Seeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nCache:");
    if config.cache.enabled {
        println!("  Directory: {}", config.cache.directory);
        match config.cache.ttl_secs {
            Some(ttl) => println!("  Entries expire after {}s", ttl),
            None => println!("  Entries never expire"),
        }
    } else {
        println!("  Disabled");
    }

    println!("\nOutput:");
    println!("  JSON report: {}", config.output.json_path);
    if let Some(markdown) = &config.output.markdown_path {
        println!("  Markdown summary: {}", markdown);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main operation: crawl, infer, describe, write
async fn handle_extract(
    config: &Config,
    config_hash: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with the pages collected so far");
            interrupt.cancel();
        }
    });

    tracing::info!("Starting extraction for: {:?}", config.seeds);
    let started_at = Utc::now();

    let outcome = run_crawl(config, cancel).await?;
    if outcome.pages.is_empty() {
        return Err(ExtractorError::NoPagesCrawled.into());
    }

    let tree = ModuleInference::new(&config.seeds).infer_structure(&outcome.pages);
    let report = build_report(&tree, &HeuristicSummarizer::new());

    write_json_report(&report, Path::new(&config.output.json_path))
        .with_context(|| format!("failed to write {}", config.output.json_path))?;

    let summary = RunSummary {
        seeds: config.seeds.clone(),
        started_at,
        finished_at: Utc::now(),
        config_hash,
        stats: outcome.stats,
        modules: tree.len(),
        submodules: tree.modules().iter().map(|m| m.submodules.len()).sum(),
    };

    if let Some(markdown_path) = &config.output.markdown_path {
        write_markdown_report(&report, &summary, Path::new(markdown_path))
            .with_context(|| format!("failed to write {}", markdown_path))?;
    }

    if !quiet {
        print_statistics(&summary);
    }

    Ok(())
}
