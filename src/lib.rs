//! Doc Module Extractor: maps a documentation site into modules
//!
//! This crate crawls a documentation website confined to its seed domain(s),
//! extracts structured content from each page, infers a two-level
//! module/submodule hierarchy from URL paths and page titles, and produces a
//! per-module description.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod document;
pub mod inference;
pub mod output;
pub mod summary;
pub mod url;

use thiserror::Error;

/// Main error type for extractor operations
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No seed URLs were provided")]
    NoSeeds,

    #[error("No pages crawled")]
    NoPagesCrawled,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for extractor operations
pub type Result<T> = std::result::Result<T, ExtractorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use cache::{FileCache, PageCache};
pub use config::Config;
pub use crawler::{run_crawl, CrawlEngine, CrawlOutcome, CrawlStats};
pub use document::{ContentBlock, PageRecord};
pub use inference::{infer_structure, ModuleInference, ModuleTree};
pub use summary::{HeuristicSummarizer, Summarize};
pub use url::{normalize_url, UrlPolicy};
