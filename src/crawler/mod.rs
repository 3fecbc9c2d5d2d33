//! Crawler module for documentation page collection
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with error classification
//! - Link discovery and scope filtering
//! - The breadth-first frontier and politeness throttling
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod links;
mod scheduler;

pub use coordinator::{run_crawl, CrawlEngine, CrawlOutcome, CrawlStats};
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use links::{discover_links, DiscoveredLink, LinkDiscovery};
pub use scheduler::{Frontier, FrontierEntry, Throttle};
