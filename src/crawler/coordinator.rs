//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Managing the frontier queue and the visited set
//! - Serving pages from the cache when possible
//! - Coordinating fetching, parsing, and link discovery
//! - Enforcing the depth and page budgets
//! - Stopping early on cancellation

use crate::cache::{FileCache, PageCache};
use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::links::{discover_links, DiscoveredLink};
use crate::crawler::scheduler::{Frontier, FrontierEntry, Throttle};
use crate::document::{DocumentParser, HtmlDocumentParser, PageRecord};
use crate::url::{normalize_url, UrlPolicy};
use crate::{ExtractorError, UrlError};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Counters collected during a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched over the network
    pub pages_fetched: usize,

    /// Pages served from the cache
    pub cache_hits: usize,

    /// Network fetches that failed
    pub fetch_failures: usize,

    /// Discovered links and frontier entries dropped by the URL policy
    pub skipped_out_of_scope: usize,

    /// Links added to the frontier
    pub links_enqueued: usize,

    /// Whether the crawl stopped because it was cancelled
    pub cancelled: bool,
}

impl CrawlStats {
    /// Total pages collected from either source
    pub fn pages_total(&self) -> usize {
        self.pages_fetched + self.cache_hits
    }
}

/// Result of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Pages in visit order
    pub pages: Vec<PageRecord>,
    pub stats: CrawlStats,
}

/// Mutable state of one crawl run
struct CrawlState {
    frontier: Frontier,
    visited: HashSet<String>,
    failed: HashSet<String>,
    pages: Vec<PageRecord>,
    stats: CrawlStats,
}

impl CrawlState {
    fn new(seeds: &[String]) -> Self {
        Self {
            frontier: Frontier::with_seeds(seeds),
            visited: HashSet::new(),
            failed: HashSet::new(),
            pages: Vec::new(),
            stats: CrawlStats::default(),
        }
    }

    fn is_settled(&self, normalized: &str) -> bool {
        self.visited.contains(normalized) || self.failed.contains(normalized)
    }

    fn enqueue_links(&mut self, links: Vec<DiscoveredLink>, depth: u32) {
        for link in links {
            if self.is_settled(&link.normalized) {
                continue;
            }
            if self.frontier.push(link.absolute, depth) {
                self.stats.links_enqueued += 1;
            }
        }
    }
}

/// Breadth-first crawler confined to the seeds' network locations
///
/// The engine owns its collaborators: the fetcher, the document parser and
/// an optional page cache. One fetch is in flight at a time, and successive
/// network requests are spaced by the configured politeness delay.
pub struct CrawlEngine {
    seeds: Vec<String>,
    config: CrawlerConfig,
    policy: UrlPolicy,
    fetcher: Fetcher,
    parser: Arc<dyn DocumentParser>,
    cache: Option<Arc<dyn PageCache>>,
    cancel: CancellationToken,
}

impl CrawlEngine {
    /// Creates a new engine
    ///
    /// # Arguments
    ///
    /// * `seeds` - URLs to start from; they also define the crawl scope
    /// * `config` - Depth, page budget and politeness settings
    /// * `fetcher` - HTTP fetcher
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlEngine)` - Engine with the default HTML parser and no cache
    /// * `Err(UrlError)` - A seed URL could not be parsed
    pub fn new(seeds: Vec<String>, config: CrawlerConfig, fetcher: Fetcher) -> Result<Self, UrlError> {
        let policy = UrlPolicy::from_seeds(&seeds)?;

        Ok(Self {
            seeds,
            config,
            policy,
            fetcher,
            parser: Arc::new(HtmlDocumentParser::new()),
            cache: None,
            cancel: CancellationToken::new(),
        })
    }

    /// Serves and stores pages through `cache`
    pub fn with_cache(mut self, cache: Arc<dyn PageCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replaces the document parser
    pub fn with_parser(mut self, parser: Arc<dyn DocumentParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Stops the crawl between frontier entries once `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Runs the crawl to completion
    ///
    /// The loop ends when the frontier is exhausted, the page budget is
    /// reached, or the cancellation token fires. No per-URL failure aborts
    /// the crawl.
    pub async fn run(&self) -> CrawlOutcome {
        let max_depth = self.config.max_depth;
        let max_pages = self.config.max_pages;
        let mut state = CrawlState::new(&self.seeds);
        let mut throttle = Throttle::new(Duration::from_millis(self.config.politeness_delay_ms));
        let start_time = Instant::now();

        tracing::info!(
            "Starting crawl of {} seed(s): max depth {}, max pages {}",
            self.seeds.len(),
            max_depth,
            max_pages
        );

        while state.visited.len() < max_pages {
            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled");
                state.stats.cancelled = true;
                break;
            }

            let Some(entry) = state.frontier.pop() else {
                tracing::debug!("Frontier is empty");
                break;
            };

            let normalized = match normalize_url(&entry.url) {
                Ok(n) => n,
                Err(e) => {
                    tracing::debug!("Dropping unparsable URL {}: {}", entry.url, e);
                    continue;
                }
            };

            if state.is_settled(&normalized) || entry.depth > max_depth {
                continue;
            }

            if !self.policy.is_valid(&normalized) {
                tracing::debug!("Out of scope: {}", normalized);
                state.stats.skipped_out_of_scope += 1;
                continue;
            }

            let cached = self.cache.as_ref().and_then(|cache| cache.get(&normalized));
            let cached = match cached {
                Some(page) if page.url != normalized => {
                    tracing::warn!("Cache entry for {} holds {}, refetching", normalized, page.url);
                    None
                }
                other => other,
            };

            if let Some(page) = cached {
                tracing::debug!("Cache hit: {} (depth {})", normalized, entry.depth);
                state.visited.insert(normalized);
                state.stats.cache_hits += 1;
                if entry.depth < max_depth {
                    let hrefs = self.parser.parse(&page.raw_html).links;
                    self.discover(&mut state, &hrefs, &entry);
                }
                state.pages.push(page);
                continue;
            }

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("Crawl cancelled");
                    state.stats.cancelled = true;
                    break;
                }
                _ = throttle.wait() => {}
            }

            tracing::info!("Crawling: {} (depth {})", normalized, entry.depth);
            let fetched = self.fetcher.fetch(&normalized).await;
            throttle.record_fetch();

            let html = match fetched {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", normalized, e);
                    state.stats.fetch_failures += 1;
                    state.failed.insert(normalized);
                    continue;
                }
            };

            state.visited.insert(normalized.clone());
            state.stats.pages_fetched += 1;

            let mut parsed = self.parser.parse(&html);
            let hrefs = std::mem::take(&mut parsed.links);
            let page = PageRecord::new(normalized, parsed, html);

            if let Some(cache) = &self.cache {
                cache.put(&page.url, &page);
            }

            if entry.depth < max_depth {
                self.discover(&mut state, &hrefs, &entry);
            }
            state.pages.push(page);

            if state.visited.len() % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages collected, {} in frontier",
                    state.visited.len(),
                    state.frontier.len()
                );
            }
        }

        tracing::info!(
            "Crawling finished. Visited {} pages ({} fetched, {} from cache, {} failed) in {:?}",
            state.visited.len(),
            state.stats.pages_fetched,
            state.stats.cache_hits,
            state.stats.fetch_failures,
            start_time.elapsed()
        );

        CrawlOutcome {
            pages: state.pages,
            stats: state.stats,
        }
    }

    fn discover(&self, state: &mut CrawlState, hrefs: &[String], entry: &FrontierEntry) {
        let found = discover_links(hrefs, &entry.url, &self.policy);
        state.stats.skipped_out_of_scope += found.out_of_scope;
        state.enqueue_links(found.links, entry.depth + 1);
    }
}

/// Runs a complete crawl from configuration
///
/// This function wires the collaborators together:
///
/// 1. Build the HTTP fetcher
/// 2. Open the page cache (when enabled)
/// 3. Create the engine and run it
///
/// # Arguments
///
/// * `config` - The extractor configuration; `config.seeds` must be non-empty
/// * `cancel` - Token that stops the crawl between frontier entries
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Pages collected (possibly none) and statistics
/// * `Err(ExtractorError)` - Setup failed before crawling started
///
/// # Example
///
/// ```no_run
/// use doc_module_extractor::config::Config;
/// use doc_module_extractor::crawler::run_crawl;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = Config::default();
/// config.seeds = vec!["https://example.com/docs/".to_string()];
/// let outcome = run_crawl(&config, CancellationToken::new()).await?;
/// println!("Crawled {} pages", outcome.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    cancel: CancellationToken,
) -> Result<CrawlOutcome, ExtractorError> {
    if config.seeds.is_empty() {
        return Err(ExtractorError::NoSeeds);
    }

    let fetcher = Fetcher::from_config(&config.user_agent, &config.crawler)?;
    let mut engine = CrawlEngine::new(config.seeds.clone(), config.crawler.clone(), fetcher)?
        .with_cancellation(cancel);

    if config.cache.enabled {
        let ttl = config.cache.ttl()?;
        let cache = FileCache::open(&config.cache.directory, ttl)?;
        tracing::debug!("Using page cache at {}", cache.directory().display());
        engine = engine.with_cache(Arc::new(cache));
    }

    Ok(engine.run().await)
}
