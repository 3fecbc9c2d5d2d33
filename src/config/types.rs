use crate::ConfigError;
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URLs the crawl starts from; their network locations bound the crawl
    pub seeds: Vec<String>,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum link depth from the seed URLs
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages collected in one run
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Minimum time between successive network fetches (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 50,
            politeness_delay_ms: 500,
            request_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Optional URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(url) => format!("{}/{} (+{})", self.crawler_name, self.crawler_version, url),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Page cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether fetched pages are read from and written to the cache
    pub enabled: bool,

    /// Directory holding one file per cached page
    pub directory: String,

    /// Entries older than this many seconds are ignored; absent means never
    #[serde(rename = "ttl-secs")]
    pub ttl_secs: Option<u64>,
}

impl CacheConfig {
    /// Maximum entry age, if any
    ///
    /// Fails when `ttl_secs` is too large for a `chrono::Duration`.
    pub fn ttl(&self) -> Result<Option<chrono::Duration>, ConfigError> {
        self.ttl_secs
            .map(|secs| {
                chrono::Duration::from_std(std::time::Duration::from_secs(secs)).map_err(|_| {
                    ConfigError::Validation(format!("ttl-secs {} is out of range", secs))
                })
            })
            .transpose()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: ".cache".to_string(),
            ttl_secs: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON module report
    #[serde(rename = "json-path")]
    pub json_path: String,

    /// Optional path to a markdown summary
    #[serde(rename = "markdown-path")]
    pub markdown_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: "output.json".to_string(),
            markdown_path: None,
        }
    }
}
