//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from seed URLs to the module report.

use doc_module_extractor::config::{CacheConfig, Config, CrawlerConfig, UserAgentConfig};
use doc_module_extractor::crawler::run_crawl;
use doc_module_extractor::inference::ModuleInference;
use doc_module_extractor::output::{build_report, write_json_report, ModuleReport};
use doc_module_extractor::summary::HeuristicSummarizer;
use doc_module_extractor::ExtractorError;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from `seed` with a cache in `cache_dir`
fn create_test_config(seed: String, cache_dir: &Path) -> Config {
    Config {
        seeds: vec![seed],
        crawler: CrawlerConfig {
            max_depth: 2,
            max_pages: 50,
            politeness_delay_ms: 10, // Very short for testing
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
        },
        cache: CacheConfig {
            enabled: true,
            directory: cache_dir.to_string_lossy().into_owned(),
            ttl_secs: None,
        },
        ..Config::default()
    }
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>\
             <nav><a href=\"/docs/\">Home</a></nav><main>{}</main></body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(title, body))
        .mount(server)
        .await;
}

/// Mounts a small documentation site:
///
/// ```text
/// /docs/ -> intro, api/users, api/orders
/// ```
async fn mount_docs_site(server: &MockServer) {
    mount_page(
        server,
        "/docs/",
        "Documentation",
        r#"<h1>Welcome</h1><p>Start here.</p>
           <a href="intro">Intro</a>
           <a href="api/users">Users</a>
           <a href="/docs/api/orders#list">Orders</a>
           <a href="http://other.invalid/docs/">Elsewhere</a>
           <a href="style.css">Styles</a>"#,
    )
    .await;
    mount_page(
        server,
        "/docs/intro",
        "Intro",
        "<h1>Introduction</h1><p>This tool does things. It is fast.</p>",
    )
    .await;
    mount_page(
        server,
        "/docs/api/users",
        "Users API",
        "<h1>Users</h1><p>Create and delete users.</p>",
    )
    .await;
    mount_page(
        server,
        "/docs/api/orders",
        "Orders API",
        "<h2>Orders</h2><p>List orders.</p>",
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_builds_module_report() {
    let mock_server = MockServer::start().await;
    mount_docs_site(&mock_server).await;

    let cache_dir = TempDir::new().unwrap();
    let seed = format!("{}/docs/", mock_server.uri());
    let config = create_test_config(seed.clone(), cache_dir.path());

    let outcome = run_crawl(&config, CancellationToken::new()).await.unwrap();

    let urls: Vec<String> = outcome.pages.iter().map(|p| p.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/docs/", mock_server.uri()),
            format!("{}/docs/intro", mock_server.uri()),
            format!("{}/docs/api/users", mock_server.uri()),
            format!("{}/docs/api/orders", mock_server.uri()),
        ]
    );
    assert_eq!(outcome.stats.pages_fetched, 4);
    assert_eq!(outcome.stats.fetch_failures, 0);
    assert_eq!(outcome.stats.links_enqueued, 3);
    assert_eq!(outcome.stats.skipped_out_of_scope, 2);

    // Navigation is stripped from the extracted content
    let intro = &outcome.pages[1];
    assert_eq!(intro.title, "Intro");
    assert!(intro
        .content_blocks
        .iter()
        .all(|block| !block.text.contains("Home")));

    let tree = ModuleInference::new(&config.seeds).infer_structure(&outcome.pages);
    let report = build_report(&tree, &HeuristicSummarizer::new());

    let modules: Vec<&str> = report.iter().map(|m| m.module.as_str()).collect();
    assert_eq!(modules, vec!["General", "Intro", "Api"]);

    let api = &report[2];
    assert_eq!(api.description, "Container module.");
    assert_eq!(api.submodules["Users"], "Create and delete users.");
    assert_eq!(api.submodules["Orders"], "List orders.");
    assert_eq!(report[1].description, "This tool does things.  It is fast.");

    let output_dir = TempDir::new().unwrap();
    let output_path = output_dir.path().join("output.json");
    write_json_report(&report, &output_path).unwrap();

    let written: Vec<ModuleReport> =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(written, report);
}

#[tokio::test]
async fn test_crawl_respects_max_pages() {
    let mock_server = MockServer::start().await;
    mount_docs_site(&mock_server).await;

    let cache_dir = TempDir::new().unwrap();
    let mut config = create_test_config(format!("{}/docs/", mock_server.uri()), cache_dir.path());
    config.crawler.max_pages = 2;

    let outcome = run_crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(outcome.pages.len(), 2);
    assert_eq!(outcome.stats.pages_fetched, 2);
}

#[tokio::test]
async fn test_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;

    // Chain: /docs/ -> /docs/a -> /docs/b
    mount_page(&mock_server, "/docs/", "Root", r#"<a href="a">A</a>"#).await;
    mount_page(&mock_server, "/docs/a", "A", r#"<a href="b">B</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/docs/b"))
        .respond_with(html_page("B", ""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let mut config = create_test_config(format!("{}/docs/", mock_server.uri()), cache_dir.path());
    config.crawler.max_depth = 1;

    let outcome = run_crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(outcome.pages.len(), 2);
    assert_eq!(outcome.stats.links_enqueued, 1);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_cached_rerun_makes_no_requests() {
    let mock_server = MockServer::start().await;
    mount_docs_site(&mock_server).await;

    let cache_dir = TempDir::new().unwrap();
    let config = create_test_config(format!("{}/docs/", mock_server.uri()), cache_dir.path());

    let first = run_crawl(&config, CancellationToken::new()).await.unwrap();
    assert_eq!(first.stats.pages_fetched, 4);

    // Any request from now on is a failure
    mock_server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let second = run_crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(second.pages, first.pages);
    assert_eq!(second.stats.pages_fetched, 0);
    assert_eq!(second.stats.cache_hits, 4);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_disabled_cache_fetches_again() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/"))
        .respond_with(html_page("Root", "<p>Only page.</p>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let mut config = create_test_config(format!("{}/docs/", mock_server.uri()), cache_dir.path());
    config.cache.enabled = false;

    run_crawl(&config, CancellationToken::new()).await.unwrap();
    run_crawl(&config, CancellationToken::new()).await.unwrap();

    mock_server.verify().await;
    assert_eq!(std::fs::read_dir(cache_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_failed_fetch_is_not_retried() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs/",
        "Root",
        r#"<a href="broken">Broken</a><a href="ok">Ok</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/docs/ok",
        "Ok",
        r#"<a href="/docs/broken?retry=1">Broken again</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/docs/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let config = create_test_config(format!("{}/docs/", mock_server.uri()), cache_dir.path());

    let outcome = run_crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(outcome.pages.len(), 2);
    assert_eq!(outcome.stats.fetch_failures, 1);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_foreign_domains_never_fetched() {
    let mock_server = MockServer::start().await;
    let foreign_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page("Foreign", ""))
        .expect(0)
        .mount(&foreign_server)
        .await;

    mount_page(
        &mock_server,
        "/docs/",
        "Root",
        &format!(r#"<a href="{}/docs/page">Foreign</a>"#, foreign_server.uri()),
    )
    .await;

    let cache_dir = TempDir::new().unwrap();
    let config = create_test_config(format!("{}/docs/", mock_server.uri()), cache_dir.path());

    let outcome = run_crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(outcome.pages.len(), 1);
    assert_eq!(outcome.stats.links_enqueued, 0);
    assert_eq!(outcome.stats.skipped_out_of_scope, 1);
    foreign_server.verify().await;
}

#[tokio::test]
async fn test_navigation_links_not_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    "<html><head><title>Root</title></head><body>\
                     <nav><a href=\"/docs/menu-only\">Menu</a></nav>\
                     <main><a href=\"shown\">Shown</a></main>\
                     <footer><a href=\"/docs/legal\">Legal</a></footer></body></html>",
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/docs/shown", "Shown", "<p>Body text.</p>").await;
    for hidden in ["/docs/menu-only", "/docs/legal"] {
        Mock::given(method("GET"))
            .and(path(hidden))
            .respond_with(html_page("Hidden", ""))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let cache_dir = TempDir::new().unwrap();
    let config = create_test_config(format!("{}/docs/", mock_server.uri()), cache_dir.path());

    let outcome = run_crawl(&config, CancellationToken::new()).await.unwrap();

    let urls: Vec<String> = outcome.pages.iter().map(|p| p.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/docs/", mock_server.uri()),
            format!("{}/docs/shown", mock_server.uri()),
        ]
    );
    mock_server.verify().await;
}

#[tokio::test]
async fn test_politeness_delay_spaces_fetches() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/docs/", "Root", r#"<a href="a">A</a><a href="b">B</a>"#).await;
    mount_page(&mock_server, "/docs/a", "A", "").await;
    mount_page(&mock_server, "/docs/b", "B", "").await;

    let cache_dir = TempDir::new().unwrap();
    let mut config = create_test_config(format!("{}/docs/", mock_server.uri()), cache_dir.path());
    config.crawler.politeness_delay_ms = 200;

    let start = Instant::now();
    let outcome = run_crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(outcome.pages.len(), 3);
    assert!(start.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_cancelled_crawl_returns_early() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_page("Root", ""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let config = create_test_config(format!("{}/docs/", mock_server.uri()), cache_dir.path());

    let cancel = CancellationToken::new();
    cancel.cancel();
    let outcome = run_crawl(&config, cancel).await.unwrap();

    assert!(outcome.pages.is_empty());
    assert!(outcome.stats.cancelled);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_crawl_without_seeds_fails() {
    let cache_dir = TempDir::new().unwrap();
    let mut config = create_test_config(String::new(), cache_dir.path());
    config.seeds.clear();

    let result = run_crawl(&config, CancellationToken::new()).await;
    assert!(matches!(result, Err(ExtractorError::NoSeeds)));
}
