//! End-to-end crawl tests
//!
//! Every test serves a sitemap hierarchy and its pages from a mock server and
//! runs the whole crawl through the reqwest transport.

use sitemap_lingua::config::{Config, Language};
use sitemap_lingua::crawler::{crawl, CrawlScheduler, ReqwestTransport};
use sitemap_lingua::{ConfigError, CrawlError};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
fn create_test_config(sitemap_url: String, languages: Vec<Language>) -> Config {
    let mut config = Config::new(sitemap_url);
    config.crawler.delay = 0.0;
    config.crawler.jitter = 0.0;
    config.crawler.max_workers = 2;
    config.http.timeout = 5;
    config.languages = languages;
    config
}

fn two_languages() -> Vec<Language> {
    vec![
        Language::new("French", "fr,fr-FR;q=0.9"),
        Language::new("German", "de,de-DE;q=0.9"),
    ]
}

fn urlset(urls: &[String]) -> String {
    let body: String = urls
        .iter()
        .map(|u| format!("<url><loc>{}</loc></url>", u))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        body
    )
}

fn sitemap_index(children: &[String]) -> String {
    let body: String = children
        .iter()
        .map(|u| format!("<sitemap><loc>{}</loc></sitemap>", u))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        body
    )
}

async fn mount_xml(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, at: &str, title: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    "<html><head><title>{}</title></head><body></body></html>",
                    title
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_through_sitemap_index() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        sitemap_index(&[
            format!("{}/sitemap-posts.xml", base_url),
            format!("{}/sitemap-pages.xml", base_url),
        ]),
    )
    .await;
    mount_xml(
        &mock_server,
        "/sitemap-posts.xml",
        urlset(&[format!("{}/post1", base_url), format!("{}/post2", base_url)]),
    )
    .await;
    mount_xml(
        &mock_server,
        "/sitemap-pages.xml",
        urlset(&[format!("{}/about", base_url), format!("{}/contact", base_url)]),
    )
    .await;

    for page in ["/post1", "/post2", "/about", "/contact"] {
        mount_page(&mock_server, page, page).await;
    }

    let config = create_test_config(format!("{}/sitemap.xml", base_url), two_languages());
    let summary = crawl(&config).await.expect("Crawl should succeed");

    assert_eq!(summary.urls_found, 4);
    assert_eq!(summary.count_for("French"), Some(4));
    assert_eq!(summary.count_for("German"), Some(4));
    assert_eq!(summary.total_visits, 8);
    assert_eq!(summary.outcomes.successes, 8);
}

#[tokio::test]
async fn test_each_language_sends_its_header() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[format!("{}/page", base_url)]),
    )
    .await;

    let languages = vec![
        Language::new("French", "fr-FR"),
        Language::new("German", "de-DE"),
    ];

    // Exactly one request per language; verified when the server drops
    for language in &languages {
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("accept-language", language.accept_language.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(format!("{}/sitemap.xml", base_url), languages);
    let summary = crawl(&config).await.expect("Crawl should succeed");

    assert_eq!(summary.total_visits, 2);
    assert_eq!(summary.outcomes.successes, 2);
}

#[tokio::test]
async fn test_missing_page_is_counted_but_not_successful() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[format!("{}/exists", base_url), format!("{}/gone", base_url)]),
    )
    .await;
    mount_page(&mock_server, "/exists", "Here").await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        format!("{}/sitemap.xml", base_url),
        vec![Language::new("Dutch", "nl,nl-NL;q=0.9")],
    );
    let summary = crawl(&config).await.expect("Crawl should succeed");

    assert_eq!(summary.count_for("Dutch"), Some(2));
    assert_eq!(summary.outcomes.successes, 1);
    assert_eq!(summary.outcomes.http_failures, 1);
}

#[tokio::test]
async fn test_unreachable_sitemap_gives_empty_summary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        format!("{}/sitemap.xml", mock_server.uri()),
        two_languages(),
    );
    let summary = crawl(&config).await.expect("Crawl should still return a summary");

    assert_eq!(summary.urls_found, 0);
    assert_eq!(summary.total_visits, 0);
    assert_eq!(summary.count_for("French"), Some(0));
    assert_eq!(summary.count_for("German"), Some(0));
}

#[tokio::test]
async fn test_rerun_with_same_scheduler_skips_visited_pairs() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[format!("{}/once", base_url)]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/once"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/sitemap.xml", base_url), two_languages());
    let transport =
        Arc::new(ReqwestTransport::new(&config.http).expect("Failed to build transport"));
    let scheduler = CrawlScheduler::from_config(transport, &config);

    let root = config.crawler.sitemap_url.clone();
    let first = scheduler.run(&root, &config.languages, 2).await;
    let second = scheduler.run(&root, &config.languages, 2).await;

    assert_eq!(first.total_visits, 2);
    assert_eq!(second.total_visits, 2);
    assert_eq!(second.outcomes.total(), 0);
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let config = create_test_config("ftp://example.com/sitemap.xml".to_string(), two_languages());
    assert!(matches!(
        crawl(&config).await,
        Err(CrawlError::Config(ConfigError::InvalidUrl(_)))
    ));

    let mut config = create_test_config(
        "https://example.com/sitemap.xml".to_string(),
        two_languages(),
    );
    config.crawler.max_workers = 0;
    assert!(matches!(
        crawl(&config).await,
        Err(CrawlError::Config(ConfigError::Validation(_)))
    ));
}
