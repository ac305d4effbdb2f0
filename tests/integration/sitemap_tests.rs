//! Sitemap resolution against a live mock server

use flate2::write::GzEncoder;
use flate2::Compression;
use sitemap_lingua::config::HttpConfig;
use sitemap_lingua::crawler::{ReqwestTransport, SitemapResolver};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver() -> SitemapResolver<ReqwestTransport> {
    let http = HttpConfig::default();
    let transport = ReqwestTransport::new(&http).expect("Failed to build transport");
    SitemapResolver::new(Arc::new(transport), http, Duration::ZERO)
}

fn urlset(urls: &[String]) -> String {
    let body: String = urls
        .iter()
        .map(|u| format!("<url><loc>{}</loc></url>", u))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        body
    )
}

fn gzip(content: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn test_gz_location_matches_plain_sitemap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let xml = urlset(&[format!("{}/a", base_url), format!("{}/b", base_url)]);

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(xml.clone())
                .insert_header("content-type", "application/xml"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml.gz"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(gzip(&xml))
                .insert_header("content-type", "application/x-gzip"),
        )
        .mount(&mock_server)
        .await;

    let resolver = resolver();
    let plain = resolver.resolve(&format!("{}/sitemap.xml", base_url)).await;
    let packed = resolver.resolve(&format!("{}/sitemap.xml.gz", base_url)).await;

    assert_eq!(plain.len(), 2);
    assert_eq!(plain, packed);
}

#[tokio::test]
async fn test_gzip_content_encoding() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let xml = urlset(&[format!("{}/only", base_url)]);

    Mock::given(method("GET"))
        .and(path("/sitemap"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(gzip(&xml))
                .insert_header("content-encoding", "gzip")
                .insert_header("content-type", "application/xml"),
        )
        .mount(&mock_server)
        .await;

    let urls = resolver().resolve(&format!("{}/sitemap", base_url)).await;
    assert_eq!(urls.len(), 1);
    assert!(urls.contains(&format!("{}/only", base_url)));
}

#[tokio::test]
async fn test_redirected_sitemap_is_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old-sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/sitemap.xml", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(urlset(&[format!("{}/moved", base_url)])),
        )
        .mount(&mock_server)
        .await;

    let urls = resolver()
        .resolve(&format!("{}/old-sitemap.xml", base_url))
        .await;
    assert_eq!(urls.len(), 1);
}

#[tokio::test]
async fn test_server_error_root_yields_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(503).set_body_string(urlset(&[
            "https://example.com/never".to_string(),
        ])))
        .mount(&mock_server)
        .await;

    let urls = resolver()
        .resolve(&format!("{}/sitemap.xml", mock_server.uri()))
        .await;
    assert!(urls.is_empty());
}
