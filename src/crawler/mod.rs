//! Crawler module for sitemap resolution and page visits
//!
//! This module contains the core crawling logic, including:
//! - The HTTP transport and request headers
//! - Sitemap fetching, decompression and parsing
//! - Language-tagged page visits
//! - The worker pool that crosses pages with languages

mod fetcher;
mod parser;
mod scheduler;
mod sitemap;
mod visitor;

#[cfg(test)]
pub(crate) mod testing;

pub use fetcher::{
    build_http_client, request_headers, HttpResponse, ReqwestTransport, Transport,
    TransportError,
};
pub use parser::{parse_page_metadata, PageMetadata};
pub use scheduler::CrawlScheduler;
pub use sitemap::{decode_body, parse_sitemap, SitemapDocument, SitemapKind, SitemapResolver};
pub use visitor::{PageVisitor, VisitOutcome};

use crate::config::{validate, Config};
use crate::output::CrawlSummary;
use crate::Result;
use std::sync::Arc;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client
/// 3. Resolve the sitemap hierarchy into page URLs
/// 4. Visit every page once per configured language
/// 5. Return the per-language summary
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl ran to completion (individual visits may have failed)
/// * `Err(CrawlError)` - The configuration is invalid or the HTTP client could not be built
///
/// # Example
///
/// ```no_run
/// use sitemap_lingua::config::Config;
/// use sitemap_lingua::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::new("https://example.com/sitemap.xml");
/// let summary = crawl(&config).await?;
/// println!("{} visits", summary.total_visits);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlSummary> {
    validate(config)?;

    let transport = Arc::new(ReqwestTransport::new(&config.http)?);
    let scheduler = CrawlScheduler::from_config(transport, config);

    Ok(scheduler
        .run(
            &config.crawler.sitemap_url,
            &config.languages,
            config.crawler.max_workers,
        )
        .await)
}
