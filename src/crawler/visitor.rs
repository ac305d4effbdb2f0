//! Page visits
//!
//! One visit is one GET of one page under one language. The outcome is
//! classified, logged and returned; it never aborts the crawl.

use crate::config::{CrawlerConfig, HttpConfig, Language};
use crate::crawler::fetcher::{request_headers, Transport};
use crate::crawler::parser::parse_page_metadata;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Result of visiting a page under one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// HTTP 200
    Success {
        /// Page title, if the page has one
        title: Option<String>,
        /// `<html lang>` of the returned page
        lang: Option<String>,
    },

    /// Any status other than 200
    HttpFailure { status: u16 },

    /// No response at all (DNS, timeout, connection reset, TLS, ...)
    TransportError { cause: String },
}

impl VisitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, VisitOutcome::Success { .. })
    }
}

/// Visits pages with locale-specific request headers
pub struct PageVisitor<T: Transport> {
    transport: Arc<T>,
    http: HttpConfig,
    delay: Duration,
    jitter: f64,
}

impl<T: Transport> PageVisitor<T> {
    /// Creates a visitor
    ///
    /// # Arguments
    ///
    /// * `transport` - The transport used for every page request
    /// * `http` - Fixed header values sent with each request
    /// * `delay` - Base pause after a successful visit
    /// * `jitter` - Upper bound of the random pause added to `delay` (seconds)
    pub fn new(transport: Arc<T>, http: HttpConfig, delay: Duration, jitter: f64) -> Self {
        Self {
            transport,
            http,
            delay,
            jitter,
        }
    }

    /// Builds a visitor from the crawl configuration
    pub fn from_config(transport: Arc<T>, http: &HttpConfig, crawler: &CrawlerConfig) -> Self {
        Self::new(transport, http.clone(), crawler.delay_duration(), crawler.jitter)
    }

    /// Visits `url` with the Accept-Language header of `language`
    ///
    /// # Outcomes
    ///
    /// | Response | Outcome | Log level |
    /// |----------|---------|-----------|
    /// | HTTP 200 | `Success` (title extracted best-effort) | info |
    /// | Other status | `HttpFailure` | warn |
    /// | No response | `TransportError` | error |
    ///
    /// Only a successful visit is followed by the politeness pause of
    /// `delay + uniform(0, jitter)`; failures return immediately.
    pub async fn visit(&self, url: &str, language: &Language) -> VisitOutcome {
        tracing::info!("Visiting {} with language: {}", url, language.name);

        let response = match request_headers(&self.http, Some(&language.accept_language)) {
            Ok(headers) => self.transport.get(url, headers).await,
            Err(e) => Err(e),
        };

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error visiting {} with {}: {}", url, language.name, e);
                return VisitOutcome::TransportError {
                    cause: e.to_string(),
                };
            }
        };

        if response.status != 200 {
            tracing::warn!(
                "Failed to visit {} with {}. Status code: {}",
                url,
                language.name,
                response.status
            );
            return VisitOutcome::HttpFailure {
                status: response.status,
            };
        }

        tracing::info!("Successfully visited {} with {}", url, language.name);

        let metadata = parse_page_metadata(&String::from_utf8_lossy(&response.body));
        tracing::info!(
            "Page title ({}): {}",
            language.name,
            metadata.title.as_deref().unwrap_or("No title")
        );
        if let Some(lang) = &metadata.lang {
            tracing::debug!("Page language for {} ({}): {}", url, language.name, lang);
        }

        self.pause_after_success().await;

        VisitOutcome::Success {
            title: metadata.title,
            lang: metadata.lang,
        }
    }

    async fn pause_after_success(&self) {
        let extra = if self.jitter > 0.0 {
            rand::thread_rng().gen_range(0.0..self.jitter)
        } else {
            0.0
        };

        let pause = self.delay + Duration::try_from_secs_f64(extra).unwrap_or_default();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }
}
