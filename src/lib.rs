//! Sitemap-Lingua: a multilingual sitemap visitor
//!
//! This crate resolves a website's sitemap hierarchy into a flat set of page
//! URLs and visits every page once per configured language, sending a
//! locale-specific `Accept-Language` header on each request.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Sitemap-Lingua operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read languages file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid sitemap URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid language entry: {0}")]
    InvalidLanguage(String),
}

/// Failures while retrieving a sitemap document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request for {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decompress {url}: {source}")]
    Decompress {
        url: String,
        source: std::io::Error,
    },
}

/// Failures while interpreting a sitemap document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Sitemap document is empty")]
    Empty,

    #[error("Malformed XML: {0}")]
    Xml(String),

    #[error("Unexpected root element <{0}>")]
    UnexpectedRoot(String),
}

/// Result type alias for Sitemap-Lingua operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, Language};
pub use crawler::{CrawlScheduler, PageVisitor, SitemapResolver, VisitOutcome};
pub use output::CrawlSummary;
pub use state::VisitTracker;
