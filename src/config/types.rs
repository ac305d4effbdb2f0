use serde::Deserialize;
use std::time::Duration;

/// Browser-like user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/99.0.9999.99 Safari/537.36";

/// Generic Accept header sent with every request
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Log file written alongside standard output
pub const DEFAULT_LOG_FILE: &str = "sitemap_crawler.log";

/// Main configuration structure for Sitemap-Lingua
#[derive(Debug, Clone)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub languages: Vec<Language>,
}

impl Config {
    /// Builds a configuration for `sitemap_url` with all other settings at
    /// their defaults
    pub fn new(sitemap_url: impl Into<String>) -> Self {
        Self {
            crawler: CrawlerConfig {
                sitemap_url: sitemap_url.into(),
                ..CrawlerConfig::default()
            },
            http: HttpConfig::default(),
            languages: default_languages(),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Location of the root sitemap (or sitemap index)
    pub sitemap_url: String,

    /// Politeness delay between requests (seconds)
    pub delay: f64,

    /// Upper bound of the random extra pause after a successful visit (seconds)
    pub jitter: f64,

    /// Number of concurrent workers
    pub max_workers: usize,
}

impl CrawlerConfig {
    /// The politeness delay as a `Duration` (zero if the value is unusable)
    pub fn delay_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay).unwrap_or_default()
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            sitemap_url: String::new(),
            delay: 1.0,
            jitter: 1.0,
            max_workers: 5,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout (seconds)
    pub timeout: u64,

    /// User-Agent header value
    pub user_agent: String,

    /// Accept header value
    pub accept: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

/// A locale to request every page in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Language {
    /// Display name used in logs and summaries
    pub name: String,

    /// Value sent as the Accept-Language header
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Language {
    pub fn new(name: impl Into<String>, accept_language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accept_language: accept_language.into(),
        }
    }
}

/// On-disk layout of a languages file
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageFile {
    #[serde(rename = "language", default)]
    pub languages: Vec<Language>,
}

/// The built-in language list, in visiting order
pub fn default_languages() -> Vec<Language> {
    vec![
        Language::new("French", "fr,fr-FR;q=0.9"),
        Language::new("German", "de,de-DE;q=0.9"),
        Language::new("Dutch", "nl,nl-NL;q=0.9"),
        Language::new("Polish", "pl,pl-PL;q=0.9"),
        Language::new("Swedish", "sv,sv-SE;q=0.9"),
        Language::new("Finnish", "fi,fi-FI;q=0.9"),
    ]
}
