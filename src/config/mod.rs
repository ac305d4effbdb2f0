//! Configuration module for Sitemap-Lingua
//!
//! Settings come from the command line. The language list defaults to a
//! built-in set and can be replaced by a TOML file.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_lingua::config::{load_languages, Config};
//! use std::path::Path;
//!
//! let mut config = Config::new("https://example.com/sitemap.xml");
//! config.languages = load_languages(Path::new("languages.toml")).unwrap();
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_languages, Config, CrawlerConfig, HttpConfig, Language, LanguageFile,
    DEFAULT_ACCEPT, DEFAULT_LOG_FILE, DEFAULT_USER_AGENT,
};

pub use parser::{load_languages, parse_languages};
pub use validation::validate;
