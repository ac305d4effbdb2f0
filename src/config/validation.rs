use crate::config::types::{Config, CrawlerConfig, HttpConfig, Language};
use crate::ConfigError;
use reqwest::header::HeaderValue;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_languages(&config.languages)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_sitemap_url(&config.sitemap_url)?;

    if !config.delay.is_finite() || config.delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay must be a non-negative number of seconds, got {}",
            config.delay
        )));
    }

    if !config.jitter.is_finite() || config.jitter < 0.0 {
        return Err(ConfigError::Validation(format!(
            "jitter must be a non-negative number of seconds, got {}",
            config.jitter
        )));
    }

    if config.max_workers < 1 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be >= 1, got {}",
            config.max_workers
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1s, got {}s",
            config.timeout
        )));
    }

    if HeaderValue::from_str(&config.user_agent).is_err() {
        return Err(ConfigError::Validation(
            "user_agent is not a valid header value".to_string(),
        ));
    }

    if HeaderValue::from_str(&config.accept).is_err() {
        return Err(ConfigError::Validation(
            "accept is not a valid header value".to_string(),
        ));
    }

    Ok(())
}

/// Validates the root sitemap location
fn validate_sitemap_url(sitemap_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(sitemap_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", sitemap_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' must use the http or https scheme",
            sitemap_url
        )));
    }

    Ok(())
}

/// Validates a language list
pub(crate) fn validate_languages(languages: &[Language]) -> Result<(), ConfigError> {
    if languages.is_empty() {
        return Err(ConfigError::Validation(
            "at least one language must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for language in languages {
        if language.name.trim().is_empty() {
            return Err(ConfigError::InvalidLanguage(
                "language name cannot be empty".to_string(),
            ));
        }

        if !seen.insert(language.name.as_str()) {
            return Err(ConfigError::InvalidLanguage(format!(
                "language '{}' is listed more than once",
                language.name
            )));
        }

        if language.accept_language.trim().is_empty()
            || HeaderValue::from_str(&language.accept_language).is_err()
        {
            return Err(ConfigError::InvalidLanguage(format!(
                "language '{}' has an invalid Accept-Language value '{}'",
                language.name, language.accept_language
            )));
        }
    }

    Ok(())
}
