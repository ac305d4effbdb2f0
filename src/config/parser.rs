use crate::config::types::{Language, LanguageFile};
use crate::config::validation::validate_languages;
use crate::ConfigResult;
use std::path::Path;

/// Loads a language list from a TOML file
///
/// # File Format
///
/// ```toml
/// [[language]]
/// name = "French"
/// accept-language = "fr,fr-FR;q=0.9"
/// ```
///
/// Entries keep the order they appear in the file; that order is the order
/// in which every page is visited.
///
/// # Returns
///
/// * `Ok(Vec<Language>)` - Successfully loaded and validated languages
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
pub fn load_languages(path: &Path) -> ConfigResult<Vec<Language>> {
    let content = std::fs::read_to_string(path)?;
    parse_languages(&content)
}

/// Parses and validates a language list from TOML text
pub fn parse_languages(content: &str) -> ConfigResult<Vec<Language>> {
    let file: LanguageFile = toml::from_str(content)?;
    validate_languages(&file.languages)?;
    Ok(file.languages)
}
