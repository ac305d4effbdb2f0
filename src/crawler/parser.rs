//! HTML metadata extraction
//!
//! Pulls the few facts logged for every successful visit:
//! - Page title (from the first `<title>` tag)
//! - Document language (from `<html lang="...">`)

use scraper::{Html, Selector};

/// Metadata extracted from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// The document language declared on the root element
    pub lang: Option<String>,
}

/// Parses HTML content and extracts page metadata
///
/// Parsing is lenient: malformed markup still yields whatever could be
/// recovered, and missing elements are reported as `None`.
///
/// # Example
///
/// ```no_run
/// use sitemap_lingua::crawler::parse_page_metadata;
///
/// let html = r#"<html lang="fr"><head><title>Accueil</title></head></html>"#;
/// let metadata = parse_page_metadata(html);
/// assert_eq!(metadata.title, Some("Accueil".to_string()));
/// assert_eq!(metadata.lang, Some("fr".to_string()));
/// ```
pub fn parse_page_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    PageMetadata {
        title: extract_title(&document),
        lang: extract_lang(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the `lang` attribute of the root element
fn extract_lang(document: &Html) -> Option<String> {
    let html_selector = Selector::parse("html[lang]").ok()?;

    document
        .select(&html_selector)
        .next()
        .and_then(|element| element.value().attr("lang"))
        .map(|lang| lang.trim().to_string())
        .filter(|s| !s.is_empty())
}
