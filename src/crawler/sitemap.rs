//! Sitemap resolution
//!
//! Turns a root sitemap location into the flat set of page URLs it reaches:
//! - Fetching sitemap documents, gzip-compressed or not
//! - Telling sitemap indexes from URL sets
//! - Breadth-first expansion of nested indexes
//! - Deduplication of the discovered page URLs
//!
//! Every failure is logged and skips only the document it happened in.

use crate::config::HttpConfig;
use crate::crawler::fetcher::{request_headers, Transport, TransportError};
use crate::{FetchError, ParseError};
use flate2::read::GzDecoder;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::header::{HeaderMap, CONTENT_ENCODING};
use std::collections::{HashSet, VecDeque};
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// What a sitemap document lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<sitemapindex>`: entries are further sitemaps
    Index,

    /// `<urlset>`: entries are page URLs
    UrlSet,
}

impl SitemapKind {
    fn from_root(name: &[u8]) -> Result<Self, ParseError> {
        match name {
            b"sitemapindex" => Ok(SitemapKind::Index),
            b"urlset" => Ok(SitemapKind::UrlSet),
            other => Err(ParseError::UnexpectedRoot(
                String::from_utf8_lossy(other).into_owned(),
            )),
        }
    }

    /// Element whose `<loc>` child is an entry
    fn entry_element(self) -> &'static [u8] {
        match self {
            SitemapKind::Index => b"sitemap",
            SitemapKind::UrlSet => b"url",
        }
    }
}

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapDocument {
    pub kind: SitemapKind,

    /// `<loc>` values in document order, trimmed and unescaped
    pub entries: Vec<String>,
}

/// Parses sitemap XML
///
/// Element names are matched on their local part, so the default sitemap
/// namespace (or any prefix) does not affect the result. Only `<loc>`
/// elements that are direct children of `<sitemap>` (index) or `<url>`
/// (URL set) are collected; everything else is ignored. A document that
/// ends before its root element is closed, or that carries more than one
/// root element, is malformed.
///
/// # Returns
///
/// * `Ok(SitemapDocument)` - The document kind and its entries
/// * `Err(ParseError)` - Empty input, malformed XML, or an unknown root element
pub fn parse_sitemap(content: &[u8]) -> Result<SitemapDocument, ParseError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::Empty);
    }

    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut kind: Option<SitemapKind> = None;
    let mut current_loc: Option<String> = None;
    let mut entries = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.local_name().as_ref().to_vec();
                if kind.is_some() && stack.is_empty() {
                    return Err(trailing_element(&reader, &name));
                }
                match kind {
                    None => kind = Some(SitemapKind::from_root(&name)?),
                    Some(kind) => {
                        let parent = stack.last().map(Vec::as_slice);
                        if name == b"loc" && parent == Some(kind.entry_element()) {
                            current_loc = Some(String::new());
                        }
                    }
                }
                stack.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.local_name();
                if kind.is_none() {
                    kind = Some(SitemapKind::from_root(name.as_ref())?);
                } else if stack.is_empty() {
                    return Err(trailing_element(&reader, name.as_ref()));
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(loc) = current_loc.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| ParseError::Xml(err.to_string()))?;
                    loc.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(ref e)) => {
                stack.pop();
                if e.local_name().as_ref() == b"loc" {
                    if let Some(loc) = current_loc.take() {
                        let loc = loc.trim();
                        if !loc.is_empty() {
                            entries.push(loc.to_string());
                        }
                    }
                }
            }
            Ok(Event::Eof) => {
                if let Some(open) = stack.last() {
                    return Err(ParseError::Xml(format!(
                        "unexpected end of document inside <{}>",
                        String::from_utf8_lossy(open)
                    )));
                }
                break;
            }
            Err(e) => {
                return Err(ParseError::Xml(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    kind.map(|kind| SitemapDocument { kind, entries })
        .ok_or(ParseError::Empty)
}

fn trailing_element<R>(reader: &Reader<R>, name: &[u8]) -> ParseError {
    ParseError::Xml(format!(
        "at position {}: element <{}> after the root element",
        reader.buffer_position(),
        String::from_utf8_lossy(name)
    ))
}

/// Decompresses a sitemap body when it is declared as gzip
///
/// A body is treated as gzip when the location's path ends in `.gz` or the
/// response carries `Content-Encoding: gzip`, and the bytes start with the
/// gzip magic number. Bodies the HTTP client already inflated are returned
/// unchanged.
pub fn decode_body(location: &str, headers: &HeaderMap, body: Vec<u8>) -> Result<Vec<u8>, FetchError> {
    let gz_location = Url::parse(location)
        .map(|url| url.path().ends_with(".gz"))
        .unwrap_or_else(|_| location.ends_with(".gz"));
    let gz_encoding = headers
        .get(CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.trim().eq_ignore_ascii_case("gzip"));

    if !(gz_location || gz_encoding) || !body.starts_with(&GZIP_MAGIC) {
        return Ok(body);
    }

    let mut decoded = Vec::new();
    GzDecoder::new(body.as_slice())
        .read_to_end(&mut decoded)
        .map_err(|source| FetchError::Decompress {
            url: location.to_string(),
            source,
        })?;

    Ok(decoded)
}

/// Resolves sitemap hierarchies into page URLs
pub struct SitemapResolver<T: Transport> {
    transport: Arc<T>,
    http: HttpConfig,
    delay: Duration,
}

impl<T: Transport> SitemapResolver<T> {
    /// Creates a resolver
    ///
    /// # Arguments
    ///
    /// * `transport` - The transport used for every sitemap request
    /// * `http` - Header values sent with each request
    /// * `delay` - Pause after each sitemap that was fetched
    pub fn new(transport: Arc<T>, http: HttpConfig, delay: Duration) -> Self {
        Self {
            transport,
            http,
            delay,
        }
    }

    /// Fetches one sitemap document and returns its decoded bytes
    ///
    /// Any status outside 2xx is a failure.
    pub async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        let transport_error = |e: TransportError| FetchError::Transport {
            url: location.to_string(),
            message: e.to_string(),
        };

        let headers = request_headers(&self.http, None).map_err(transport_error)?;
        let response = self
            .transport
            .get(location, headers)
            .await
            .map_err(transport_error)?;

        if !response.is_success() {
            return Err(FetchError::Status {
                url: location.to_string(),
                status: response.status,
            });
        }

        decode_body(location, &response.headers, response.body)
    }

    /// Resolves `root` into the set of page URLs it reaches
    ///
    /// # Algorithm
    ///
    /// 1. Seed a FIFO queue with `root`
    /// 2. Pop the front location, fetch and parse it
    ///    - Index → append each child sitemap to the back of the queue
    ///    - URL set → collect each page URL
    ///    - Fetch or parse failure → log and move on
    /// 3. Sleep for the politeness delay after every fetched document
    /// 4. Repeat until the queue is empty, then deduplicate
    ///
    /// A sitemap location is queued at most once per call, so indexes that
    /// reference themselves or an ancestor terminate.
    ///
    /// This never fails: an unreachable or malformed root simply yields an
    /// empty set.
    pub async fn resolve(&self, root: &str) -> HashSet<String> {
        let mut queue = VecDeque::from([root.to_string()]);
        let mut enqueued = HashSet::from([root.to_string()]);
        let mut page_urls = Vec::new();

        while let Some(location) = queue.pop_front() {
            tracing::info!("Processing sitemap: {}", location);

            let content = match self.fetch(&location).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::error!("Failed to fetch {}: {}", location, e);
                    continue;
                }
            };

            match parse_sitemap(&content) {
                Ok(SitemapDocument {
                    kind: SitemapKind::Index,
                    entries,
                }) => {
                    tracing::info!("Found sitemap index with {} child sitemaps", entries.len());
                    for child in entries {
                        if enqueued.insert(child.clone()) {
                            queue.push_back(child);
                        } else {
                            tracing::debug!("Sitemap {} already queued, skipping", child);
                        }
                    }
                }
                Ok(SitemapDocument {
                    kind: SitemapKind::UrlSet,
                    entries,
                }) => {
                    tracing::info!("Found {} URLs in sitemap {}", entries.len(), location);
                    page_urls.extend(entries);
                }
                Err(e) => {
                    tracing::error!("Failed to parse sitemap {}: {}", location, e);
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let unique: HashSet<String> = page_urls.into_iter().collect();
        tracing::info!("Found {} unique URLs across all sitemaps", unique.len());
        unique
    }
}
