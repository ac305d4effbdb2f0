//! Output module for crawl summaries
//!
//! This module handles:
//! - Building the end-of-run summary from the visit tracker
//! - Logging the per-language breakdown
//! - Writing an optional markdown report

mod markdown;
pub mod summary;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use summary::{log_summary, CrawlSummary, LanguageCount, OutcomeTally};
