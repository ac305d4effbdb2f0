//! Markdown summary generation
//!
//! This module writes a human-readable markdown report of a finished run:
//! run metadata, per-language visit counts and outcome totals.

use crate::output::summary::CrawlSummary;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary file
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(std::io::Error)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Sitemap-Lingua Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Sitemap**: {}\n", summary.sitemap_url));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n\n",
        summary.duration_seconds()
    ));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **URLs Found**: {}\n", summary.urls_found));
    md.push_str(&format!(
        "- **URL-Language Visits**: {}\n",
        summary.total_visits
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        summary.success_rate()
    ));

    // Language breakdown
    md.push_str("## Visits by Language\n\n");
    md.push_str("| Language | URLs |\n");
    md.push_str("|----------|------|\n");
    for count in &summary.per_language {
        md.push_str(&format!("| {} | {} |\n", count.language, count.visited));
    }
    md.push_str(&format!("| **Total** | {} |\n\n", summary.total_visits));

    // Outcome breakdown
    md.push_str("## Outcomes\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Success | {} |\n", summary.outcomes.successes));
    md.push_str(&format!(
        "| HTTP Failure | {} |\n",
        summary.outcomes.http_failures
    ));
    md.push_str(&format!(
        "| Transport Error | {} |\n",
        summary.outcomes.transport_errors
    ));

    md
}
