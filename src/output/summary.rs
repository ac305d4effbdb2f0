//! Crawl summary
//!
//! Built once at the end of a run from the visit tracker's final counts and
//! the outcomes reported by the workers.

use crate::config::Language;
use crate::crawler::VisitOutcome;
use crate::state::VisitTracker;
use chrono::{DateTime, Utc};

/// Number of distinct URLs visited under one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCount {
    pub language: String,
    pub visited: usize,
}

/// Outcome counts accumulated by workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub successes: usize,
    pub http_failures: usize,
    pub transport_errors: usize,
}

impl OutcomeTally {
    /// Counts one visit outcome
    pub fn record(&mut self, outcome: &VisitOutcome) {
        match outcome {
            VisitOutcome::Success { .. } => self.successes += 1,
            VisitOutcome::HttpFailure { .. } => self.http_failures += 1,
            VisitOutcome::TransportError { .. } => self.transport_errors += 1,
        }
    }

    /// Adds another tally into this one
    pub fn merge(&mut self, other: &OutcomeTally) {
        self.successes += other.successes;
        self.http_failures += other.http_failures;
        self.transport_errors += other.transport_errors;
    }

    /// Total number of visits counted
    pub fn total(&self) -> usize {
        self.successes + self.http_failures + self.transport_errors
    }
}

/// Summary statistics for a crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    // Run metadata
    pub sitemap_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Distinct page URLs the sitemap resolved to
    pub urls_found: usize,

    /// Per-language visit counts, in configured language order
    pub per_language: Vec<LanguageCount>,

    /// Sum of `per_language`
    pub total_visits: usize,

    /// How the visits went
    pub outcomes: OutcomeTally,
}

impl CrawlSummary {
    /// Builds a summary from the tracker's final state
    ///
    /// Languages the tracker never saw are reported with a count of zero.
    pub fn from_tracker(
        sitemap_url: &str,
        tracker: &VisitTracker,
        languages: &[Language],
        urls_found: usize,
        outcomes: OutcomeTally,
        started_at: DateTime<Utc>,
    ) -> Self {
        let per_language: Vec<LanguageCount> = languages
            .iter()
            .map(|language| LanguageCount {
                language: language.name.clone(),
                visited: tracker.count(&language.name),
            })
            .collect();
        let total_visits = per_language.iter().map(|c| c.visited).sum();

        Self {
            sitemap_url: sitemap_url.to_string(),
            started_at,
            finished_at: Utc::now(),
            urls_found,
            per_language,
            total_visits,
            outcomes,
        }
    }

    /// Visit count for a language, if it was configured
    pub fn count_for(&self, language: &str) -> Option<usize> {
        self.per_language
            .iter()
            .find(|c| c.language == language)
            .map(|c| c.visited)
    }

    /// Calculates the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.outcomes.total();
        if attempted == 0 {
            0.0
        } else {
            (self.outcomes.successes as f64 / attempted as f64) * 100.0
        }
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Writes the per-language breakdown to the log
pub fn log_summary(summary: &CrawlSummary) {
    tracing::info!("Crawl completed. Summary by language:");
    for count in &summary.per_language {
        tracing::info!("  - {}: {} URLs", count.language, count.visited);
    }
    tracing::info!(
        "Total: {} URL-language combinations processed",
        summary.total_visits
    );
    tracing::info!(
        "Outcomes: {} succeeded, {} HTTP failures, {} transport errors ({:.1}% success)",
        summary.outcomes.successes,
        summary.outcomes.http_failures,
        summary.outcomes.transport_errors,
        summary.success_rate()
    );
}
