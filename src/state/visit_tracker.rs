//! Per-language record of visited pages
//!
//! Workers share one `VisitTracker` through an `Arc`. Every method takes the
//! same lock, so a check-and-mark through [`VisitTracker::try_mark`] cannot
//! interleave with another worker's.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// Tracks which URLs have been visited under which language
#[derive(Debug, Default)]
pub struct VisitTracker {
    /// language name -> visited URLs
    visited: Mutex<HashMap<String, HashSet<String>>>,
}

impl VisitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, HashSet<String>>> {
        // A worker that panicked mid-insert leaves the map consistent
        self.visited.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns true if `url` has not been visited under `language` yet
    pub fn should_visit(&self, url: &str, language: &str) -> bool {
        self.lock()
            .get(language)
            .map_or(true, |urls| !urls.contains(url))
    }

    /// Records `url` as visited under `language`
    pub fn mark_visited(&self, url: &str, language: &str) {
        self.lock()
            .entry(language.to_string())
            .or_default()
            .insert(url.to_string());
    }

    /// Atomically checks and records a visit
    ///
    /// Returns true exactly once per (url, language) pair: the caller that
    /// gets `true` owns the visit, every later caller gets `false`.
    pub fn try_mark(&self, url: &str, language: &str) -> bool {
        self.lock()
            .entry(language.to_string())
            .or_default()
            .insert(url.to_string())
    }

    /// Number of distinct URLs visited under `language`
    pub fn count(&self, language: &str) -> usize {
        self.lock().get(language).map_or(0, HashSet::len)
    }

    /// Visit counts for every language seen so far
    pub fn counts(&self) -> HashMap<String, usize> {
        self.lock()
            .iter()
            .map(|(language, urls)| (language.clone(), urls.len()))
            .collect()
    }

    /// Total number of (url, language) pairs recorded
    pub fn total(&self) -> usize {
        self.lock().values().map(HashSet::len).sum()
    }
}
