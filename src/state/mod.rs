//! State module for tracking crawl progress
//!
//! `VisitTracker` records which pages have been visited under which language.

mod visit_tracker;

pub use visit_tracker::VisitTracker;
