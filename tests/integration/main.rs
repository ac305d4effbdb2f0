//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the real
//! reqwest transport end-to-end.

mod crawl_tests;
mod sitemap_tests;
