//! Scheduler for the URL × language cross product
//!
//! This module handles:
//! - Resolving the sitemap into the list of pages to visit
//! - A fixed pool of workers pulling pages from a shared queue
//! - Visiting every page once per language, languages in configured order
//! - Aggregating the end-of-run summary
//!
//! Concurrency is across pages only. A worker visits all languages of one
//! page sequentially before taking the next page, so two languages of the
//! same page are never requested at the same time.

use crate::config::{Config, Language};
use crate::crawler::fetcher::Transport;
use crate::crawler::sitemap::SitemapResolver;
use crate::crawler::visitor::PageVisitor;
use crate::output::{log_summary, CrawlSummary, OutcomeTally};
use crate::state::VisitTracker;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;

/// Pages waiting for a worker
type PageQueue = Arc<Mutex<VecDeque<String>>>;

/// Runs a complete crawl: resolve, visit, summarize
pub struct CrawlScheduler<T: Transport + 'static> {
    resolver: SitemapResolver<T>,
    visitor: Arc<PageVisitor<T>>,
    tracker: Arc<VisitTracker>,
}

impl<T: Transport + 'static> CrawlScheduler<T> {
    /// Creates a scheduler from its parts
    pub fn new(
        resolver: SitemapResolver<T>,
        visitor: PageVisitor<T>,
        tracker: Arc<VisitTracker>,
    ) -> Self {
        Self {
            resolver,
            visitor: Arc::new(visitor),
            tracker,
        }
    }

    /// Creates a scheduler whose resolver and visitor share `transport`
    pub fn from_config(transport: Arc<T>, config: &Config) -> Self {
        let resolver = SitemapResolver::new(
            Arc::clone(&transport),
            config.http.clone(),
            config.crawler.delay_duration(),
        );
        let visitor = PageVisitor::from_config(transport, &config.http, &config.crawler);

        Self::new(resolver, visitor, Arc::new(VisitTracker::new()))
    }

    /// The tracker recording this scheduler's visits
    pub fn tracker(&self) -> &Arc<VisitTracker> {
        &self.tracker
    }

    /// Runs the crawl
    ///
    /// # Steps
    ///
    /// 1. Resolve `root` into page URLs; with none, log an error and return
    ///    an all-zero summary
    /// 2. Visit every page under every language with `concurrency` workers
    /// 3. Build the summary from the tracker's final counts and log it
    ///
    /// Individual failures never abort the run; the summary always comes back.
    pub async fn run(&self, root: &str, languages: &[Language], concurrency: usize) -> CrawlSummary {
        let started_at = Utc::now();

        let urls = self.resolver.resolve(root).await;
        if urls.is_empty() {
            tracing::error!("No URLs found to crawl");
            return CrawlSummary::from_tracker(
                root,
                &self.tracker,
                languages,
                0,
                OutcomeTally::default(),
                started_at,
            );
        }

        let url_count = urls.len();
        tracing::info!(
            "Starting crawl of {} total requests ({} URLs × {} languages)",
            url_count * languages.len(),
            url_count,
            languages.len()
        );

        let mut urls: Vec<String> = urls.into_iter().collect();
        urls.sort();

        let outcomes = self.visit_all(urls, languages, concurrency).await;

        let summary = CrawlSummary::from_tracker(
            root,
            &self.tracker,
            languages,
            url_count,
            outcomes,
            started_at,
        );
        log_summary(&summary);
        summary
    }

    /// Visits `urls` under every language using a pool of `concurrency` workers
    ///
    /// Pages are handed out in queue order. (page, language) pairs the
    /// tracker has already seen are skipped. A worker that dies takes only
    /// its own outcome counts with it; the tracker keeps every visit it made.
    pub async fn visit_all(
        &self,
        urls: Vec<String>,
        languages: &[Language],
        concurrency: usize,
    ) -> OutcomeTally {
        let worker_count = concurrency.max(1).min(urls.len());
        let queue: PageQueue = Arc::new(Mutex::new(VecDeque::from(urls)));
        let languages: Arc<[Language]> = Arc::from(languages);

        let mut workers = JoinSet::new();
        for id in 0..worker_count {
            let worker = Worker {
                id,
                queue: Arc::clone(&queue),
                visitor: Arc::clone(&self.visitor),
                tracker: Arc::clone(&self.tracker),
                languages: Arc::clone(&languages),
            };
            workers.spawn(worker.run());
        }

        let mut outcomes = OutcomeTally::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(tally) => outcomes.merge(&tally),
                Err(e) => tracing::error!("Worker terminated abnormally: {}", e),
            }
        }

        outcomes
    }
}

/// One member of the worker pool
struct Worker<T: Transport> {
    id: usize,
    queue: PageQueue,
    visitor: Arc<PageVisitor<T>>,
    tracker: Arc<VisitTracker>,
    languages: Arc<[Language]>,
}

impl<T: Transport> Worker<T> {
    async fn run(self) -> OutcomeTally {
        let mut tally = OutcomeTally::default();

        while let Some(url) = self.next_url() {
            self.process_url(&url, &mut tally).await;
        }

        tracing::debug!("Worker {} finished", self.id);
        tally
    }

    fn next_url(&self) -> Option<String> {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }

    /// Visits one page under every language, in order
    async fn process_url(&self, url: &str, tally: &mut OutcomeTally) {
        for language in self.languages.iter() {
            if !self.tracker.try_mark(url, &language.name) {
                tracing::debug!("Already visited {} with {}", url, language.name);
                continue;
            }

            let outcome = self.visitor.visit(url, language).await;
            tally.record(&outcome);
            tracing::info!("Completed processing {} with {}", url, language.name);
        }
    }
}
