// src/crawl/engine.rs
// =============================================================================
// The crawl engine: turns a frontier of URLs into an ordered list of pages.
//
// How it works:
// 1. Start with (start URL, depth 0) in the frontier
// 2. Take every entry of the current depth off the front of the frontier
// 3. Drop entries that are visited, too deep or on another host
// 4. Fetch + extract the rest, up to `workers` at a time
// 5. In frontier order: record each page, mark it visited, and (if depth
//    allows) queue its links at depth + 1
// 6. Repeat until the frontier is empty or the crawl is cancelled
//
// A failed or timed-out fetch is logged and skipped. The page is not marked
// visited, so a later discovery of the same URL at a deeper level tries it
// again.
// =============================================================================

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::frontier::{Frontier, FrontierEntry};
use super::scope::{Scope, Skip};
use super::throttle::HostThrottle;
use super::CrawlConfig;
use crate::error::FetchError;
use crate::extract::{discover_links, extract, PageResult};
use crate::fetch::Fetcher;

// What happened to one dispatched frontier entry
enum Visit {
    Extracted {
        entry: FrontierEntry,
        page: PageResult,
        links: Vec<String>,
    },
    Failed,
    Cancelled,
}

/// Runs breadth-first crawls with a given fetcher.
pub struct CrawlEngine<F> {
    fetcher: F,
    config: CrawlConfig,
    scope: Scope,
    throttle: HostThrottle,
}

impl<F: Fetcher> CrawlEngine<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self {
            scope: Scope::new(&config),
            throttle: HostThrottle::new(config.delay),
            fetcher,
            config,
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from the configured start URL.
    ///
    /// Results come back breadth-first: every depth-0 page before every
    /// depth-1 page, and so on, in discovery order within a depth. The order
    /// does not depend on the number of workers.
    ///
    /// Cancelling `cancel` stops the crawl promptly; pages finished before
    /// that point are still returned.
    pub async fn crawl(&self, cancel: &CancellationToken) -> Vec<PageResult> {
        info!(
            start = %self.config.start_url,
            max_depth = self.config.max_depth,
            mode = %self.config.mode,
            workers = self.config.workers,
            "starting crawl"
        );

        let mut frontier = Frontier::seeded(self.config.start_url.as_str());
        let mut results = Vec::new();

        while let Some(level) = frontier.next_level() {
            if cancel.is_cancelled() {
                info!(pending = level.len() + frontier.len(), "crawl cancelled");
                break;
            }

            let batch = self.admit(level, &mut frontier);
            if batch.is_empty() {
                continue;
            }

            let visits: Vec<Visit> = stream::iter(batch)
                .map(|entry| self.visit(entry, cancel))
                .buffered(self.config.workers.max(1))
                .collect()
                .await;

            for visit in visits {
                self.record(visit, &mut frontier, &mut results);
            }
        }

        info!(
            pages = results.len(),
            visited = frontier.visited_len(),
            "crawl complete"
        );
        results
    }

    // Applies the skip guards to one depth level, in frontier order.
    //
    // Repeats of a URL within the level are collapsed here so the same page
    // is never fetched twice at once.
    fn admit(&self, level: Vec<FrontierEntry>, frontier: &mut Frontier) -> Vec<FrontierEntry> {
        let mut claimed = HashSet::new();
        let mut batch = Vec::with_capacity(level.len());

        for entry in level {
            let verdict = if frontier.is_visited(&entry.url) {
                Err(Skip::Visited)
            } else {
                self.scope.check(&entry)
            };

            match verdict {
                Ok(()) => {
                    if claimed.insert(entry.url.clone()) {
                        batch.push(entry);
                    }
                }
                Err(Skip::OffHost) => {
                    debug!(url = %entry.url, "skipping: different host");
                    frontier.mark_visited(entry.url);
                }
                Err(skip) => {
                    debug!(url = %entry.url, depth = entry.depth, ?skip, "skipping");
                }
            }
        }

        batch
    }

    async fn visit(&self, entry: FrontierEntry, cancel: &CancellationToken) -> Visit {
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Visit::Cancelled,
            fetched = self.fetch_bounded(entry.url.clone(), entry.depth) => fetched,
        };

        match fetched {
            Ok(html) => self.process(entry, &html),
            Err(e) => {
                warn!(depth = entry.depth, "skipping page: {}", e);
                Visit::Failed
            }
        }
    }

    async fn fetch_bounded(&self, url: String, depth: usize) -> Result<String, FetchError> {
        self.throttle.wait(&url).await;
        info!(url = %url, depth, "crawling");

        match tokio::time::timeout(self.config.fetch_timeout, self.fetcher.fetch(&url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::timeout(url)),
        }
    }

    fn process(&self, entry: FrontierEntry, html: &str) -> Visit {
        let data = match extract(&entry.url, html, self.config.mode) {
            Ok(data) => data,
            Err(e) => {
                warn!(url = %entry.url, "extraction failed: {}", e);
                return Visit::Failed;
            }
        };

        // Discovery runs on every page that may have children, whatever the
        // extraction mode is.
        let links = if entry.depth < self.config.max_depth {
            discover_links(&entry.url, html).unwrap_or_default()
        } else {
            Vec::new()
        };

        Visit::Extracted {
            page: PageResult::new(entry.url.clone(), data),
            entry,
            links,
        }
    }

    fn record(&self, visit: Visit, frontier: &mut Frontier, results: &mut Vec<PageResult>) {
        let Visit::Extracted { entry, page, links } = visit else {
            return;
        };

        frontier.mark_visited(entry.url.clone());
        results.push(page);

        if entry.depth < self.config.max_depth {
            let queued = frontier.enqueue_discovered(links, entry.depth + 1);
            debug!(url = %entry.url, queued, "links queued");
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why process a whole depth level at a time?
//    - Everything discovered while handling depth d lands at depth d + 1,
//      behind every depth-d entry, so a level is a natural join point
//    - Fetches inside a level can run concurrently; outcomes are applied in
//      frontier order afterwards, which gives the same result list as a
//      one-page-at-a-time crawl
//
// 2. Why buffered() and not buffer_unordered()?
//    - buffered(n) runs up to n futures at once but yields results in the
//      order the futures were created
//    - That order is what makes the output deterministic
//
// 3. Why is the off-host URL marked visited?
//    - It will never be in scope for this crawl, so remembering it keeps
//      later copies out of the frontier entirely
//
// 4. Why biased select?
//    - A cancelled crawl should not start another fetch; checking the
//      cancellation branch first guarantees that
// -----------------------------------------------------------------------------
