// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a URL
// - Same-host restriction (doesn't crawl external sites)
// - Configurable depth limit
// - Per-host politeness interval between requests
// - Bounded number of concurrent fetches, deterministic result order
// - Cancellation that keeps the pages collected so far
//
// Submodules:
// - frontier: FIFO queue + visited set
// - scope: depth and host guards
// - throttle: per-host minimum interval
// - engine: the fetch -> extract -> discover -> enqueue loop
// =============================================================================

mod engine;
mod frontier;
mod scope;
mod throttle;

use std::time::Duration;

use url::Url;

use crate::error::Result;
use crate::extract::Mode;

pub use engine::CrawlEngine;
pub use frontier::{Frontier, FrontierEntry};
pub use scope::{parse_page_url, Scope, Skip};
pub use throttle::HostThrottle;

/// Settings for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Where the crawl starts (canonical form)
    pub start_url: Url,

    /// Link hops to follow from the start page (0 = start page only)
    pub max_depth: usize,

    /// What to extract from every page
    pub mode: Mode,

    /// Only follow links whose host equals the start URL's host
    pub same_host_only: bool,

    /// Minimum time between two requests to the same host
    pub delay: Duration,

    /// Upper bound for a single fetch; a timed-out fetch is a failed fetch
    pub fetch_timeout: Duration,

    /// How many fetches may be in flight at once
    pub workers: usize,
}

impl CrawlConfig {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_WORKERS: usize = 1;

    /// A same-host crawl with default politeness, timeout and one worker.
    pub fn new(start_url: &str, max_depth: usize, mode: Mode) -> Result<Self> {
        Ok(Self {
            start_url: parse_page_url(start_url)?,
            max_depth,
            mode,
            same_host_only: true,
            delay: Self::DEFAULT_DELAY,
            fetch_timeout: Self::DEFAULT_FETCH_TIMEOUT,
            workers: Self::DEFAULT_WORKERS,
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}
