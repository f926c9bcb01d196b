// src/crawl/frontier.rs
// =============================================================================
// Frontier and visited-set bookkeeping for a breadth-first crawl.
//
// - The frontier is a strict FIFO (VecDeque): discoveries go to the back,
//   work comes off the front, so pages are handled depth by depth.
// - The visited set holds every URL that was processed or ruled out of
//   scope. A URL is inserted at most once.
// - Discovered links are only checked against the visited set. The same URL
//   can sit in the frontier several times; the copies are dropped when they
//   reach the front.
//
// Only the crawl engine touches this state, from a single task, so no
// locking is needed.
// =============================================================================

use std::collections::{HashSet, VecDeque};

/// A page waiting to be crawled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    /// Link hops from the start URL (the start URL is depth 0)
    pub depth: usize,
}

impl FrontierEntry {
    pub fn new(url: impl Into<String>, depth: usize) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
}

impl Frontier {
    /// A frontier holding only the start URL at depth 0.
    pub fn seeded(start_url: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.queue.push_back(FrontierEntry::new(start_url, 0));
        frontier
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns false if the URL was already visited.
    pub fn mark_visited(&mut self, url: impl Into<String>) -> bool {
        self.visited.insert(url.into())
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queues every link that has not been visited yet, at `depth`.
    ///
    /// Returns how many entries were added.
    pub fn enqueue_discovered<I>(&mut self, links: I, depth: usize) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.queue.len();
        for link in links {
            if !self.visited.contains(&link) {
                self.queue.push_back(FrontierEntry::new(link, depth));
            }
        }
        self.queue.len() - before
    }

    /// Pops the front entry and every following entry at the same depth.
    ///
    /// Returns None once the frontier is exhausted.
    pub fn next_level(&mut self) -> Option<Vec<FrontierEntry>> {
        let depth = self.queue.front()?.depth;

        let mut level = Vec::new();
        while let Some(entry) = self.queue.pop_front() {
            if entry.depth != depth {
                self.queue.push_front(entry);
                break;
            }
            level.push(entry);
        }

        Some(level)
    }
}
