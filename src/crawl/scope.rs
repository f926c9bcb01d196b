// src/crawl/scope.rs
// =============================================================================
// Which frontier entries a crawl is allowed to fetch.
//
// An entry is out of scope when:
// - it is deeper than the configured max depth, or
// - its host is not exactly the start URL's host (same-host restriction).
//   "docs.example.com" does NOT match "example.com".
// =============================================================================

use url::Url;

use super::frontier::FrontierEntry;
use super::CrawlConfig;
use crate::error::{Error, Result};

/// Why an entry was dropped without being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Visited,
    TooDeep,
    OffHost,
}

#[derive(Debug, Clone)]
pub struct Scope {
    /// None when the crawl may leave the start host
    host: Option<String>,
    max_depth: usize,
}

impl Scope {
    pub fn new(config: &CrawlConfig) -> Self {
        let host = config
            .same_host_only
            .then(|| config.start_url.host_str().unwrap_or_default().to_string());

        Self {
            host,
            max_depth: config.max_depth,
        }
    }

    /// Depth and host guards. Visited-set membership is the frontier's job.
    pub fn check(&self, entry: &FrontierEntry) -> std::result::Result<(), Skip> {
        if entry.depth > self.max_depth {
            return Err(Skip::TooDeep);
        }

        if let Some(host) = &self.host {
            let same_host = Url::parse(&entry.url)
                .ok()
                .is_some_and(|url| url.host_str() == Some(host.as_str()));
            if !same_host {
                return Err(Skip::OffHost);
            }
        }

        Ok(())
    }
}

/// Parses a user-supplied page URL and checks that it names a host.
///
/// The parsed form is canonical, so "http://site.test" becomes
/// "http://site.test/".
pub fn parse_page_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::InvalidUrl {
            url: raw.to_string(),
            reason: "URL has no host".to_string(),
        });
    }

    Ok(url)
}
