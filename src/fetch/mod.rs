// src/fetch/mod.rs
// =============================================================================
// This module gets raw HTML for a URL.
//
// Submodules:
// - http: plain HTTP GET with reqwest (default)
// - browser: headless Chromium that runs page scripts first
//   (only compiled with `--features browser`)
//
// Both implement the Fetcher trait, which is the only thing the crawl engine
// knows about. Tests plug in an in-memory fetcher through the same trait.
// =============================================================================

mod http;

#[cfg(feature = "browser")]
mod browser;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::HttpFetcher;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;

/// Retrieves the HTML of a page.
///
/// Implementations own whatever session they need (HTTP connection pool,
/// browser process) and must release it on every exit path.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}
