// src/scrape.rs
// =============================================================================
// Single-page extraction: fetch one URL, extract one result.
//
// Unlike a crawl, nothing is skipped here: a fetch failure or timeout is
// returned to the caller as an error.
// =============================================================================

use std::time::Duration;

use tracing::info;

use crate::crawl::parse_page_url;
use crate::error::{FetchError, Result};
use crate::extract::{extract, Mode, PageResult};
use crate::fetch::Fetcher;

/// Fetches `url` (bounded by `timeout`) and extracts `mode` data from it.
pub async fn scrape<F>(fetcher: &F, url: &str, mode: Mode, timeout: Duration) -> Result<PageResult>
where
    F: Fetcher + ?Sized,
{
    let url = parse_page_url(url)?;
    let url = url.as_str();
    info!(url, %mode, "scraping");

    let html = tokio::time::timeout(timeout, fetcher.fetch(url))
        .await
        .map_err(|_| FetchError::timeout(url))??;

    let data = extract(url, &html, mode)?;
    Ok(PageResult::new(url, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, FetchErrorKind};
    use crate::extract::ExtractedData;
    use async_trait::async_trait;

    struct OnePage(&'static str);

    #[async_trait]
    impl Fetcher for OnePage {
        async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
            if url == "http://site.test/a/" {
                Ok(self.0.to_string())
            } else {
                Err(FetchError::new(url, FetchErrorKind::Connect))
            }
        }
    }

    struct Hangs;

    #[async_trait]
    impl Fetcher for Hangs {
        async fn fetch(&self, _url: &str) -> std::result::Result<String, FetchError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_scrape_links() {
        let fetcher = OnePage(r#"<a href="/b">x</a><a href="c">y</a>"#);
        let page = scrape(&fetcher, "http://site.test/a/", Mode::Links, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(page.url, "http://site.test/a/");
        assert_eq!(
            page.data,
            ExtractedData::Links(vec![
                "http://site.test/b".to_string(),
                "http://site.test/a/c".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_returned() {
        let fetcher = OnePage("");
        let err = scrape(&fetcher, "http://site.test/missing", Mode::Text, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(ref e) if e.kind == FetchErrorKind::Connect));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_fetch_error() {
        let err = scrape(&Hangs, "http://site.test/", Mode::Text, Duration::from_secs(3))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_fetch() {
        let err = scrape(&Hangs, "nope", Mode::Text, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }
}
