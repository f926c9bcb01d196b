// src/fetch/browser.rs
// =============================================================================
// Headless browser fetcher (feature "browser").
//
// Each fetch runs its own Chromium session:
//   launch -> open tab -> navigate -> read rendered DOM -> close
//
// The session is closed on every path, including navigation errors and
// navigation timeouts. Navigation is bounded inside the fetcher so the close
// step still runs when a page hangs; a caller-side timeout that drops the
// future falls back to chromiumoxide killing the child process on drop.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tracing::{debug, warn};

use super::Fetcher;
use crate::error::{FetchError, FetchErrorKind};

/// Renders pages in a fresh headless Chromium per fetch.
#[derive(Debug, Clone)]
pub struct BrowserFetcher {
    navigation_timeout: Duration,
}

impl BrowserFetcher {
    pub fn new(navigation_timeout: Duration) -> Self {
        Self { navigation_timeout }
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let config = BrowserConfig::builder()
            .request_timeout(self.navigation_timeout)
            .build()
            .map_err(|e| session_error(url, e))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| session_error(url, e))?;

        // The CDP handler has to be polled for the browser to make progress.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let rendered = tokio::time::timeout(self.navigation_timeout, render(&browser, url))
            .await
            .unwrap_or_else(|_| Err(FetchError::timeout(url)));

        if let Err(e) = browser.close().await {
            warn!(url, error = %e, "failed to close browser");
        }
        if let Err(e) = browser.wait().await {
            warn!(url, error = %e, "browser process did not exit cleanly");
        }
        events.abort();

        debug!(url, ok = rendered.is_ok(), "browser session released");
        rendered
    }
}

async fn render(browser: &Browser, url: &str) -> Result<String, FetchError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| session_error(url, e))?;

    page.goto(url)
        .await
        .map_err(|e| FetchError::new(url, FetchErrorKind::Request(e.to_string())))?;

    page.content()
        .await
        .map_err(|e| session_error(url, e))
}

fn session_error(url: &str, cause: impl ToString) -> FetchError {
    FetchError::new(url, FetchErrorKind::Session(cause.to_string()))
}
