// src/fetch/http.rs
// =============================================================================
// Plain HTTP fetcher.
//
// - One reqwest::Client per fetcher, so a whole crawl shares a connection pool
// - Every request has a timeout
// - Non-2xx responses are failures (a 404 page is not content we want)
// - Transport errors are sorted into the categories of FetchErrorKind
//
// This fetcher does not execute JavaScript. Pages that build their content
// client-side need the browser fetcher instead.
// =============================================================================

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::Fetcher;
use crate::error::{FetchError, FetchErrorKind};

const USER_AGENT: &str = concat!("webwarden/", env!("CARGO_PKG_VERSION"));

/// Fetches pages with a pooled HTTP client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(url, FetchErrorKind::Status(status.as_u16())));
        }

        response.text().await.map_err(|e| categorize_error(url, &e))
    }
}

// Sorts a reqwest error into a FetchErrorKind.
//
// reqwest only flags some conditions directly (timeout, redirect, connect);
// DNS and TLS failures show up in the error's source chain, so we look there.
fn categorize_error(url: &str, error: &reqwest::Error) -> FetchError {
    let chain = error_chain(error).to_lowercase();

    let kind = if error.is_timeout() {
        FetchErrorKind::Timeout
    } else if error.is_redirect() {
        FetchErrorKind::TooManyRedirects
    } else if chain.contains("dns") || chain.contains("failed to lookup address") {
        FetchErrorKind::Dns
    } else if chain.contains("certificate") || chain.contains("tls") || chain.contains("ssl") {
        FetchErrorKind::Tls
    } else if error.is_connect() {
        FetchErrorKind::Connect
    } else {
        FetchErrorKind::Request(error_chain(error))
    };

    FetchError::new(url, kind)
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
