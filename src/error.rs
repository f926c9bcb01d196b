// src/error.rs
// =============================================================================
// Error types for the webwarden library.
//
// Three layers can fail:
// - Fetching a page (network, timeout, browser session)
// - Extracting data (unknown mode, unusable base URL)
// - Running a crawl/scrape (bad start URL, nothing collected)
//
// The crawl engine treats FetchError as "skip this page and keep going".
// A single-page scrape returns it to the caller as a hard failure.
// =============================================================================

use std::fmt;

use thiserror::Error;

/// Why a fetch failed. Mirrors the categories a link checker reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// No response within the allowed time
    Timeout,
    /// Hostname could not be resolved
    Dns,
    /// Certificate or handshake failure
    Tls,
    /// Connection refused / reset / unreachable
    Connect,
    /// Redirect loop or redirect limit hit
    TooManyRedirects,
    /// Server answered with a non-success status code
    Status(u16),
    /// Any other transport or body-decoding error
    Request(String),
    /// The rendering session (headless browser) could not be used
    Session(String),
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::Timeout => write!(f, "request timed out"),
            FetchErrorKind::Dns => write!(f, "could not resolve hostname"),
            FetchErrorKind::Tls => write!(f, "SSL certificate error"),
            FetchErrorKind::Connect => write!(f, "connection failed"),
            FetchErrorKind::TooManyRedirects => write!(f, "too many redirects"),
            FetchErrorKind::Status(code) => write!(f, "HTTP {}", code),
            FetchErrorKind::Request(msg) => write!(f, "request failed: {}", msg),
            FetchErrorKind::Session(msg) => write!(f, "browser session failed: {}", msg),
        }
    }
}

/// A page could not be fetched.
#[derive(Debug, Clone, Error)]
#[error("failed to fetch {url}: {kind}")]
pub struct FetchError {
    pub url: String,
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn new(url: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    pub fn timeout(url: impl Into<String>) -> Self {
        Self::new(url, FetchErrorKind::Timeout)
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == FetchErrorKind::Timeout
    }
}

/// Extraction failures. Malformed HTML is never one of them.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unknown mode '{0}' (expected text, links, images, tables or all)")]
    InvalidMode(String),

    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Top-level error for scrape and crawl operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("no data collected during crawl of {url}")]
    EmptyResult { url: String },
}

pub type Result<T> = std::result::Result<T, Error>;
