//! webwarden: scrape structured data from web pages and crawl sites.
//!
//! - [`extract`]: pure HTML -> text / links / images / tables
//! - [`fetch`]: the [`fetch::Fetcher`] trait with HTTP and (feature
//!   `browser`) headless Chromium implementations
//! - [`crawl`]: the breadth-first [`crawl::CrawlEngine`]
//! - [`scrape()`]: fetch and extract a single page

pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
mod scrape;

pub use error::{Error, ExtractError, FetchError, FetchErrorKind, Result};
pub use scrape::scrape;
