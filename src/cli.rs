// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
//   webwarden scrape <mode> <url> [--format txt|json|md] [--output FILE]
//   webwarden crawl  <mode> <url> [depth] [--format ...] [--output FILE]
//
// Modes: text | links | images | tables | all
//
// Every long option can also come from a WEBWARDEN_* environment variable.
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use webwarden::extract::Mode;
use webwarden::ExtractError;

use crate::output::Format;

const EXAMPLES: &str = "\
Examples:
  # Scrape all text from a webpage
  webwarden scrape text https://example.com

  # Scrape all images and save to JSON file
  webwarden scrape images https://example.com --format json --output images.json

  # Crawl a website for links up to depth 2
  webwarden crawl links https://example.com 2

  # Scrape everything from a page and save to markdown
  webwarden scrape all https://example.com --format md --output everything.md";

#[derive(Parser, Debug)]
#[command(
    name = "webwarden",
    version,
    about = "Scrape text, links, images and tables from web pages, or crawl a site",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape data from a single page
    ///
    /// Example: webwarden scrape tables https://example.com/stats
    Scrape {
        /// Data to extract: text, links, images, tables or all
        #[arg(value_parser = parse_mode)]
        mode: Mode,

        /// URL of the page to scrape
        url: String,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Crawl pages on the same host, starting from a URL
    ///
    /// Example: webwarden crawl text https://example.com 2
    Crawl {
        /// Data to extract from every page: text, links, images, tables or all
        #[arg(value_parser = parse_mode)]
        mode: Mode,

        /// Starting URL for crawling
        url: String,

        /// Link hops to follow from the starting page (0 = starting page only)
        #[arg(default_value_t = 1)]
        depth: usize,

        /// Minimum milliseconds between two requests to the same host
        #[arg(long, default_value_t = 1000, env = "WEBWARDEN_DELAY_MS")]
        delay_ms: u64,

        /// Pages fetched concurrently
        #[arg(long, default_value_t = 1, env = "WEBWARDEN_WORKERS")]
        workers: usize,

        /// Stop after this many seconds and keep what was collected
        #[arg(long, env = "WEBWARDEN_DEADLINE_SECS")]
        deadline_secs: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        fetch: FetchArgs,
    },
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output format (default: json for mode "all", txt otherwise)
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// File to save output to (default: stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    pub fn format_for(&self, mode: Mode) -> Format {
        self.format.unwrap_or_else(|| Format::default_for(mode))
    }
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// How pages are fetched
    #[arg(long, value_enum, default_value_t = FetcherKind::Http, env = "WEBWARDEN_FETCHER")]
    pub fetcher: FetcherKind,

    /// Give up on a page after this many seconds
    #[arg(long, default_value_t = 30, env = "WEBWARDEN_TIMEOUT_SECS")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetcherKind {
    /// Plain HTTP GET, no JavaScript
    Http,
    /// Headless Chromium, runs page scripts (needs the `browser` feature)
    Browser,
}

fn parse_mode(value: &str) -> Result<Mode, ExtractError> {
    value.parse()
}
