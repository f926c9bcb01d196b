// src/main.rs
// =============================================================================
// Entry point of the webwarden CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout only carries data)
// 3. Dispatch to the scrape or crawl handler
// 4. Write the rendered output to stdout or a file
// 5. Exit with a status code:
//      0 = success
//      1 = scrape fetch failed, or crawl collected nothing
//      2 = invalid input or internal error
// =============================================================================

mod cli;
mod output;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, FetchArgs, FetcherKind, OutputArgs};
use webwarden::crawl::{CrawlConfig, CrawlEngine};
use webwarden::extract::Mode;
use webwarden::fetch::{Fetcher, HttpFetcher};
use webwarden::Error;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    match cli.command {
        Commands::Scrape {
            mode,
            url,
            output,
            fetch,
        } => handle_scrape(mode, &url, &output, &fetch).await,
        Commands::Crawl {
            mode,
            url,
            depth,
            delay_ms,
            workers,
            deadline_secs,
            output,
            fetch,
        } => {
            let config = CrawlConfig::new(&url, depth, mode)?
                .with_delay(Duration::from_millis(delay_ms))
                .with_fetch_timeout(Duration::from_secs(fetch.timeout_secs))
                .with_workers(workers);
            handle_crawl(config, deadline_secs.map(Duration::from_secs), &output, &fetch).await
        }
    }
}

async fn handle_scrape(mode: Mode, url: &str, output: &OutputArgs, fetch: &FetchArgs) -> Result<i32> {
    let fetcher = build_fetcher(fetch)?;
    let timeout = Duration::from_secs(fetch.timeout_secs);

    let page = match webwarden::scrape(&fetcher, url, mode, timeout).await {
        Ok(page) => page,
        Err(Error::Fetch(e)) => {
            error!("{}", e);
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    let rendered = output::render_page(&page, output.format_for(mode))?;
    write_output(&rendered, output.output.as_deref())?;
    Ok(0)
}

async fn handle_crawl(
    config: CrawlConfig,
    deadline: Option<Duration>,
    output: &OutputArgs,
    fetch: &FetchArgs,
) -> Result<i32> {
    let mode = config.mode;
    let start_url = config.start_url.to_string();
    let engine = CrawlEngine::new(build_fetcher(fetch)?, config);

    let cancel = CancellationToken::new();
    cancel_on_interrupt_or_deadline(&cancel, deadline);

    let pages = engine.crawl(&cancel).await;
    cancel.cancel();

    if pages.is_empty() {
        error!("{}", Error::EmptyResult { url: start_url });
        return Ok(1);
    }

    let rendered = output::render_crawl(&pages, output.format_for(mode))?;
    write_output(&rendered, output.output.as_deref())?;
    Ok(0)
}

fn build_fetcher(args: &FetchArgs) -> Result<Box<dyn Fetcher>> {
    let timeout = Duration::from_secs(args.timeout_secs);
    match args.fetcher {
        FetcherKind::Http => Ok(Box::new(
            HttpFetcher::new(timeout).context("failed to create HTTP client")?,
        )),
        FetcherKind::Browser => browser_fetcher(timeout),
    }
}

#[cfg(feature = "browser")]
fn browser_fetcher(timeout: Duration) -> Result<Box<dyn Fetcher>> {
    Ok(Box::new(webwarden::fetch::BrowserFetcher::new(timeout)))
}

#[cfg(not(feature = "browser"))]
fn browser_fetcher(_timeout: Duration) -> Result<Box<dyn Fetcher>> {
    anyhow::bail!("this build has no browser support; rebuild with `--features browser`")
}

// Ctrl-C or the deadline cancels the crawl; pages collected so far are kept.
fn cancel_on_interrupt_or_deadline(cancel: &CancellationToken, deadline: Option<Duration>) {
    let token = cancel.clone();
    tokio::spawn(async move {
        let deadline = async {
            match deadline {
                Some(after) => tokio::time::sleep(after).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::signal::ctrl_c() => warn!("interrupted, keeping pages collected so far"),
            _ = deadline => warn!("deadline reached, keeping pages collected so far"),
        }
        token.cancel();
    });
}

fn write_output(rendered: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Output successfully saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set up logging")?;
    Ok(())
}
