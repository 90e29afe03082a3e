// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging, print the banner (or just the version and stop)
// 3. Load keywords and read domains from stdin
// 4. Make sure the results file exists
// 5. Crawl every domain; each result is written as soon as it is ready
//
// Exit codes: 0 once crawling has started (individual domains may still
// fail), 1 if the run could not start (bad keywords, unreadable input).
// =============================================================================

// Module declarations - tells Rust about our other source files
mod banner;        // src/banner.rs - ASCII banner and version
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - settings the crawler runs with
mod crawl;         // src/crawl/ - landing pages, internal links, the fleet
mod error;         // src/error.rs - typed errors of the core
mod extract;       // src/extract/ - keywords, favicons, emails, links
mod input;         // src/input.rs - keyword list and domain list
mod logging;       // src/logging.rs - tracing setup
mod report;        // src/report.rs - per-domain data and result records
mod store;         // src/store.rs - the shared results file

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use config::CrawlSettings;
use store::ResultStore;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if cli.version {
        banner::print_banner();
        banner::print_version();
        return Ok(0);
    }

    if !cli.silent {
        banner::print_banner();
    }

    let keywords = input::load_keywords(&cli.wordlist).context("Error loading keywords")?;
    tracing::debug!("Loaded {} keyword(s)", keywords.len());

    let domains = input::read_domains(std::io::stdin().lock())?;
    if domains.is_empty() {
        tracing::warn!("No URLs provided via stdin");
        return Ok(0);
    }

    let store = Arc::new(ResultStore::new(&cli.output));
    if let Err(e) = store.initialize().await {
        tracing::warn!("Could not initialize output file: {}", e);
    }

    let settings = Arc::new(CrawlSettings::from_cli(&cli, keywords));
    tracing::info!(
        "Crawling {} domain(s), {} at a time",
        domains.len(),
        settings.concurrency
    );

    let summary = crawl::run_fleet(domains, settings, Arc::clone(&store))
        .await
        .context("Could not build HTTP client")?;

    tracing::debug!(
        "{} unreachable, {} not written",
        summary.fetch_failed,
        summary.store_failed
    );
    tracing::info!(
        "All domains processed. {} result(s) saved to: {}",
        summary.stored,
        store.path().display()
    );

    Ok(0)
}
