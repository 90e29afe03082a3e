// src/crawl/fleet.rs
// =============================================================================
// Runs the whole list of domains.
//
// Every domain gets its own tokio task; at most `concurrency` of them run at
// the same time. Each task crawls its domain, builds the result record and
// writes it to the results file right away.
//
// A domain that fails is logged and skipped; it never stops the others.
//
// Note on load: each running domain may itself fetch up to
// `link_concurrency` links at once, so the number of requests in flight
// can reach concurrency x link_concurrency.
// =============================================================================

use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::config::CrawlSettings;
use crate::crawl::client::build_client;
use crate::crawl::domain::process_domain;
use crate::report::DomainResult;
use crate::store::ResultStore;

/// How a single domain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainOutcome {
    /// Crawled and written to the results file
    Stored,
    /// The landing page could not be fetched
    FetchFailed,
    /// Crawled, but the results file could not be updated
    StoreFailed,
}

/// Counts of how the run went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub stored: usize,
    pub fetch_failed: usize,
    pub store_failed: usize,
}

impl FleetSummary {
    fn record(&mut self, outcome: DomainOutcome) {
        match outcome {
            DomainOutcome::Stored => self.stored += 1,
            DomainOutcome::FetchFailed => self.fetch_failed += 1,
            DomainOutcome::StoreFailed => self.store_failed += 1,
        }
    }
}

// Crawls every domain and writes each result as soon as it is ready
//
// Parameters:
//   domains: the domains to crawl (one entry per domain)
//   settings: keywords, timeout and both concurrency limits
//   store: the shared results file
//
// Returns: a summary of the run, or an error if the HTTP client could not
//          be built (nothing is crawled in that case)
pub async fn run_fleet(
    domains: Vec<String>,
    settings: Arc<CrawlSettings>,
    store: Arc<ResultStore>,
) -> reqwest::Result<FleetSummary> {
    let client = build_client(settings.timeout)?;

    // The map is lazy: a task is only spawned when buffer_unordered has a
    // free slot, so no more than `concurrency` domains are ever in flight
    let tasks = domains.into_iter().map(|domain| {
        let client = client.clone();
        let settings = Arc::clone(&settings);
        let store = Arc::clone(&store);
        tokio::spawn(async move { crawl_and_store(&client, &domain, &settings, &store).await })
    });

    let mut summary = FleetSummary::default();
    let mut outcomes = stream::iter(tasks).buffer_unordered(settings.concurrency.max(1));

    while let Some(joined) = outcomes.next().await {
        match joined {
            Ok(outcome) => summary.record(outcome),
            Err(e) => {
                tracing::warn!("Domain task failed: {}", e);
                summary.record(DomainOutcome::FetchFailed);
            }
        }
    }

    Ok(summary)
}

// One domain from start to finish
async fn crawl_and_store(
    client: &reqwest::Client,
    domain: &str,
    settings: &CrawlSettings,
    store: &ResultStore,
) -> DomainOutcome {
    let data = match process_domain(
        client,
        domain,
        Arc::clone(&settings.keywords),
        settings.link_concurrency,
    )
    .await
    {
        Ok(data) => data,
        Err(e) => {
            if settings.verbose {
                tracing::warn!("Error processing {}: {}", domain, e);
            }
            return DomainOutcome::FetchFailed;
        }
    };

    let result = DomainResult::from_data(data);

    if let Err(e) = store.upsert(result).await {
        tracing::warn!("Error updating JSON file for {}: {}", domain, e);
        return DomainOutcome::StoreFailed;
    }

    tracing::info!("Processed: {}", domain);
    DomainOutcome::Stored
}
