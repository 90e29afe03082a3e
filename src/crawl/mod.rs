// src/crawl/mod.rs
// =============================================================================
// This module does the crawling.
//
// Submodules:
// - client: the shared HTTP client and scheme detection for bare domains
// - domain: one domain (landing page + one hop into its same-host links)
// - fleet: all domains, bounded concurrency, results written as they finish
//
// Concurrency happens at two levels:
// - up to `concurrency` domains at once (fleet.rs)
// - inside each domain, up to `link_concurrency` links at once (domain.rs)
// =============================================================================

mod client;
mod domain;
mod fleet;

#[cfg(test)]
mod testing;

pub use fleet::run_fleet;
