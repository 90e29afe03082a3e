// src/config.rs
// =============================================================================
// Settings the crawl core runs with, derived from the command line.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use crate::cli::Cli;

/// Everything a crawl needs besides the domains themselves.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Keywords to look for, shared by every task
    pub keywords: Arc<[String]>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Domains crawled at the same time
    pub concurrency: usize,
    /// Internal links fetched at the same time, per domain
    pub link_concurrency: usize,
    /// Log per-domain failures
    pub verbose: bool,
}

impl CrawlSettings {
    pub fn from_cli(cli: &Cli, keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into(),
            timeout: Duration::from_secs(cli.timeout),
            concurrency: cli.concurrency,
            // Same limit at both levels unless told otherwise
            link_concurrency: cli.link_concurrency.unwrap_or(cli.concurrency),
            verbose: cli.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_link_concurrency_defaults_to_concurrency() {
        let cli = Cli::parse_from(["domain-sleuth", "-c", "8", "-t", "5"]);
        let settings = CrawlSettings::from_cli(&cli, vec!["Foo".to_string()]);
        assert_eq!(settings.concurrency, 8);
        assert_eq!(settings.link_concurrency, 8);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.keywords.to_vec(), vec!["Foo".to_string()]);
    }

    #[test]
    fn test_link_concurrency_override() {
        let cli = Cli::parse_from(["domain-sleuth", "-c", "8", "--link-concurrency", "2"]);
        let settings = CrawlSettings::from_cli(&cli, vec!["Foo".to_string()]);
        assert_eq!(settings.link_concurrency, 2);
    }
}
