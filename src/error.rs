// src/error.rs
// =============================================================================
// Error types for the crawl core and the results store.
//
// The application boundary (main.rs, input.rs) uses anyhow, but the core
// returns typed errors so callers can log them per domain and keep going:
// - FetchError: the landing page of a domain could not be fetched or read
// - StoreError: the results file could not be updated
//
// Neither error ever stops the whole run. A failing domain is logged and
// skipped, a failing store write is logged and the next domain carries on.
// =============================================================================

use thiserror::Error;

/// Why a single domain produced no result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The normalized URL could not be parsed
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// DNS, connection, TLS handshake or timeout failure on the landing page
    #[error("failed to fetch domain: {0}")]
    Request(#[source] reqwest::Error),

    /// The landing page answered but its body could not be read
    #[error("failed to read response: {0}")]
    Body(#[source] reqwest::Error),
}

/// Why a result could not be merged into the results file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("error reading existing JSON file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error marshaling JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("error writing temporary file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error renaming temporary file {path}: {source}")]
    Rename {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
