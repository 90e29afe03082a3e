// src/crawl/client.rs
// =============================================================================
// The HTTP client every worker shares, and URL normalization.
//
// Client settings:
// - one overall timeout per request (from --timeout)
// - proxies from the environment (HTTP_PROXY / HTTPS_PROXY / NO_PROXY),
//   which reqwest picks up by default
// - certificate verification OFF: many of the sites we look at have
//   expired or self-signed certificates and we still want their pages
//
// reqwest::Client is reference counted internally, so cloning it hands
// every task the same connection pool.
// =============================================================================

use reqwest::Client;
use std::time::Duration;

// Builds the shared client
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(true)
        .build()
}

// Makes sure a domain carries a scheme
//
// - "http://..." and "https://..." are returned unchanged
// - otherwise "https://<domain>" is tried with a HEAD request and used
//   if it answers with a 2xx status
// - anything else (error, timeout, other status) falls back to
//   "http://<domain>" without checking it
//
// Example:
//   "site.com" -> "https://site.com" (if HTTPS answers)
//   "site.com" -> "http://site.com"  (otherwise)
pub async fn normalize_url(client: &Client, domain: &str) -> String {
    if domain.starts_with("http://") || domain.starts_with("https://") {
        return domain.to_string();
    }

    let https_url = format!("https://{}", domain);
    match client.head(&https_url).send().await {
        Ok(response) if response.status().is_success() => https_url,
        Ok(response) => {
            tracing::debug!("HTTPS check for {} answered {}, using http", domain, response.status());
            format!("http://{}", domain)
        }
        Err(e) => {
            tracing::debug!("HTTPS check for {} failed ({}), using http", domain, e);
            format!("http://{}", domain)
        }
    }
}
