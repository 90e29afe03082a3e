// src/crawl/domain.rs
// =============================================================================
// Crawls one domain: its landing page, then every same-host link on it.
//
// How it works:
// 1. Normalize the domain into a URL (see client.rs)
// 2. GET the landing page once. If that fails the whole domain fails.
// 3. From that one body: matched keywords, favicons, emails, and the set
//    of same-host links
// 4. Visit every link in its own task, at most `link_concurrency` at once.
//    A link is "confirmed" when its URL text or its body matches a keyword.
// 5. Merge every task's findings into the domain's data. If the landing
//    page matched a keyword it counts as a confirmed link too.
//
// Depth is fixed: links found on the linked pages are not followed.
// A link that cannot be fetched only loses its body findings.
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

use crate::crawl::client::normalize_url;
use crate::error::FetchError;
use crate::extract::{
    extract_emails_and_links, match_keywords, match_keywords_in_url, resolve_favicons,
};
use crate::report::DomainData;

// What one internal link contributed
#[derive(Debug, Default)]
struct LinkFindings {
    link: String,
    keywords: BTreeSet<String>,
    emails: BTreeSet<String>,
    // URL text or body matched at least one keyword
    confirmed: bool,
}

// Collects everything we can find about one domain
//
// Parameters:
//   client: the shared HTTP client (timeout, proxy and TLS already set)
//   domain: a raw domain ("site.com") or a full URL
//   keywords: the keywords to look for
//   link_concurrency: how many internal links may be fetched at once
//
// Returns: the collected DomainData, or FetchError if the landing page
//          could not be fetched
pub async fn process_domain(
    client: &Client,
    domain: &str,
    keywords: Arc<[String]>,
    link_concurrency: usize,
) -> Result<DomainData, FetchError> {
    let url = normalize_url(client, domain).await;
    Url::parse(&url).map_err(|source| FetchError::InvalidUrl {
        url: url.clone(),
        source,
    })?;

    let response = client.get(&url).send().await.map_err(FetchError::Request)?;
    tracing::debug!("Fetched {} (HTTP {})", url, response.status());
    let html = response.text().await.map_err(FetchError::Body)?;

    let mut data = DomainData::new(&url);

    let landing_keywords = match_keywords(&html, &keywords);
    let landing_matched = !landing_keywords.is_empty();
    data.keywords.extend(landing_keywords.into_iter().map(str::to_string));

    data.favicons = resolve_favicons(client, &html, &url).await;

    let landing = extract_emails_and_links(&html, &url, &url);
    data.emails.extend(landing.emails);

    tracing::debug!("{} same-host link(s) on {}", landing.links.len(), url);

    let findings = inspect_links(client, &url, landing.links, keywords, link_concurrency).await;
    for found in findings {
        data.keywords.extend(found.keywords);
        data.emails.extend(found.emails);
        if found.confirmed {
            data.internal_links.insert(found.link);
        }
    }

    if landing_matched {
        data.internal_links.insert(url);
    }

    Ok(data)
}

// Visits every link concurrently, bounded by a semaphore
//
// Results arrive in completion order. A task that panics is logged and
// contributes nothing.
async fn inspect_links(
    client: &Client,
    base_url: &str,
    links: BTreeSet<String>,
    keywords: Arc<[String]>,
    link_concurrency: usize,
) -> Vec<LinkFindings> {
    if links.is_empty() {
        return Vec::new();
    }

    let semaphore = Arc::new(Semaphore::new(link_concurrency.max(1)));
    let base_url: Arc<str> = Arc::from(base_url);
    let mut tasks = JoinSet::new();

    for link in links {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let base_url = Arc::clone(&base_url);
        let keywords = Arc::clone(&keywords);

        tasks.spawn(async move {
            // The semaphore is never closed, so acquiring only waits
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return None;
            };
            Some(inspect_link(&client, link, &base_url, &keywords).await)
        });
    }

    let mut findings = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(found)) => findings.push(found),
            Ok(None) => {}
            Err(e) => tracing::warn!("Link task for {} failed: {}", base_url, e),
        }
    }
    findings
}

// Checks one internal link: its URL text first, then its body
async fn inspect_link(
    client: &Client,
    link: String,
    base_url: &str,
    keywords: &[String],
) -> LinkFindings {
    let mut found = LinkFindings::default();

    let url_keywords = match_keywords_in_url(&link, keywords);
    if !url_keywords.is_empty() {
        found.confirmed = true;
        found.keywords.extend(url_keywords.into_iter().map(str::to_string));
    }

    // The body is fetched even when the URL already matched: it may still
    // hold emails and other keywords
    match fetch_page(client, &link).await {
        Ok(html) => {
            // Links on this page are not followed
            let page = extract_emails_and_links(&html, &link, base_url);
            found.emails = page.emails;

            let body_keywords = match_keywords(&html, keywords);
            if !body_keywords.is_empty() {
                found.confirmed = true;
                found.keywords.extend(body_keywords.into_iter().map(str::to_string));
            }
        }
        Err(e) => {
            tracing::debug!("Skipping body of {}: {}", link, e);
        }
    }

    found.link = link;
    found
}

// Fetches an internal page; anything but 200 OK is an error
async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if response.status() != StatusCode::OK {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    let html = response.text().await?;
    Ok(html)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Semaphore and a JoinSet instead of buffer_unordered?
//    - tokio::spawn puts every link on the runtime's worker threads, so
//      pages are fetched and scanned in parallel, not just interleaved
//    - the Semaphore hands out `link_concurrency` permits; a task waits for
//      one before it makes its request and gives it back when it is dropped
//    - JoinSet::join_next() yields tasks as they finish, in any order
//
// 2. Why Arc<[String]> for keywords?
//    - every spawned task must own what it uses ('static)
//    - cloning an Arc only bumps a counter; the keywords are never copied
//
// 3. Why BTreeSet?
//    - it removes duplicates like HashSet, and iterates in sorted order,
//      so the results file comes out the same on every run
// -----------------------------------------------------------------------------
