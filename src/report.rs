// src/report.rs
// =============================================================================
// The two shapes a domain's findings take.
//
// - DomainData: what the crawler collects while it works on one domain.
//   It is owned by that one crawl and never shared.
// - DomainResult: the record written to the results file, one per domain,
//   keyed by `name`.
//
// DomainResult::from_data turns the first into the second: it picks the
// logo and fills in the "-" placeholders for fields with nothing found.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::extract::select_logo;

/// Placeholder written when a field has nothing to show.
pub const ABSENT: &str = "-";

/// Everything collected for one domain.
///
/// The sets keep entries unique; they are turned into sorted lists when
/// the result record is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainData {
    /// Normalized landing page URL
    pub url: String,
    /// Keywords matched on the landing page or any internal link
    pub keywords: BTreeSet<String>,
    /// Candidate favicon URLs, in the order they were found
    pub favicons: Vec<String>,
    /// Contact emails found anywhere in scope
    pub emails: BTreeSet<String>,
    /// Same-host URLs whose URL text or body matched a keyword
    pub internal_links: BTreeSet<String>,
}

impl DomainData {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// One record of the results file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainResult {
    pub name: String,
    pub logo: String,
    pub internal_link: Vec<String>,
    pub email: Vec<String>,
    pub matched: Vec<String>,
    pub last_updated: String,
}

impl DomainResult {
    /// Builds the record for `data`, stamped with today's local date.
    pub fn from_data(data: DomainData) -> Self {
        Self::from_data_on(data, &today())
    }

    /// Builds the record for `data` with an explicit date.
    pub fn from_data_on(data: DomainData, date: &str) -> Self {
        let logo = select_logo(&data.favicons).unwrap_or(ABSENT).to_string();

        let email = if data.emails.is_empty() {
            vec![ABSENT.to_string()]
        } else {
            data.emails.into_iter().collect()
        };

        Self {
            name: data.url,
            logo,
            // No placeholder here: an empty list means no page matched
            internal_link: data.internal_links.into_iter().collect(),
            email,
            matched: data.keywords.into_iter().collect(),
            last_updated: date.to_string(),
        }
    }
}

// Current local date as YYYY-MM-DD
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
