// src/extract/links.rs
// =============================================================================
// This module pulls email addresses and same-host links out of a page.
//
// It deliberately does NOT parse the HTML. Two literal patterns find
// href="..." and href='...' values, and an email pattern scans the raw
// text. This is fast and catches hrefs in inline scripts and broken markup
// that a parser would drop, at the cost of some false positives. The email
// validity filter below exists to weed those out.
//
// For every href value:
// - hrefs pointing at assets (images, styles, fonts, documents, ...) are
//   ignored entirely
// - mailto: hrefs contribute their addresses and are never links
// - any other href contributes the addresses embedded in it, and is kept
//   as a link when it resolves to the same host as the site
//
// Finally the whole body is scanned for addresses that are not inside an
// href at all (plain text, footers, JSON blobs).
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use url::Url;

// Substrings that mark an href as an asset rather than a page
const EXCLUDED_PATTERNS: &[&str] = &[
    ".jpg", ".png", ".gif", ".webp", ".ico", ".mp4", ".pdf", ".eot", ".doc", ".docx", ".xls",
    ".xlsx", ".woff", ".woff2", ".css", ".json", ".xml", ".rss", ".svg", ".yaml", ".yml", ".csv",
    ".dockerfile", ".cfg", ".lock", ".js", ".md", ".toml",
];

// Substrings that betray an asset path mistaken for an address,
// e.g. "logo@2x.png"
const IMAGE_SUFFIXES: &[&str] = &[".png", ".jpg", ".webp", ".gif"];

const MAILTO: &str = "mailto:";

// ASCII word boundaries: an address glued to non-Latin text
// ("Почтаinfo@site.com") must still be found
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}(?-u:\b)").unwrap()
});

static HREF_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r#"href="([^"]*)""#).unwrap(),
        Regex::new(r#"href='([^']*)'"#).unwrap(),
    ]
});

/// Emails and same-host links found on one page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageSignals {
    pub emails: BTreeSet<String>,
    pub links: BTreeSet<String>,
}

// Extracts emails and same-host links from a page
//
// Parameters:
//   html: the raw page body
//   page_url: the URL the body came from (relative hrefs resolve against it)
//   base_url: the site's landing page URL (links must share its host)
//
// Example:
//   html = r#"<a href="/about">About</a> <a href="mailto:hi@site.com">"#
//   page_url = base_url = "https://site.com"
//   emails = {"hi@site.com"}, links = {"https://site.com/about"}
pub fn extract_emails_and_links(html: &str, page_url: &str, base_url: &str) -> PageSignals {
    let mut signals = PageSignals::default();

    // If either URL is unusable we can still collect emails
    let page = Url::parse(page_url).ok();
    let base = Url::parse(base_url).ok();

    for pattern in HREF_PATTERNS.iter() {
        for captures in pattern.captures_iter(html) {
            let Some(link) = captures.get(1).map(|m| m.as_str()) else {
                continue;
            };

            if should_exclude(link) {
                continue;
            }

            if let Some(address_part) = strip_mailto(link) {
                collect_emails(address_part, &mut signals.emails);
                continue;
            }

            collect_emails(link, &mut signals.emails);

            if let (Some(page), Some(base)) = (&page, &base) {
                if let Some(resolved) = resolve_same_host(page, base, link) {
                    signals.links.insert(resolved);
                }
            }
        }
    }

    collect_emails(html, &mut signals.emails);

    signals
}

// Checks whether an href points at an asset we never follow
fn should_exclude(link: &str) -> bool {
    let lower = link.to_lowercase();
    EXCLUDED_PATTERNS.iter().any(|pattern| lower.contains(pattern))
}

// Rejects email-shaped matches that are almost certainly not real contacts
//
// Rejected:
// - anything containing "example" or "email" (any case)
// - anything shorter than 5 characters
// - anything containing .png / .jpg / .webp / .gif
pub fn is_valid_email(email: &str) -> bool {
    let lower = email.to_lowercase();
    if lower.contains("example") || lower.contains("email") {
        return false;
    }
    if email.chars().count() < 5 {
        return false;
    }
    !IMAGE_SUFFIXES.iter().any(|suffix| email.contains(suffix))
}

fn collect_emails(text: &str, into: &mut BTreeSet<String>) {
    for found in EMAIL_REGEX.find_iter(text) {
        let email = found.as_str();
        if !email.is_empty() && is_valid_email(email) {
            into.insert(email.to_string());
        }
    }
}

// "mailto:" prefix, any case
fn strip_mailto(link: &str) -> Option<&str> {
    link.get(..MAILTO.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(MAILTO))
        .map(|_| &link[MAILTO.len()..])
}

fn resolve_same_host(page: &Url, base: &Url, link: &str) -> Option<String> {
    let resolved = page.join(link).ok()?;
    if is_same_host(&resolved, base) {
        Some(resolved.to_string())
    } else {
        None
    }
}

// Same host means the host (and any explicit port) are identical
fn is_same_host(candidate: &Url, base: &Url) -> bool {
    candidate.host_str().is_some()
        && candidate.host_str() == base.host_str()
        && candidate.port() == base.port()
}
