// src/extract/mod.rs
// =============================================================================
// This module contains everything we learn from a page body.
//
// Submodules:
// - keywords: which keywords appear in a body or a URL
// - favicon: which icon the site declares (HTML parse + /favicon.ico fallback)
// - links: emails and same-host links (pattern based, no HTML parse)
//
// Everything here is a pure function of its input, except the favicon
// fallback request which makes one request.
// =============================================================================

mod favicon;
mod keywords;
mod links;

pub use favicon::{resolve_favicons, select_logo};
pub use keywords::{match_keywords, match_keywords_in_url};
pub use links::extract_emails_and_links;
