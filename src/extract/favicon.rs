// src/extract/favicon.rs
// =============================================================================
// This module finds the favicon (logo) of a site.
//
// How it works:
// 1. Parse the landing page with `scraper` and select every
//    <link rel="icon"> and <link rel="shortcut icon"> element
// 2. Resolve each href against the page URL
// 3. Cut the URL right after ".png" (or ".ico") so cache-busting query
//    strings and fragments are dropped
// 4. If the page declares no icon at all, request /favicon.ico once and keep
//    it only when the server answers 200
//
// The logo written to the results file is the shortest candidate.
//
// Unlike hrefs and emails (see links.rs), icons are found with a real HTML
// parser: the element and its rel attribute both matter here.
// =============================================================================

use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use url::Url;

// Constant selector, parsed once. The quotes in rel="..." match both the
// single- and double-quoted forms in the markup.
static ICON_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"link[rel="icon"], link[rel="shortcut icon"]"#).unwrap()
});

// Extracts favicon URLs declared in the HTML
//
// Parameters:
//   html: the landing page body
//   base_url: the landing page URL (for resolving relative hrefs)
//
// Returns: absolute, truncated icon URLs in document order
//          (empty if none are declared or the base URL is invalid)
pub fn favicons_from_html(html: &str, base_url: &str) -> Vec<String> {
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(_) => return Vec::new(),
    };

    let document = Html::parse_document(html);

    document
        .select(&ICON_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_icon(&base, href.trim()))
        .map(|absolute| truncate_after_extension(&absolute))
        .collect()
}

// Requests `/favicon.ico` on the site root
//
// Used only when the page declares no icon. Any transport error or a status
// other than 200 yields an empty list.
pub async fn fetch_fallback_favicon(client: &Client, base_url: &str) -> Vec<String> {
    let favicon_url = match Url::parse(base_url).and_then(|base| base.join("/favicon.ico")) {
        Ok(url) => url.to_string(),
        Err(_) => return Vec::new(),
    };

    match client.get(&favicon_url).send().await {
        Ok(response) if response.status() == StatusCode::OK => vec![favicon_url],
        Ok(response) => {
            tracing::debug!("No fallback favicon at {} (HTTP {})", favicon_url, response.status());
            Vec::new()
        }
        Err(e) => {
            tracing::debug!("Fallback favicon request failed for {}: {}", favicon_url, e);
            Vec::new()
        }
    }
}

// Finds all favicons for a landing page: declared ones first, the
// /favicon.ico request only if none are declared
pub async fn resolve_favicons(client: &Client, html: &str, base_url: &str) -> Vec<String> {
    let declared = favicons_from_html(html, base_url);
    if !declared.is_empty() {
        return declared;
    }
    fetch_fallback_favicon(client, base_url).await
}

// Picks the logo: the shortest candidate by character count.
// On equal length the first candidate wins. None if there are no candidates.
pub fn select_logo(favicons: &[String]) -> Option<&str> {
    favicons
        .iter()
        .min_by_key(|favicon| favicon.chars().count())
        .map(String::as_str)
}

fn resolve_icon(base: &Url, href: &str) -> Option<String> {
    if href.is_empty() {
        return None;
    }
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => base.join(href).ok().map(|url| url.to_string()),
    }
}

// ".png" takes precedence; only if there is none do we look for ".ico"
fn truncate_after_extension(url: &str) -> String {
    for extension in [".png", ".ico"] {
        if let Some(pos) = url.find(extension) {
            return url[..pos + extension.len()].to_string();
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_relative_icon_is_resolved_and_truncated() {
        let html = r#"<html><head><link rel="icon" href="/static/favicon.png?v=3"></head></html>"#;
        let icons = favicons_from_html(html, "https://site.com/");
        assert_eq!(icons, vec!["https://site.com/static/favicon.png"]);
    }

    #[test]
    fn test_single_quoted_shortcut_icon() {
        let html = "<head><link rel='shortcut icon' href='img/fav.ico#top'></head>";
        let icons = favicons_from_html(html, "https://site.com/dir/");
        assert_eq!(icons, vec!["https://site.com/dir/img/fav.ico"]);
    }

    #[test]
    fn test_absolute_icon_kept() {
        let html = r#"<link rel="icon" href="https://cdn.site.com/logo.png">"#;
        let icons = favicons_from_html(html, "https://site.com");
        assert_eq!(icons, vec!["https://cdn.site.com/logo.png"]);
    }

    #[test]
    fn test_other_link_rels_ignored() {
        let html = r#"<link rel="stylesheet" href="/main.css"><link rel="apple-touch-icon" href="/a.png">"#;
        assert!(favicons_from_html(html, "https://site.com").is_empty());
    }

    #[test]
    fn test_invalid_base_gives_nothing() {
        let html = r#"<link rel="icon" href="/favicon.ico">"#;
        assert!(favicons_from_html(html, "not a url").is_empty());
    }

    #[test]
    fn test_png_takes_precedence_over_ico() {
        assert_eq!(
            truncate_after_extension("https://s.com/a.ico/b.png?x=1"),
            "https://s.com/a.ico/b.png"
        );
        assert_eq!(truncate_after_extension("https://s.com/icon.svg"), "https://s.com/icon.svg");
    }

    #[test]
    fn test_select_logo_shortest_first_wins() {
        let a = vec!["/ab.ico".to_string(), "/a.ico".to_string(), "/b.ico".to_string()];
        assert_eq!(select_logo(&a), Some("/a.ico"));

        let b = vec!["/b.ico".to_string(), "/ab.ico".to_string(), "/a.ico".to_string()];
        assert_eq!(select_logo(&b), Some("/b.ico"));

        assert_eq!(select_logo(&[]), None);
    }

    #[tokio::test]
    async fn test_fallback_favicon_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favicon.ico"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = Client::new();
        let icons = resolve_favicons(&client, "<html></html>", &server.uri()).await;
        assert_eq!(icons, vec![format!("{}/favicon.ico", server.uri())]);
    }

    #[tokio::test]
    async fn test_fallback_favicon_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favicon.ico"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        assert!(fetch_fallback_favicon(&client, &server.uri()).await.is_empty());
    }

    #[tokio::test]
    async fn test_declared_icon_skips_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favicon.ico"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = Client::new();
        let html = r#"<link rel="icon" href="/brand.png">"#;
        let icons = resolve_favicons(&client, html, &server.uri()).await;
        assert_eq!(icons, vec![format!("{}/brand.png", server.uri())]);
    }
}
