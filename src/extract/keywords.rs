// src/extract/keywords.rs
// =============================================================================
// Keyword matching.
//
// Two flavours:
// - match_keywords: case-sensitive substring search over a page body
// - match_keywords_in_url: case-insensitive substring search over a URL,
//   used as a cheap check on an internal link before (and independently of)
//   fetching it
//
// Both return the matching keywords in the order of the keyword list.
// =============================================================================

// Returns every keyword that appears literally in `content`
//
// Example:
//   keywords = ["Foo", "Bar"], content = "...Foo..." -> ["Foo"]
pub fn match_keywords<'k>(content: &str, keywords: &'k [String]) -> Vec<&'k str> {
    keywords
        .iter()
        .filter(|keyword| content.contains(keyword.as_str()))
        .map(String::as_str)
        .collect()
}

// Returns every keyword that appears in `url`, ignoring case
//
// Example:
//   keywords = ["Pricing"], url = "https://site.com/pricing" -> ["Pricing"]
pub fn match_keywords_in_url<'k>(url: &str, keywords: &'k [String]) -> Vec<&'k str> {
    let url = url.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| url.contains(&keyword.to_lowercase()))
        .map(String::as_str)
        .collect()
}
