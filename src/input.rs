// src/input.rs
// =============================================================================
// Where keywords and domains come from.
//
// Keywords: --wordlist is either a file (one keyword per line) or, if no
// such file exists, a comma-separated list. Entries are trimmed and blank
// ones dropped. An empty result is an error: there is nothing to look for.
//
// Domains: one per line on standard input, trimmed, blanks dropped.
// =============================================================================

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Loads keywords from a file or a comma-separated string
//
// Example:
//   "Stranger Things, The Family Man" -> ["Stranger Things", "The Family Man"]
pub fn load_keywords(wordlist: &str) -> Result<Vec<String>> {
    let keywords = if Path::new(wordlist).is_file() {
        let file = File::open(wordlist)
            .with_context(|| format!("error opening keyword file {}", wordlist))?;
        read_lines(BufReader::new(file))
            .with_context(|| format!("error reading keyword file {}", wordlist))?
    } else {
        wordlist
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect()
    };

    if keywords.is_empty() {
        bail!("no keywords found in wordlist");
    }

    Ok(keywords)
}

// Reads one domain per line until end of input
pub fn read_domains<R: BufRead>(reader: R) -> Result<Vec<String>> {
    read_lines(reader).context("error reading input")
}

// Trimmed, non-blank lines
fn read_lines<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}
