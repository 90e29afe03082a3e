// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Domains are read from standard input, one per line, so the tool fits at
// the end of a pipeline:
//
//   cat domains.txt | domain-sleuth -w "Stranger Things,The Family Man"
//
// Everything else is a flag with a sensible default.
// =============================================================================

use clap::builder::RangedU64ValueParser;
use clap::Parser;

// This struct represents our entire CLI application
//
// We print our own banner for --version, so clap's built-in version flag
// is disabled and replaced by a plain boolean.
#[derive(Parser, Debug)]
#[command(
    name = "domain-sleuth",
    about = "Crawl candidate domains for keywords, favicons, contact emails and matching pages",
    long_about = "domain-sleuth reads domains from stdin, fetches each landing page and the \
                  same-host pages it links to, and records matched keywords, the site logo, \
                  contact emails and matching pages in a JSON file.",
    disable_version_flag = true
)]
pub struct Cli {
    /// Keyword file (one per line) or comma-separated keywords
    ///
    /// Example: -w "Stranger Things,The Family Man"
    #[arg(short, long, default_value = "keywords.txt")]
    pub wordlist: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "programs.json")]
    pub output: String,

    /// Timeout for each HTTP request in seconds
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Number of domains crawled at the same time
    #[arg(
        short,
        long,
        default_value_t = 50,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub concurrency: usize,

    /// Number of internal links fetched at the same time for each domain
    /// (defaults to --concurrency)
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub link_concurrency: Option<usize>,

    /// Silent mode: do not print the banner
    #[arg(long)]
    pub silent: bool,

    /// Print the version of the tool and exit
    #[arg(long)]
    pub version: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,
}
