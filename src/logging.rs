// src/logging.rs
// =============================================================================
// Log setup.
//
// Our own messages are logged at info (debug with --verbose). Other crates
// (reqwest, hyper, ...) only show warnings. RUST_LOG, when set, wins.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();
}
