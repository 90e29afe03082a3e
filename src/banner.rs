// src/banner.rs
// =============================================================================
// The startup banner and version line.
// =============================================================================

const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

const BANNER: &str = r#"
     _                       _                      _            _   _
  __| | ___  _ __ ___   __ _(_)_ __       ___  ___| | ___ _   _| |_| |__
 / _` |/ _ \| '_ ` _ \ / _` | | '_ \ ___ / __|/ _ \ |/ _ \ | | | __| '_ \
| (_| | (_) | | | | | | (_| | | | | |___|\__ \  __/ |  __/ |_| | |_| | | |
 \__,_|\___/|_| |_| |_|\__,_|_|_| |_|    |___/\___|_|\___|\__,_|\__|_| |_|
"#;

pub fn version_line() -> String {
    format!("Current domain-sleuth version {}", VERSION)
}

pub fn print_banner() {
    println!("{}\n{:>74}\n", BANNER, version_line());
}

pub fn print_version() {
    println!("{}", version_line());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_uses_package_version() {
        assert!(version_line().ends_with(env!("CARGO_PKG_VERSION")));
    }
}
