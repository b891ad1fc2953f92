//! Tracing setup for the binary.
//!
//! Logs go to stderr; stdout carries command output only.

use tracing_subscriber::EnvFilter;

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "PUNCHCLOCK_LOG";

/// Installs the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = filter(verbose, std::env::var(LOG_ENV).ok(), std::env::var("RUST_LOG").ok());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn filter(verbose: bool, ours: Option<String>, rust_log: Option<String>) -> EnvFilter {
    let directives = ours.or(rust_log).filter(|s| !s.trim().is_empty());
    match directives {
        Some(d) => EnvFilter::try_new(&d).unwrap_or_else(|_| EnvFilter::new(default_level(verbose))),
        None => EnvFilter::new(default_level(verbose)),
    }
}

fn default_level(verbose: bool) -> &'static str {
    if verbose { "punchclock=debug" } else { "warn" }
}
