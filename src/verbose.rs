//! Diagnostics on stderr.
//!
//! Everything except the query result goes through `tracing`. The default
//! level shows warnings only; `--verbose` turns on progress and timings.
//! `RUST_LOG` overrides both.

use std::time::Instant;

use tracing_subscriber::EnvFilter;

const QUIET: &str = "warn";
const VERBOSE: &str = "orasql=debug,warn";

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE } else { QUIET }))
}

/// Install the stderr subscriber. Safe to call once per process.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// A timer for measuring durations in verbose mode.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}
