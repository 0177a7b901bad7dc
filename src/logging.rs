//! Diagnostic tracing for the binaries.
//!
//! The library only emits `tracing` events: `trace` per A* expansion, `debug`
//! per planner step and per finished search, `warn` when planning gives up.
//! Nothing is printed unless a subscriber is installed.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset, by number of `-v` flags.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "ai_search=debug",
        _ => "ai_search=trace",
    }
}

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when it is set and valid; otherwise `verbosity` picks the
/// filter. `-v` shows planner steps and search summaries, `-vv` adds every
/// A* expansion.
///
/// # Example
/// ```bash
/// blocks_planner -v --goal 'ON(A,B)'
/// RUST_LOG=ai_search::search=trace puzzle_solver 867254301
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time().compact())
        .init();
}
