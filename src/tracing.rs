//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging wrap
//! cache invalidation and layout recomputation.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=softwrap::engine=trace` - module-level filtering

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber with console logging
///
/// Console output respects RUST_LOG env var for filtering; defaults to
/// `warn` so configuration errors surface without chatter. Safe to call
/// more than once; later calls are no-ops.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // Tests call init from multiple entry points; ignore the second attempt
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
