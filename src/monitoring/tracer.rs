/*!
 * Structured Tracing
 * Subscriber setup for simulator logs using the tracing crate
 */

use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable enabling JSON log output
pub const TRACE_JSON_ENV: &str = "RR_SIM_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - RR_SIM_TRACE_JSON: Enable JSON output (default: false)
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        // JSON output for parsing
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok();
        if installed {
            info!("Structured tracing initialized with JSON output");
        }
    } else {
        // Human-readable output
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .is_ok();
        if installed {
            info!("Structured tracing initialized");
        }
    }
}
