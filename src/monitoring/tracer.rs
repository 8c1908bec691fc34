/*!
 * Structured Tracing
 * Subscriber setup and run-scoped spans using the tracing crate
 *
 * Features:
 * - Run ID generation for correlating every record of one simulation run
 * - JSON-formatted logs for structured parsing
 * - Duration and tick counts recorded when a paced run ends
 */

use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SIM_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("SIM_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    // try_init: tests and embedders may already have installed a subscriber
    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique run ID for log correlation
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one paced simulation run
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    run_id: String,
}

impl RunSpan {
    pub fn new(run_id: &str, algorithm: &str) -> Self {
        let span = span!(
            Level::INFO,
            "simulation_run",
            run_id = %run_id,
            algorithm = algorithm,
            ticks = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            result = tracing::field::Empty,
        );

        let entered = span.enter();
        debug!(run_id = %run_id, algorithm, "run started");
        drop(entered);

        Self {
            span,
            start: Instant::now(),
            run_id: run_id.to_string(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn record_ticks(&self, ticks: u64) {
        self.span.record("ticks", ticks);
    }

    pub fn record_result(&self, success: bool) {
        self.span.record("result", if success { "success" } else { "error" });
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_ms", duration.as_millis() as u64);
        let _entered = self.span.enter();
        debug!(
            run_id = %self.run_id,
            duration_ms = duration.as_millis() as u64,
            "run ended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_unique() {
        let a = generate_run_id();
        let b = generate_run_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_init_tracing_twice_does_not_panic() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn test_run_span_records() {
        let span = RunSpan::new("abc", "fcfs");
        span.record_ticks(12);
        span.record_result(true);
        assert_eq!(span.run_id(), "abc");
    }
}
