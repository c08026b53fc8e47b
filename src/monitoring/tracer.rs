/*!
 * Structured Tracing
 * Subscriber setup and per-operation spans using the tracing crate
 *
 * Records emitted through the `log` facade by the memory engine are bridged
 * into the same subscriber.
 */

use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable switching output to JSON
pub const TRACE_JSON_ENV: &str = "MEMSIM_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - MEMSIM_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Span covering one manager operation, recording its duration on drop
pub struct OperationSpan {
    span: tracing::Span,
    start: Instant,
}

impl OperationSpan {
    pub fn new(operation: &str, pid: u32) -> Self {
        let span = span!(
            Level::DEBUG,
            "operation",
            operation = operation,
            pid = pid,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
        );

        let _entered = span.enter();
        debug!(operation = operation, pid = pid, "operation started");
        drop(_entered);

        Self {
            span,
            start: Instant::now(),
        }
    }

    /// Record whether the operation succeeded
    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        self.span.record("duration_us", elapsed.as_micros() as u64);
    }
}

/// Helper to create an operation span
#[inline]
pub fn span_operation(operation: &str, pid: u32) -> OperationSpan {
    OperationSpan::new(operation, pid)
}
