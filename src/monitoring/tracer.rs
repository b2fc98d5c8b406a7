/*!
 * Structured Tracing
 * Subscriber setup and per-syscall spans using the tracing crate
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - MEMTRACK_TRACE_JSON: Enable JSON output (default: false)
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("MEMTRACK_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = use_json, "Structured tracing initialized");
    }
    installed
}

/// Generate a unique trace ID for request correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one `track_user_memory` call
pub struct SyscallSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl SyscallSpan {
    pub fn new(operation: &str, pid: i64) -> Self {
        let trace_id = generate_trace_id();
        let span = span!(
            Level::DEBUG,
            "track_user_memory",
            trace_id = %trace_id,
            operation = operation,
            pid = pid,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Record the syscall return code
    pub fn record_result(&self, code: i64) {
        self.span.record("result", code);
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for SyscallSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();

        if duration.as_millis() > 10 {
            warn!(
                trace_id = %self.trace_id,
                duration_ms = duration.as_millis() as u64,
                "slow syscall detected"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                duration_us = duration.as_micros() as u64,
                "syscall completed"
            );
        }
    }
}

/// Create a span for a simulated syscall
#[inline]
pub fn span_syscall(operation: &str, pid: i64) -> SyscallSpan {
    SyscallSpan::new(operation, pid)
}
