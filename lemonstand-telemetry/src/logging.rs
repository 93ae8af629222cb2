//! ## lemonstand-telemetry::logging
//! **Structured logging with tracing and OpenTelemetry attributes**
//!
//! `RUST_LOG` wins over the configured level when both are present.

use opentelemetry::KeyValue;
use tracing::{debug, info_span};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global fmt subscriber. An already installed subscriber is kept.
    pub fn init(default_level: &str) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if let Err(e) = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_span_events(FmtSpan::NONE)
            .try_init()
        {
            debug!(error = %e, "Subscriber already installed, keeping it");
        }
    }

    /// Emits one run-level event, e.g. a finished run or a fuzz violation.
    #[inline]
    pub fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!("stand_event", event_type = event_type, otel.kind = "INTERNAL");
        let _entered = span.enter();
        let attributes: Vec<String> = metadata
            .iter()
            .map(|kv| format!("{}={}", kv.key, kv.value))
            .collect();
        tracing::info!(metadata = ?attributes, "Stand event recorded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_logging() {
        EventLogger::log_event(
            "run_finished",
            vec![KeyValue::new("days", 30), KeyValue::new("seed", "42")],
        );
        assert!(logs_contain("Stand event recorded"));
        assert!(logs_contain("days=30"));
    }

    #[traced_test]
    #[test]
    fn test_second_init_keeps_existing_subscriber() {
        EventLogger::init("info");
        EventLogger::init("debug");
        assert!(logs_contain("Subscriber already installed"));
    }
}
