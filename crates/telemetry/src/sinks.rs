// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling the inspection
//! pipeline from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `InspectionMetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn InspectionMetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns the configured metrics sink. If no sink has been installed, it
/// returns a no-op sink.
pub fn metrics() -> &'static dyn InspectionMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics produced while decoding and checking a transaction.
pub trait DecodeMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of decoded transactions, labeled by shape.
    fn inc_transactions_decoded(&self, shape: &str);
    /// Increments the counter of rejected inputs, labeled by error code.
    fn inc_decode_failures(&self, code: &'static str);
    /// Records the outcome of one validation rule.
    fn inc_rule_outcome(&self, rule: &str, passed: bool);
}
impl DecodeMetricsSink for NopSink {
    fn inc_transactions_decoded(&self, _shape: &str) {}
    fn inc_decode_failures(&self, _code: &'static str) {}
    fn inc_rule_outcome(&self, _rule: &str, _passed: bool) {}
}

/// A sink for metadata anchor verification.
pub trait AnchorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of anchor checks, labeled by outcome
    /// (`valid`, `mismatch`, `fetch_failed`).
    fn inc_anchor_checks(&self, outcome: &'static str);
    /// Observes how long one anchor document fetch took.
    fn observe_anchor_fetch_duration(&self, duration_secs: f64);
}
impl AnchorMetricsSink for NopSink {
    fn inc_anchor_checks(&self, _outcome: &'static str) {}
    fn observe_anchor_fetch_duration(&self, _duration_secs: f64) {}
}

/// A sink for the signing step and the session's stale-result guard.
pub trait SigningMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of signing attempts, labeled by outcome.
    fn inc_signing_outcome(&self, outcome: &'static str);
    /// Increments the counter of async results dropped because their input was superseded.
    fn inc_stale_results_discarded(&self, job: &'static str);
}
impl SigningMetricsSink for NopSink {
    fn inc_signing_outcome(&self, _outcome: &'static str) {}
    fn inc_stale_results_discarded(&self, _job: &'static str) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and code.
    fn inc_error(&self, kind: &'static str, code: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _code: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait InspectionMetricsSink:
    DecodeMetricsSink + AnchorMetricsSink + SigningMetricsSink + ErrorMetricsSink
{
}

// Any type that implements all sub-traits can be used as an `InspectionMetricsSink`.
impl<T> InspectionMetricsSink for T where
    T: DecodeMetricsSink + AnchorMetricsSink + SigningMetricsSink + ErrorMetricsSink
{
}
