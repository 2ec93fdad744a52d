// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram, register_int_counter_vec, Encoder, Histogram,
    IntCounterVec, TextEncoder,
};

// --- Metric Statics ---
// The collectors are initialized exactly once by `install`.

static TRANSACTIONS_DECODED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static DECODE_FAILURES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static RULE_OUTCOMES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static ANCHOR_CHECKS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static ANCHOR_FETCH_DURATION_SECONDS: OnceCell<Histogram> = OnceCell::new();
static SIGNING_OUTCOMES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static STALE_RESULTS_DISCARDED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Runs `$body` with the collector bound to `$m` once `install()` has run.
/// Before that, observations are dropped.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl DecodeMetricsSink for PrometheusSink {
    fn inc_transactions_decoded(&self, shape: &str) {
        with_metric!(TRANSACTIONS_DECODED_TOTAL, |m| m
            .with_label_values(&[shape])
            .inc());
    }
    fn inc_decode_failures(&self, code: &'static str) {
        with_metric!(DECODE_FAILURES_TOTAL, |m| m.with_label_values(&[code]).inc());
    }
    fn inc_rule_outcome(&self, rule: &str, passed: bool) {
        let outcome = if passed { "passed" } else { "failed" };
        with_metric!(RULE_OUTCOMES_TOTAL, |m| m
            .with_label_values(&[rule, outcome])
            .inc());
    }
}

impl AnchorMetricsSink for PrometheusSink {
    fn inc_anchor_checks(&self, outcome: &'static str) {
        with_metric!(ANCHOR_CHECKS_TOTAL, |m| m.with_label_values(&[outcome]).inc());
    }
    fn observe_anchor_fetch_duration(&self, duration_secs: f64) {
        with_metric!(ANCHOR_FETCH_DURATION_SECONDS, |m| m.observe(duration_secs));
    }
}

impl SigningMetricsSink for PrometheusSink {
    fn inc_signing_outcome(&self, outcome: &'static str) {
        with_metric!(SIGNING_OUTCOMES_TOTAL, |m| m
            .with_label_values(&[outcome])
            .inc());
    }
    fn inc_stale_results_discarded(&self, job: &'static str) {
        with_metric!(STALE_RESULTS_DISCARDED_TOTAL, |m| m
            .with_label_values(&[job])
            .inc());
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, code: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, code]).inc());
    }
}

fn already_installed<T>(_: T) -> prometheus::Error {
    prometheus::Error::AlreadyReg
}

/// Registers every collector with the default registry and makes
/// `PrometheusSink` the global sink. Fails if called twice.
pub fn install() -> Result<&'static dyn InspectionMetricsSink, prometheus::Error> {
    TRANSACTIONS_DECODED_TOTAL
        .set(register_int_counter_vec!(
            "vigil_transactions_decoded_total",
            "Transactions decoded, by recognised shape.",
            &["shape"]
        )?)
        .map_err(already_installed)?;
    DECODE_FAILURES_TOTAL
        .set(register_int_counter_vec!(
            "vigil_decode_failures_total",
            "Inputs rejected by the transaction decoder, by error code.",
            &["code"]
        )?)
        .map_err(already_installed)?;
    RULE_OUTCOMES_TOTAL
        .set(register_int_counter_vec!(
            "vigil_rule_outcomes_total",
            "Validation rule results.",
            &["rule", "outcome"]
        )?)
        .map_err(already_installed)?;
    ANCHOR_CHECKS_TOTAL
        .set(register_int_counter_vec!(
            "vigil_anchor_checks_total",
            "Metadata anchor checks, by outcome.",
            &["outcome"]
        )?)
        .map_err(already_installed)?;
    ANCHOR_FETCH_DURATION_SECONDS
        .set(register_histogram!(
            "vigil_anchor_fetch_duration_seconds",
            "Latency of anchor document fetches.",
            exponential_buckets(0.01, 2.0, 12)?
        )?)
        .map_err(already_installed)?;
    SIGNING_OUTCOMES_TOTAL
        .set(register_int_counter_vec!(
            "vigil_signing_outcomes_total",
            "Signing attempts, by outcome.",
            &["outcome"]
        )?)
        .map_err(already_installed)?;
    STALE_RESULTS_DISCARDED_TOTAL
        .set(register_int_counter_vec!(
            "vigil_stale_results_discarded_total",
            "Async results dropped because their input was superseded.",
            &["job"]
        )?)
        .map_err(already_installed)?;
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "vigil_errors_total",
            "Total number of errors, by kind and code.",
            &["kind", "code"]
        )?)
        .map_err(already_installed)?;

    static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;
    SINK.set(&PROMETHEUS_SINK).map_err(already_installed)?;
    Ok(&PROMETHEUS_SINK)
}

/// Renders every registered metric in the Prometheus text exposition format.
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::error!(error=%e, "Failed to encode prometheus metrics");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_then_render() {
        let sink = install().unwrap();
        sink.inc_anchor_checks("valid");
        sink.inc_rule_outcome("isSameNetwork", false);
        sink.inc_stale_results_discarded("anchor_check");

        let text = render();
        assert!(text.contains("vigil_anchor_checks_total{outcome=\"valid\"} 1"));
        assert!(text.contains("vigil_rule_outcomes_total{outcome=\"failed\",rule=\"isSameNetwork\"} 1"));
        assert!(text.contains("vigil_stale_results_discarded_total{job=\"anchor_check\"} 1"));

        assert!(install().is_err());
    }
}
