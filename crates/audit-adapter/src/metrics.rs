use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};

pub static AUDIT_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "journey_audit_runs_total",
        "Number of audits run per navigation context",
        &["result"]
    )
    .expect("register journey_audit_runs_total")
});

pub static AUDIT_RUN_LATENCY: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "journey_audit_run_latency_ms",
        "Latency of a single audit invocation"
    )
    .expect("register journey_audit_run_latency_ms")
});

pub static SCORE_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "journey_audit_score_failures_total",
        "Category scores that could not be read from a report",
        &["category"]
    )
    .expect("register journey_audit_score_failures_total")
});

pub static RECORDS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "journey_audit_records_total",
        "Score records written to the result store"
    )
    .expect("register journey_audit_records_total")
});

pub fn record_run(ok: bool, latency_ms: f64) {
    let result = if ok { "ok" } else { "error" };
    AUDIT_RUNS_TOTAL.with_label_values(&[result]).inc();
    AUDIT_RUN_LATENCY.observe(latency_ms);
}

pub fn record_score_failure(category: &str) {
    SCORE_FAILURES_TOTAL.with_label_values(&[category]).inc();
}

pub fn record_stored() {
    RECORDS_TOTAL.inc();
}

/// Text exposition of every metric in the default registry.
pub fn render_metrics() -> String {
    let mut buffer = Vec::new();
    if TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .is_err()
    {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
