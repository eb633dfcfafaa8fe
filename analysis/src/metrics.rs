//! Prometheus metrics for the analysis pipeline.
//!
//! [`AnalysisMetrics`] owns a dedicated [`Registry`] that the HTTP `/metrics`
//! endpoint encodes into the Prometheus text exposition format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry, Encoder, Histogram,
    HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder,
};

pub struct AnalysisMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Analyses started, by direction.
    pub analyses: IntCounterVec,
    /// Category fetches that failed, by category.
    pub fetch_failures: IntCounterVec,
    /// Records dropped during aggregation, by category.
    pub skipped_records: IntCounterVec,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Wall time of the five-way fetch, in milliseconds.
    pub fetch_duration_ms: Histogram,
}

impl AnalysisMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let analyses = register_int_counter_vec_with_registry!(
            Opts::new("fundflow_analyses_total", "Total analyses started"),
            &["direction"],
            registry
        )
        .expect("failed to register analyses counter");

        let fetch_failures = register_int_counter_vec_with_registry!(
            Opts::new(
                "fundflow_fetch_failures_total",
                "Total category fetches that failed"
            ),
            &["category"],
            registry
        )
        .expect("failed to register fetch_failures counter");

        let skipped_records = register_int_counter_vec_with_registry!(
            Opts::new(
                "fundflow_skipped_records_total",
                "Total records skipped because of a malformed amount or timestamp"
            ),
            &["category"],
            registry
        )
        .expect("failed to register skipped_records counter");

        // 1 ms → ~32 s
        let fetch_duration_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "fundflow_fetch_duration_ms",
                "Wall time of the concurrent feed fetch in milliseconds"
            )
            .buckets(prometheus::exponential_buckets(1.0, 2.0, 16).expect("valid bucket layout")),
            registry
        )
        .expect("failed to register fetch_duration_ms histogram");

        Self {
            registry,
            analyses,
            fetch_failures,
            skipped_records,
            fetch_duration_ms,
        }
    }

    /// Render every metric in the text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for AnalysisMetrics {
    fn default() -> Self {
        Self::new()
    }
}
