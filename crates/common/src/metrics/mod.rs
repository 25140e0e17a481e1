//! Metrics and observability utilities
//!
//! Prometheus metrics with standardized naming conventions for the two
//! pipelines and the generation client.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Ronshin metrics
pub const METRICS_PREFIX: &str = "ronshin";

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Analysis pipeline metrics
    describe_counter!(
        format!("{}_papers_analyzed_total", METRICS_PREFIX),
        Unit::Count,
        "Total papers analyzed"
    );

    describe_histogram!(
        format!("{}_analysis_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Paper analysis latency in seconds"
    );

    // Composition pipeline metrics
    describe_counter!(
        format!("{}_newspapers_composed_total", METRICS_PREFIX),
        Unit::Count,
        "Total newspapers composed"
    );

    describe_histogram!(
        format!("{}_composition_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Newspaper composition latency in seconds"
    );

    // Generation client metrics
    describe_counter!(
        format!("{}_generation_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total generation API requests"
    );

    describe_counter!(
        format!("{}_generation_fallbacks_total", METRICS_PREFIX),
        Unit::Count,
        "Generation responses replaced by a fixed fallback value"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Record a completed paper analysis
pub fn record_analysis(duration_secs: f64, language: &str) {
    counter!(
        format!("{}_papers_analyzed_total", METRICS_PREFIX),
        "language" => language.to_string()
    )
    .increment(1);

    histogram!(format!("{}_analysis_duration_seconds", METRICS_PREFIX)).record(duration_secs);
}

/// Record a completed newspaper composition
pub fn record_composition(duration_secs: f64, language: &str, paper_count: usize) {
    counter!(
        format!("{}_newspapers_composed_total", METRICS_PREFIX),
        "language" => language.to_string(),
        "papers" => paper_count.to_string()
    )
    .increment(1);

    histogram!(format!("{}_composition_duration_seconds", METRICS_PREFIX)).record(duration_secs);
}

/// Record a generation call
pub fn record_generation_request(step: &str) {
    counter!(
        format!("{}_generation_requests_total", METRICS_PREFIX),
        "step" => step.to_string()
    )
    .increment(1);
}

/// Record a generation response replaced by its fallback value
pub fn record_generation_fallback(reason: &str) {
    counter!(
        format!("{}_generation_fallbacks_total", METRICS_PREFIX),
        "reason" => reason.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("POST", "/v1/newspapers/generate");
        std::thread::sleep(std::time::Duration::from_millis(10));
        metrics.finish(200);
        // Just verify it runs without panic
    }

    #[test]
    fn test_record_helpers_do_not_panic() {
        record_analysis(1.2, "ja");
        record_composition(4.5, "en", 3);
        record_generation_request("relationship");
        record_generation_fallback("no_json_span");
    }
}
