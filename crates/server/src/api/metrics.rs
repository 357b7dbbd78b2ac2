//! Prometheus metrics recording.

use metrics::{counter, gauge, histogram};
use pantry_core::engine::HybridRanker;
use std::time::Duration;

/// Records HTTP request metrics.
pub fn record_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records a search and the number of results it returned.
pub fn record_search(filtered: bool, results: usize) {
    let filtered = if filtered { "true" } else { "false" };
    counter!("pantry_search_total", "filtered" => filtered).increment(1);
    histogram!("pantry_search_results").record(results as f64);
}

/// Updates corpus-level gauges once the engine is ready.
pub fn update_engine_metrics(engine: &HybridRanker) {
    let stats = engine.stats();
    gauge!("pantry_documents_total").set(stats.documents as f64);
    gauge!("pantry_vocabulary_size", "index" => "lexical").set(stats.lexical_vocabulary as f64);
    gauge!("pantry_vocabulary_size", "index" => "bm25")
        .set(stats.probabilistic_vocabulary as f64);
}
