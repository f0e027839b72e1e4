//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search backend calls (outcome, latency, health probes)
//! - Orchestrator (validation rejections, stale responses, result sizes)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Search Backend Metrics
// =============================================================================

/// Search requests total by outcome.
pub static SEARCH_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "stylefinder_search_requests_total",
            "Total search requests sent to the backend",
        ),
        &["outcome"], // "success", "http_error", "transport_error", "parse_error"
    )
    .unwrap()
});

/// Search request duration in seconds.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "stylefinder_search_duration_seconds",
            "Duration of search backend calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Health probes by result.
pub static HEALTH_CHECKS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "stylefinder_health_checks_total",
            "Total backend health probes",
        ),
        &["result"], // "healthy", "unhealthy"
    )
    .unwrap()
});

// =============================================================================
// Orchestrator Metrics
// =============================================================================

/// Submits blocked by the query validator.
pub static VALIDATION_REJECTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "stylefinder_validation_rejections_total",
            "Total search submits rejected by validation",
        ),
        &["reason"],
    )
    .unwrap()
});

/// Responses discarded because a newer search had been issued.
pub static STALE_RESPONSES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "stylefinder_stale_responses_total",
        "Search responses discarded as superseded",
    )
    .unwrap()
});

/// Products per applied result, by list.
pub static PRODUCTS_RETURNED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "stylefinder_products_returned",
            "Number of products per list in applied search results",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 20.0]),
        &["inventory"], // "in_stock", "out_of_stock"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Search backend
        Box::new(SEARCH_REQUESTS.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(HEALTH_CHECKS.clone()),
        // Orchestrator
        Box::new(VALIDATION_REJECTIONS.clone()),
        Box::new(STALE_RESPONSES.clone()),
        Box::new(PRODUCTS_RETURNED.clone()),
    ]
}
