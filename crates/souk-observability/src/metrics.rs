//! Per-search timing metrics.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Metrics for one filtering pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterMetrics {
    /// Structured store query duration (microseconds).
    pub phase_a_us: u64,
    /// In-memory predicate pass duration (microseconds).
    pub phase_b_us: u64,
    /// Listings returned by the store.
    pub candidates: usize,
    /// Listings left after predicates.
    pub results: usize,
    /// Number of active predicates applied in memory.
    pub predicates: usize,
    /// Whether the store query failed.
    pub failed: bool,
    /// Error message if failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FilterMetrics {
    /// Share of candidates kept by the predicate pass.
    pub fn selectivity(&self) -> f64 {
        if self.candidates == 0 {
            0.0
        } else {
            self.results as f64 / self.candidates as f64
        }
    }

    /// Emit as a single structured log line.
    pub fn log(&self) {
        if self.failed {
            tracing::warn!(
                phase_a_us = self.phase_a_us,
                error = self.error.as_deref().unwrap_or(""),
                "search failed"
            );
        } else {
            tracing::info!(
                phase_a_us = self.phase_a_us,
                phase_b_us = self.phase_b_us,
                candidates = self.candidates,
                results = self.results,
                predicates = self.predicates,
                "search completed"
            );
        }
    }

    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Collector for one filtering pass.
#[derive(Debug)]
pub struct MetricsCollector {
    start: Instant,
    phase_a_done: Option<Instant>,
    metrics: FilterMetrics,
}

impl MetricsCollector {
    /// Start timing a pass.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            phase_a_done: None,
            metrics: FilterMetrics::default(),
        }
    }

    /// Record the end of the store query.
    pub fn record_phase_a(&mut self, candidates: usize) {
        let now = Instant::now();
        self.metrics.phase_a_us = now.duration_since(self.start).as_micros() as u64;
        self.metrics.candidates = candidates;
        self.phase_a_done = Some(now);
    }

    /// Record a failed store query.
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.metrics.phase_a_us = self.start.elapsed().as_micros() as u64;
        self.metrics.failed = true;
        self.metrics.error = Some(error.into());
    }

    /// Record the end of the predicate pass.
    pub fn record_phase_b(&mut self, predicates: usize, results: usize) {
        let from = self.phase_a_done.unwrap_or(self.start);
        self.metrics.phase_b_us = from.elapsed().as_micros() as u64;
        self.metrics.predicates = predicates;
        self.metrics.results = results;
    }

    pub fn finish(self) -> FilterMetrics {
        self.metrics
    }
}
