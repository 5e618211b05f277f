//! Observability for the search core.
//!
//! This crate provides:
//! - `init_logging` - `tracing` subscriber setup in JSON or human format
//! - `FilterMetrics` / `MetricsCollector` - per-search phase timings and counts

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;
