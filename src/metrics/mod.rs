//! Metrics and monitoring for the rating ledger
//!
//! Prometheus counters and histograms, exposed over HTTP on `/metrics`.

pub mod collector;

pub use collector::{LedgerMetrics, MetricsCollector, ProfileMetrics};
