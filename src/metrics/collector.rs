//! Metrics collection using Prometheus
//!
//! This module provides metrics for the rating ledger: results recorded,
//! failures by reason, profile and stats row creation, and latency.

use crate::error::LedgerError;
use crate::types::GameType;
use anyhow::Result;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};
use std::sync::Arc;
use std::time::Duration;

/// Main metrics collector for the rating ledger
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Result-recording metrics
    ledger_metrics: LedgerMetrics,

    /// Profile and stats row metrics
    profile_metrics: ProfileMetrics,
}

/// Result-recording metrics
#[derive(Clone)]
pub struct LedgerMetrics {
    /// Results recorded, by game type
    pub results_recorded_total: IntCounterVec,

    /// Rejected or failed results, by reason
    pub result_failures_total: IntCounterVec,

    /// End-to-end record-result latency
    pub record_result_duration: Histogram,
}

/// Profile and stats row metrics
#[derive(Clone)]
pub struct ProfileMetrics {
    /// Profiles created
    pub profiles_created_total: IntCounter,

    /// Stats rows materialized, by game type
    pub stats_rows_created_total: IntCounterVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let ledger_metrics = LedgerMetrics::new(&registry)?;
        let profile_metrics = ProfileMetrics::new(&registry)?;

        Ok(Self {
            registry,
            ledger_metrics,
            profile_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get ledger metrics
    pub fn ledger(&self) -> &LedgerMetrics {
        &self.ledger_metrics
    }

    /// Get profile metrics
    pub fn profile(&self) -> &ProfileMetrics {
        &self.profile_metrics
    }

    /// Record a successfully committed result
    pub fn record_result(&self, game_type: GameType, duration: Duration) {
        self.ledger_metrics
            .results_recorded_total
            .with_label_values(&[game_type.as_str()])
            .inc();

        self.ledger_metrics
            .record_result_duration
            .observe(duration.as_secs_f64());
    }

    /// Record a result that was rejected or failed to commit
    pub fn record_failure(&self, error: &LedgerError) {
        self.ledger_metrics
            .result_failures_total
            .with_label_values(&[error.kind()])
            .inc();
    }

    /// Record a profile being created
    pub fn record_profile_created(&self) {
        self.profile_metrics.profiles_created_total.inc();
    }

    /// Record a stats row being materialized
    pub fn record_stats_created(&self, game_type: GameType) {
        self.profile_metrics
            .stats_rows_created_total
            .with_label_values(&[game_type.as_str()])
            .inc();
    }
}

impl LedgerMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let results_recorded_total = IntCounterVec::new(
            Opts::new(
                "rating_ledger_results_recorded_total",
                "Total game results recorded",
            ),
            &["game_type"],
        )?;
        registry.register(Box::new(results_recorded_total.clone()))?;

        let result_failures_total = IntCounterVec::new(
            Opts::new(
                "rating_ledger_result_failures_total",
                "Total game results rejected or failed",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(result_failures_total.clone()))?;

        let record_result_duration = Histogram::with_opts(
            HistogramOpts::new(
                "rating_ledger_record_result_duration_seconds",
                "Time to record a game result",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        )?;
        registry.register(Box::new(record_result_duration.clone()))?;

        Ok(Self {
            results_recorded_total,
            result_failures_total,
            record_result_duration,
        })
    }
}

impl ProfileMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let profiles_created_total = IntCounter::new(
            "rating_ledger_profiles_created_total",
            "Total profiles created",
        )?;
        registry.register(Box::new(profiles_created_total.clone()))?;

        let stats_rows_created_total = IntCounterVec::new(
            Opts::new(
                "rating_ledger_stats_rows_created_total",
                "Total stats rows materialized",
            ),
            &["game_type"],
        )?;
        registry.register(Box::new(stats_rows_created_total.clone()))?;

        Ok(Self {
            profiles_created_total,
            stats_rows_created_total,
        })
    }
}
