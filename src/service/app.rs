//! Main application state and HTTP server
//!
//! This module wires the store, rating calculator, ledger and metrics into
//! one shared state and serves the router built in [`crate::service::routes`].

use crate::config::AppConfig;
use crate::ledger::StatsLedger;
use crate::metrics::MetricsCollector;
use crate::rating::EloRatingCalculator;
use crate::service::routes::create_router;
use crate::storage::InMemoryStore;
use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },
}

/// Main application state containing all service components
pub struct AppState {
    /// Application configuration
    config: AppConfig,

    /// Result recording and profile operations
    ledger: StatsLedger,

    /// Backing store, kept for health snapshots
    store: Arc<InMemoryStore>,

    /// Prometheus metrics
    metrics: Arc<MetricsCollector>,

    /// When the state was built
    started_at: Instant,
}

impl AppState {
    /// Initialize the application with all dependencies
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        info!(
            "Initializing {} (k_factor={}, default_rating={})",
            config.service.name, config.rating.k_factor, config.rating.default_rating
        );

        let calculator = EloRatingCalculator::new(config.rating.clone()).map_err(|e| {
            ServiceError::Configuration {
                message: e.to_string(),
            }
        })?;

        let metrics =
            Arc::new(
                MetricsCollector::new().map_err(|e| ServiceError::Initialization {
                    message: format!("Failed to create metrics collector: {}", e),
                })?,
            );

        let store = Arc::new(InMemoryStore::new());
        let ledger = StatsLedger::new(store.clone(), store.clone(), Arc::new(calculator))
            .with_metrics(metrics.clone());

        Ok(Self {
            config,
            ledger,
            store,
            metrics,
            started_at: Instant::now(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the ledger
    pub fn ledger(&self) -> &StatsLedger {
        &self.ledger
    }

    /// Get the backing store
    pub fn store(&self) -> &Arc<InMemoryStore> {
        &self.store
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    /// Seconds since the state was built
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Bind the configured address and serve until `shutdown` resolves
pub async fn serve<F>(state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config().http_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {}", addr))?;

    info!("HTTP server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_initialization() {
        let state = AppState::new(AppConfig::default()).unwrap();
        assert_eq!(state.config().service.name, "rating-ledger");
        assert_eq!(state.ledger().calculator().default_rating(), 1200);
        assert_eq!(state.store().snapshot().unwrap().profiles, 0);
    }

    #[test]
    fn test_invalid_rating_config_rejected() {
        let mut config = AppConfig::default();
        config.rating.k_factor = 0.0;

        let err = AppState::new(config).err().unwrap();
        assert!(matches!(err, ServiceError::Configuration { .. }));
    }
}
