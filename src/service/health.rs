//! Health checks
//!
//! This module reports whether the store is reachable and summarizes what
//! the service has recorded so far.

use crate::service::app::AppState;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Optional error message if unhealthy
    pub message: Option<String>,
    /// Service statistics
    pub stats: ServiceStats,
}

/// Service statistics for health reporting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Stored profiles
    pub profiles: usize,
    /// Stored stats rows
    pub stats_rows: usize,
    /// Seconds since startup
    pub uptime_seconds: u64,
}

impl HealthCheck {
    /// Check the store and gather statistics
    pub fn check(app_state: &AppState) -> Self {
        let (status, message, stats) = match app_state.store().snapshot() {
            Ok(snapshot) => (
                HealthStatus::Healthy,
                None,
                ServiceStats {
                    profiles: snapshot.profiles,
                    stats_rows: snapshot.stats_rows,
                    uptime_seconds: app_state.uptime_seconds(),
                },
            ),
            Err(e) => {
                error!("Store health check failed: {}", e);
                (
                    HealthStatus::Unhealthy,
                    Some(e.to_string()),
                    ServiceStats::default(),
                )
            }
        };

        HealthCheck {
            status,
            service: app_state.config().service.name.clone(),
            version: crate::VERSION.to_string(),
            timestamp: chrono::Utc::now(),
            message,
            stats,
        }
    }
}
