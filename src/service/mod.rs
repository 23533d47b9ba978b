//! Service layer for the rating ledger
//!
//! This module contains the application state, HTTP routes and health
//! checks for the production service.

pub mod app;
pub mod health;
pub mod routes;

pub use app::{serve, AppState, ServiceError};
pub use health::{HealthCheck, HealthStatus};
pub use routes::{create_router, ApiError, RecordResultRequest};
