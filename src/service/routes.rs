//! HTTP routes for the chess statistics API
//!
//! Thin axum handlers over [`StatsLedger`]. Game-type tokens are parsed here,
//! so an unknown token is rejected before any store is touched.

use crate::error::LedgerError;
use crate::service::app::AppState;
use crate::service::health::{HealthCheck, HealthStatus};
use crate::types::{GameResult, GameType, NewProfile, ProfileId};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

/// Error wrapper mapping ledger failures to HTTP responses
#[derive(Debug)]
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(error: LedgerError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LedgerError::ProfileNotFound { .. }
            | LedgerError::UsernameNotFound { .. }
            | LedgerError::NoProfiles => StatusCode::NOT_FOUND,
            LedgerError::InvalidGameType { .. }
            | LedgerError::InvalidResult { .. }
            | LedgerError::InvalidProfile { .. } => StatusCode::BAD_REQUEST,
            LedgerError::Conflict { .. } => StatusCode::CONFLICT,
            LedgerError::Persistence { .. }
            | LedgerError::Configuration { .. }
            | LedgerError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self.0);
        }

        let body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// Body of `POST /chess/results`; the game type arrives as a raw token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResultRequest {
    pub profile_a: ProfileId,
    pub profile_b: ProfileId,
    pub game_type: String,
    pub a_won: bool,
}

impl TryFrom<RecordResultRequest> for GameResult {
    type Error = LedgerError;

    fn try_from(request: RecordResultRequest) -> Result<Self, Self::Error> {
        Ok(GameResult {
            profile_a: request.profile_a,
            profile_b: request.profile_b,
            game_type: request.game_type.parse::<GameType>()?,
            a_won: request.a_won,
        })
    }
}

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/chess/results", post(record_result_handler))
        .route("/chess/profiles", post(create_profile_handler))
        .route("/chess/profiles/random", get(get_random_profile_handler))
        .route("/chess/profiles/{username}", get(get_profile_handler))
        .route("/chess/profiles/{username}/full", get(get_full_profile_handler))
        .route("/chess/stats/{profile_id}", get(get_stats_handler))
        .with_state(state)
}

/// Root endpoint handler - shows service information
async fn root_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "service": state.config().service.name,
        "version": crate::VERSION,
        "rating": state.ledger().calculator().config(),
        "endpoints": [
            "/health",
            "/metrics",
            "/chess/results",
            "/chess/profiles",
            "/chess/profiles/random",
            "/chess/profiles/{username}",
            "/chess/profiles/{username}/full",
            "/chess/stats/{profile_id}"
        ]
    }))
}

/// Health check endpoint handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Health check requested");

    let health = HealthCheck::check(&state);
    let status = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(health))
}

/// Prometheus metrics endpoint handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    debug!("Metrics endpoint requested");

    let metric_families = state.metrics().registry().gather();
    let encoder = TextEncoder::new();

    match encoder.encode_to_string(&metric_families) {
        Ok(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            output,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to encode metrics".to_string(),
            )
                .into_response()
        }
    }
}

async fn record_result_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordResultRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = GameResult::try_from(request)?;
    let recorded = state.ledger().record(result).await?;
    Ok(Json(recorded))
}

async fn create_profile_handler(
    State(state): State<Arc<AppState>>,
    Json(new_profile): Json<NewProfile>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.ledger().create_profile(new_profile).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.ledger().profile(&username).await?;
    Ok(Json(profile))
}

async fn get_random_profile_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.ledger().random_profile().await?;
    Ok(Json(profile))
}

async fn get_full_profile_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.ledger().full_profile(&username).await?;
    Ok(Json(profile))
}

async fn get_stats_handler(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<ProfileId>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.ledger().stats_for(profile_id).await?;
    Ok(Json(stats))
}
