//! Error types for the rating ledger
//!
//! Library operations return the typed [`LedgerError`] so callers can tell a
//! missing profile apart from a failed commit. Configuration loading and the
//! binary use anyhow, as everything there is reported and then exits.

use crate::types::ProfileId;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors raised by the ledger and its storage collaborators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Profile not found: {profile_id}")]
    ProfileNotFound { profile_id: ProfileId },

    #[error("Profile not found for username: {username}")]
    UsernameNotFound { username: String },

    #[error("No profiles stored")]
    NoProfiles,

    #[error("Invalid game type: {token}")]
    InvalidGameType { token: String },

    #[error("Invalid game result: {reason}")]
    InvalidResult { reason: String },

    #[error("Invalid profile: {reason}")]
    InvalidProfile { reason: String },

    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    #[error("Persistence failure: {message}")]
    Persistence { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal service error: {message}")]
    Internal { message: String },
}

impl LedgerError {
    /// Short machine-readable label, used for metrics and response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::ProfileNotFound { .. }
            | LedgerError::UsernameNotFound { .. }
            | LedgerError::NoProfiles => "not_found",
            LedgerError::InvalidGameType { .. } => "invalid_game_type",
            LedgerError::InvalidResult { .. } => "invalid_result",
            LedgerError::InvalidProfile { .. } => "invalid_profile",
            LedgerError::Conflict { .. } => "conflict",
            LedgerError::Persistence { .. } => "persistence",
            LedgerError::Configuration { .. } => "configuration",
            LedgerError::Internal { .. } => "internal",
        }
    }

    /// Whether the error means one of the referenced records does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::ProfileNotFound { .. }
                | LedgerError::UsernameNotFound { .. }
                | LedgerError::NoProfiles
        )
    }
}
