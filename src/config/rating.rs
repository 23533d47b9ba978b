//! Rating system configuration

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// Standard K-factor for chess ELO updates
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Rating assumed for a player with no stored rating
pub const DEFAULT_RATING: i32 = 1200;

/// ELO parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Maximum points exchanged per game
    pub k_factor: f64,
    /// Effective rating of an unrated player
    pub default_rating: i32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            default_rating: DEFAULT_RATING,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(LedgerError::Configuration {
                message: format!("K-factor must be positive, got {}", self.k_factor),
            });
        }
        Ok(())
    }
}
