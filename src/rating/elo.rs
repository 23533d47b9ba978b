//! ELO rating system implementation
//!
//! This module provides the production rating calculator. Expected scores
//! come from the skillratings crate; the update itself is the standard
//! `R' = R + K * (S - E)` rounded to the nearest integer, ties to even.

use crate::config::rating::RatingConfig;
use crate::error::Result;
use crate::rating::calculator::RatingCalculator;
use skillratings::elo::{expected_score, EloRating};

/// ELO rating calculator with a fixed K-factor
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    config: RatingConfig,
}

impl EloRatingCalculator {
    /// Create a new ELO calculator
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Probability that a player rated `rating` beats one rated `opponent`
    pub fn win_probability(&self, rating: i32, opponent: i32) -> f64 {
        let (expected, _) = expected_score(
            &EloRating {
                rating: rating as f64,
            },
            &EloRating {
                rating: opponent as f64,
            },
        );
        expected
    }

    /// New rating for one side of a game
    ///
    /// Each side is computed from its own point of view, so swapping the
    /// players and flipping the outcome yields exactly the swapped pair.
    fn updated_rating(&self, rating: i32, opponent: i32, won: bool) -> i32 {
        let actual = if won { 1.0 } else { 0.0 };
        let expected = self.win_probability(rating, opponent);
        let raw = rating as f64 + self.config.k_factor * (actual - expected);

        raw.round_ties_even() as i32
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn compute_update(&self, rating_a: i32, rating_b: i32, a_won: bool) -> (i32, i32) {
        (
            self.updated_rating(rating_a, rating_b, a_won),
            self.updated_rating(rating_b, rating_a, !a_won),
        )
    }

    fn default_rating(&self) -> i32 {
        self.config.default_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "k_factor": self.config.k_factor,
            "default_rating": self.config.default_rating
        })
    }
}

/// Compute an update with the standard K=32 calculator
pub fn compute_update(rating_a: i32, rating_b: i32, a_won: bool) -> (i32, i32) {
    EloRatingCalculator::default().compute_update(rating_a, rating_b, a_won)
}
