//! Rating calculator trait
//!
//! The ledger only needs two numbers in and two numbers out, so the seam is a
//! small trait. [`crate::rating::EloRatingCalculator`] is the production
//! implementation.

/// Trait for calculating rating changes after a two-player game
pub trait RatingCalculator: Send + Sync {
    /// Compute both players' new ratings from their current ones
    ///
    /// # Arguments
    /// * `rating_a` - Current (or effective) rating of player A
    /// * `rating_b` - Current (or effective) rating of player B
    /// * `a_won` - `true` if A won, `false` if B won
    ///
    /// # Returns
    /// `(new_rating_a, new_rating_b)`
    fn compute_update(&self, rating_a: i32, rating_b: i32, a_won: bool) -> (i32, i32);

    /// Rating assumed for a player who has never been rated
    fn default_rating(&self) -> i32;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Calculator that leaves ratings untouched, for tests of the counter logic
#[derive(Debug, Clone)]
pub struct NoOpRatingCalculator {
    default_rating: i32,
}

impl NoOpRatingCalculator {
    pub fn new(default_rating: i32) -> Self {
        Self { default_rating }
    }
}

impl Default for NoOpRatingCalculator {
    fn default() -> Self {
        Self::new(crate::config::rating::DEFAULT_RATING)
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn compute_update(&self, rating_a: i32, rating_b: i32, _a_won: bool) -> (i32, i32) {
        (rating_a, rating_b)
    }

    fn default_rating(&self) -> i32 {
        self.default_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "default_rating": self.default_rating
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_calculator() {
        let calculator = NoOpRatingCalculator::default();

        assert_eq!(calculator.default_rating(), 1200);
        assert_eq!(calculator.compute_update(1500, 1600, true), (1500, 1600));
        assert_eq!(calculator.compute_update(1500, 1600, false), (1500, 1600));
        assert_eq!(calculator.config()["type"], "no_op");
    }
}
