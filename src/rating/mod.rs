//! Rating system integration using ELO
//!
//! This module provides the rating calculator trait and the ELO
//! implementation backed by the skillratings crate.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::{NoOpRatingCalculator, RatingCalculator};
pub use elo::{compute_update, EloRatingCalculator};
