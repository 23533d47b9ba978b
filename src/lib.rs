//! Rating Ledger - chess profile statistics with ELO ratings
//!
//! This crate records two-player game results against per-game-type
//! statistics, keeping ratings, peaks and counters consistent, and exposes
//! the ledger over an axum HTTP API.

pub mod config;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod rating;
pub mod service;
pub mod storage;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LedgerError, Result};
pub use types::*;

// Re-export key components
pub use ledger::StatsLedger;
pub use rating::{EloRatingCalculator, RatingCalculator};
pub use storage::{InMemoryStore, ProfileStore, StatsStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
