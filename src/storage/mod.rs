//! Storage interfaces for profiles and per-game-type statistics
//!
//! The ledger never touches storage directly; it talks to these two traits.
//! Any backend must uphold two contracts:
//!
//! - `create_default` is get-or-insert on `(profile_id, game_type)`, so two
//!   racing callers converge on one row.
//! - `save_both` commits both rows or neither.

pub mod memory;

pub use memory::{InMemoryStore, StoreStats};

use crate::error::Result;
use crate::types::{GameType, NewProfile, Profile, ProfileId, Stats};
use async_trait::async_trait;

/// Profile lookup and creation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Store a new profile; fails with `Conflict` on a duplicate username or URL
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile>;

    /// Get a profile by id
    async fn get_profile(&self, profile_id: ProfileId) -> Result<Option<Profile>>;

    /// Get a profile by its unique username
    async fn get_by_username(&self, username: &str) -> Result<Option<Profile>>;

    /// Pick any stored profile uniformly at random; `None` when there are none
    async fn get_random(&self) -> Result<Option<Profile>>;

    /// Check whether a profile with this id exists
    async fn exists(&self, profile_id: ProfileId) -> Result<bool> {
        Ok(self.get_profile(profile_id).await?.is_some())
    }
}

/// Statistics persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Get the stats row for a profile and game type
    async fn get(&self, profile_id: ProfileId, game_type: GameType) -> Result<Option<Stats>>;

    /// Get the row for this key, inserting an unrated one if absent
    async fn create_default(&self, profile_id: ProfileId, game_type: GameType) -> Result<Stats>;

    /// All stats rows of a profile, ordered by game type
    async fn list_stats(&self, profile_id: ProfileId) -> Result<Vec<Stats>>;

    /// Commit both rows as one unit
    async fn save_both(&self, stats_a: Stats, stats_b: Stats) -> Result<(Stats, Stats)>;

    /// Ensure a row exists for every game type
    async fn create_default_all(&self, profile_id: ProfileId) -> Result<Vec<Stats>> {
        let mut rows = Vec::with_capacity(GameType::ALL.len());
        for game_type in GameType::ALL {
            rows.push(self.create_default(profile_id, game_type).await?);
        }
        Ok(rows)
    }
}
