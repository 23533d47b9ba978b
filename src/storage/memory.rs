//! In-memory store implementing both storage traits
//!
//! Profiles and stats live behind a single lock, so a pair write is one
//! critical section and readers never see half of it.

use crate::error::{LedgerError, Result};
use crate::storage::{ProfileStore, StatsStore};
use crate::types::{GameType, NewProfile, Profile, ProfileId, Stats, StatsId};
use async_trait::async_trait;
use chrono::Utc;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Row counts, for health reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub profiles: usize,
    pub stats_rows: usize,
}

#[derive(Debug, Default)]
struct StoreState {
    profiles: BTreeMap<ProfileId, Profile>,
    stats: HashMap<(ProfileId, GameType), Stats>,
    next_profile_id: ProfileId,
    next_stats_id: StatsId,
}

impl StoreState {
    fn allocate_profile_id(&mut self) -> ProfileId {
        self.next_profile_id += 1;
        self.next_profile_id
    }

    fn allocate_stats_id(&mut self) -> StatsId {
        self.next_stats_id += 1;
        self.next_stats_id
    }

    /// Reject a write whose row vanished or was saved since it was read
    fn check_current(&self, stats: &Stats) -> Result<()> {
        match self.stats.get(&(stats.profile_id, stats.game_type)) {
            None => Err(LedgerError::Persistence {
                message: format!(
                    "stats row for profile {} ({}) does not exist",
                    stats.profile_id, stats.game_type
                ),
            }),
            Some(stored) if stored.version != stats.version => Err(LedgerError::Persistence {
                message: format!(
                    "stale stats row for profile {} ({}): expected version {}, found {}",
                    stats.profile_id, stats.game_type, stats.version, stored.version
                ),
            }),
            Some(_) => Ok(()),
        }
    }
}

/// In-memory profile and stats storage
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| LedgerError::Internal {
            message: "Failed to acquire store read lock".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| LedgerError::Internal {
            message: "Failed to acquire store write lock".to_string(),
        })
    }

    /// Current row counts
    pub fn snapshot(&self) -> Result<StoreStats> {
        let state = self.read()?;
        Ok(StoreStats {
            profiles: state.profiles.len(),
            stats_rows: state.stats.len(),
        })
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile> {
        let mut state = self.write()?;

        let username = profile.username.trim().to_string();
        let profile_url = profile.profile_url.trim().to_string();

        if state.profiles.values().any(|p| p.username == username) {
            return Err(LedgerError::Conflict {
                reason: format!("username '{}' is already taken", username),
            });
        }
        if state.profiles.values().any(|p| p.profile_url == profile_url) {
            return Err(LedgerError::Conflict {
                reason: format!("profile URL '{}' is already registered", profile_url),
            });
        }

        let now = Utc::now();
        let id = state.allocate_profile_id();
        let created = Profile {
            id,
            username,
            name: profile.name.trim().to_string(),
            profile_url,
            avatar_url: profile.avatar_url.map(|url| url.trim().to_string()),
            created_at: now,
            updated_at: now,
        };
        state.profiles.insert(id, created.clone());

        debug!("Stored profile {} ('{}')", id, created.username);
        Ok(created)
    }

    async fn get_profile(&self, profile_id: ProfileId) -> Result<Option<Profile>> {
        Ok(self.read()?.profiles.get(&profile_id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Profile>> {
        Ok(self
            .read()?
            .profiles
            .values()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn get_random(&self) -> Result<Option<Profile>> {
        let state = self.read()?;
        let mut rng = rand::thread_rng();
        Ok(state.profiles.values().choose(&mut rng).cloned())
    }
}

#[async_trait]
impl StatsStore for InMemoryStore {
    async fn get(&self, profile_id: ProfileId, game_type: GameType) -> Result<Option<Stats>> {
        Ok(self.read()?.stats.get(&(profile_id, game_type)).cloned())
    }

    async fn create_default(&self, profile_id: ProfileId, game_type: GameType) -> Result<Stats> {
        let mut state = self.write()?;

        if !state.profiles.contains_key(&profile_id) {
            return Err(LedgerError::ProfileNotFound { profile_id });
        }
        if let Some(existing) = state.stats.get(&(profile_id, game_type)) {
            return Ok(existing.clone());
        }

        let id = state.allocate_stats_id();
        let stats = Stats::new_default(id, profile_id, game_type);
        state.stats.insert((profile_id, game_type), stats.clone());

        debug!(
            "Created default {} stats for profile {}",
            game_type, profile_id
        );
        Ok(stats)
    }

    async fn list_stats(&self, profile_id: ProfileId) -> Result<Vec<Stats>> {
        let state = self.read()?;
        let mut rows: Vec<Stats> = state
            .stats
            .values()
            .filter(|s| s.profile_id == profile_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.game_type);
        Ok(rows)
    }

    async fn save_both(&self, stats_a: Stats, stats_b: Stats) -> Result<(Stats, Stats)> {
        let mut state = self.write()?;

        if (stats_a.profile_id, stats_a.game_type) == (stats_b.profile_id, stats_b.game_type) {
            return Err(LedgerError::Persistence {
                message: format!(
                    "pair write targets one row twice (profile {}, {})",
                    stats_a.profile_id, stats_a.game_type
                ),
            });
        }

        // Validate both before touching either
        state.check_current(&stats_a)?;
        state.check_current(&stats_b)?;

        let now = Utc::now();
        let mut saved = [stats_a, stats_b];
        for stats in saved.iter_mut() {
            stats.version += 1;
            stats.updated_at = now;
            state
                .stats
                .insert((stats.profile_id, stats.game_type), stats.clone());
        }

        let [saved_a, saved_b] = saved;
        debug!(
            "Committed stats pair: profile {} v{}, profile {} v{}",
            saved_a.profile_id, saved_a.version, saved_b.profile_id, saved_b.version
        );
        Ok((saved_a, saved_b))
    }
}
