//! Test fixtures and store wrappers for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use rating_ledger::error::{LedgerError, Result};
use rating_ledger::rating::EloRatingCalculator;
use rating_ledger::storage::{InMemoryStore, ProfileStore, StatsStore};
use rating_ledger::types::{GameType, NewProfile, Profile, ProfileId, Stats};
use rating_ledger::StatsLedger;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Build a profile payload with a unique username and URL
pub fn new_profile(username: &str) -> NewProfile {
    NewProfile {
        username: username.to_string(),
        name: format!("{} Test", username),
        profile_url: format!("https://www.chess.com/member/{}", username),
        avatar_url: Some(format!("https://images.chess.com/{}.png", username)),
    }
}

/// A ledger over a fresh in-memory store with two profiles
pub async fn ledger_with_two_players() -> (StatsLedger, Arc<InMemoryStore>, Profile, Profile) {
    let store = Arc::new(InMemoryStore::new());
    let ledger = StatsLedger::new(
        store.clone(),
        store.clone(),
        Arc::new(EloRatingCalculator::default()),
    );

    let alice = store.create_profile(new_profile("alice")).await.unwrap();
    let bob = store.create_profile(new_profile("bob")).await.unwrap();

    (ledger, store, alice, bob)
}

/// Stats store that delegates to an in-memory store but can fail pair writes
#[derive(Debug)]
pub struct FlakyStatsStore {
    inner: Arc<InMemoryStore>,
    fail_saves: AtomicBool,
    save_attempts: AtomicUsize,
}

impl FlakyStatsStore {
    pub fn new(inner: Arc<InMemoryStore>) -> Self {
        Self {
            inner,
            fail_saves: AtomicBool::new(false),
            save_attempts: AtomicUsize::new(0),
        }
    }

    /// Make every following `save_both` fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of `save_both` calls seen so far
    pub fn save_attempts(&self) -> usize {
        self.save_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsStore for FlakyStatsStore {
    async fn get(&self, profile_id: ProfileId, game_type: GameType) -> Result<Option<Stats>> {
        self.inner.get(profile_id, game_type).await
    }

    async fn create_default(&self, profile_id: ProfileId, game_type: GameType) -> Result<Stats> {
        self.inner.create_default(profile_id, game_type).await
    }

    async fn list_stats(&self, profile_id: ProfileId) -> Result<Vec<Stats>> {
        self.inner.list_stats(profile_id).await
    }

    async fn save_both(&self, stats_a: Stats, stats_b: Stats) -> Result<(Stats, Stats)> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(LedgerError::Persistence {
                message: "simulated commit failure".to_string(),
            });
        }
        self.inner.save_both(stats_a, stats_b).await
    }
}

/// Profile store wrapper counting existence checks
#[derive(Debug)]
pub struct CountingProfileStore {
    inner: Arc<InMemoryStore>,
    exists_calls: AtomicUsize,
}

impl CountingProfileStore {
    pub fn new(inner: Arc<InMemoryStore>) -> Self {
        Self {
            inner,
            exists_calls: AtomicUsize::new(0),
        }
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileStore for CountingProfileStore {
    async fn exists(&self, profile_id: ProfileId) -> Result<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(profile_id).await
    }

    async fn create_profile(&self, profile: NewProfile) -> Result<Profile> {
        self.inner.create_profile(profile).await
    }

    async fn get_profile(&self, profile_id: ProfileId) -> Result<Option<Profile>> {
        self.inner.get_profile(profile_id).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Profile>> {
        self.inner.get_by_username(username).await
    }

    async fn get_random(&self) -> Result<Option<Profile>> {
        self.inner.get_random().await
    }
}
