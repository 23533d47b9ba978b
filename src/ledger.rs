//! Stats ledger: records game results against per-game-type statistics
//!
//! The ledger owns no data. It checks that both profiles exist, materializes
//! missing stats rows, runs the rating calculator and hands the two updated
//! rows to the stats store as a single pair write. It never retries; a failed
//! commit is returned to the caller as-is.

use crate::error::{LedgerError, Result};
use crate::metrics::MetricsCollector;
use crate::rating::RatingCalculator;
use crate::storage::{ProfileStore, StatsStore};
use crate::types::{
    GameResult, GameType, NewProfile, Profile, ProfileId, ProfileWithStats, RecordedResult, Stats,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Orchestrates rating updates over the profile and stats stores
#[derive(Clone)]
pub struct StatsLedger {
    profiles: Arc<dyn ProfileStore>,
    stats: Arc<dyn StatsStore>,
    calculator: Arc<dyn RatingCalculator>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl StatsLedger {
    /// Create a ledger over the given collaborators
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        stats: Arc<dyn StatsStore>,
        calculator: Arc<dyn RatingCalculator>,
    ) -> Self {
        Self {
            profiles,
            stats,
            calculator,
            metrics: None,
        }
    }

    /// Report results and failures to a metrics collector
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// The rating calculator in use
    pub fn calculator(&self) -> &Arc<dyn RatingCalculator> {
        &self.calculator
    }

    /// Record a finished game between two profiles
    ///
    /// Fails with `ProfileNotFound` before any stats row is created if either
    /// profile is unknown, and with `InvalidResult` for self-play.
    pub async fn record_result(
        &self,
        profile_a: ProfileId,
        profile_b: ProfileId,
        game_type: GameType,
        a_won: bool,
    ) -> Result<RecordedResult> {
        self.record(GameResult {
            profile_a,
            profile_b,
            game_type,
            a_won,
        })
        .await
    }

    /// Record a finished game described by a [`GameResult`]
    pub async fn record(&self, result: GameResult) -> Result<RecordedResult> {
        let start = Instant::now();

        match self.apply_result(&result).await {
            Ok(recorded) => {
                let elapsed = start.elapsed();
                info!(
                    "Recorded {} result - profile {} {} vs profile {} {}, ratings {:?} / {:?}, time: {:.2}ms",
                    result.game_type,
                    result.profile_a,
                    if result.a_won { "won" } else { "lost" },
                    result.profile_b,
                    if result.a_won { "lost" } else { "won" },
                    recorded.player_a.current_rating,
                    recorded.player_b.current_rating,
                    elapsed.as_secs_f64() * 1000.0
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_result(result.game_type, elapsed);
                }
                Ok(recorded)
            }
            Err(e) => {
                warn!(
                    "Failed to record {} result for profiles {} and {}: {}",
                    result.game_type, result.profile_a, result.profile_b, e
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_failure(&e);
                }
                Err(e)
            }
        }
    }

    async fn apply_result(&self, result: &GameResult) -> Result<RecordedResult> {
        if result.profile_a == result.profile_b {
            return Err(LedgerError::InvalidResult {
                reason: format!("profile {} cannot play against itself", result.profile_a),
            });
        }

        // Existence is checked for both before any row is created
        for profile_id in [result.profile_a, result.profile_b] {
            if !self.profiles.exists(profile_id).await? {
                return Err(LedgerError::ProfileNotFound { profile_id });
            }
        }

        let mut stats_a = self.ensure_stats(result.profile_a, result.game_type).await?;
        let mut stats_b = self.ensure_stats(result.profile_b, result.game_type).await?;

        let default_rating = self.calculator.default_rating();
        let (new_a, new_b) = self.calculator.compute_update(
            stats_a.effective_rating(default_rating),
            stats_b.effective_rating(default_rating),
            result.a_won,
        );

        stats_a.apply_result(new_a, result.a_won);
        stats_b.apply_result(new_b, !result.a_won);

        let (player_a, player_b) = self.stats.save_both(stats_a, stats_b).await?;
        Ok(RecordedResult { player_a, player_b })
    }

    /// Fetch the stats row for this key, creating an unrated one if absent
    pub async fn ensure_stats(&self, profile_id: ProfileId, game_type: GameType) -> Result<Stats> {
        if let Some(stats) = self.stats.get(profile_id, game_type).await? {
            return Ok(stats);
        }

        debug!(
            "No {} stats for profile {}, creating default row",
            game_type, profile_id
        );
        let stats = self.stats.create_default(profile_id, game_type).await?;
        if let Some(metrics) = &self.metrics {
            metrics.record_stats_created(game_type);
        }
        Ok(stats)
    }

    /// Create a profile along with an unrated stats row per game type
    pub async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile> {
        new_profile.validate()?;

        let profile = self.profiles.create_profile(new_profile).await?;
        let rows = self.stats.create_default_all(profile.id).await?;

        info!(
            "Created profile {} ('{}') with {} stats rows",
            profile.id,
            profile.username,
            rows.len()
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_profile_created();
            for row in &rows {
                metrics.record_stats_created(row.game_type);
            }
        }
        Ok(profile)
    }

    /// Look up a profile by username
    pub async fn profile(&self, username: &str) -> Result<Profile> {
        self.profiles
            .get_by_username(username)
            .await?
            .ok_or_else(|| LedgerError::UsernameNotFound {
                username: username.to_string(),
            })
    }

    /// Any stored profile, chosen at random
    pub async fn random_profile(&self) -> Result<Profile> {
        self.profiles
            .get_random()
            .await?
            .ok_or(LedgerError::NoProfiles)
    }

    /// Look up a profile by username together with all of its stats
    pub async fn full_profile(&self, username: &str) -> Result<ProfileWithStats> {
        let profile = self.profile(username).await?;
        let stats = self.stats.list_stats(profile.id).await?;
        Ok(ProfileWithStats { profile, stats })
    }

    /// All stats rows of a profile
    pub async fn stats_for(&self, profile_id: ProfileId) -> Result<Vec<Stats>> {
        if !self.profiles.exists(profile_id).await? {
            return Err(LedgerError::ProfileNotFound { profile_id });
        }
        self.stats.list_stats(profile_id).await
    }
}
