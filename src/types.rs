//! Common types used throughout the rating ledger

use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for chess profiles
pub type ProfileId = i64;

/// Unique identifier for stats rows
pub type StatsId = i64;

const MAX_NAME_LEN: usize = 100;
const MAX_URL_LEN: usize = 255;

/// Time-control category of a chess game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Bullet,
    Blitz,
    Rapid,
}

impl GameType {
    /// Every game type, in declaration order
    pub const ALL: [GameType; 3] = [GameType::Bullet, GameType::Blitz, GameType::Rapid];

    /// Lowercase token used on the wire and in metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Bullet => "bullet",
            GameType::Blitz => "blitz",
            GameType::Rapid => "rapid",
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bullet" => Ok(GameType::Bullet),
            "blitz" => Ok(GameType::Blitz),
            "rapid" => Ok(GameType::Rapid),
            _ => Err(LedgerError::InvalidGameType {
                token: s.to_string(),
            }),
        }
    }
}

/// A chess player's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub username: String,
    pub name: String,
    pub profile_url: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub username: String,
    pub name: String,
    pub profile_url: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl NewProfile {
    /// Check field lengths and URL shapes before anything is stored
    pub fn validate(&self) -> Result<()> {
        validate_text("username", &self.username)?;
        validate_text("name", &self.name)?;
        validate_url("profile_url", &self.profile_url)?;
        if let Some(avatar_url) = &self.avatar_url {
            validate_url("avatar_url", avatar_url)?;
        }
        Ok(())
    }
}

fn validate_text(field: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidProfile {
            reason: format!("{} cannot be empty", field),
        });
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(LedgerError::InvalidProfile {
            reason: format!("{} exceeds {} characters", field, MAX_NAME_LEN),
        });
    }
    Ok(())
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidProfile {
            reason: format!("{} cannot be empty", field),
        });
    }
    if trimmed.chars().count() > MAX_URL_LEN {
        return Err(LedgerError::InvalidProfile {
            reason: format!("{} exceeds {} characters", field, MAX_URL_LEN),
        });
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(LedgerError::InvalidProfile {
            reason: format!("{} must be an http(s) URL", field),
        });
    }
    Ok(())
}

/// Per-profile, per-game-type play history and rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub id: StatsId,
    pub profile_id: ProfileId,
    pub game_type: GameType,
    pub games_played: u32,
    pub games_won: u32,
    /// `None` until the first rated game is recorded
    pub current_rating: Option<i32>,
    /// Historical peak of `current_rating`
    pub highest_rating: Option<i32>,
    /// Bumped by the store on every save; a stale copy cannot be written back
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Stats {
    /// Create an unrated row with zeroed counters
    pub fn new_default(id: StatsId, profile_id: ProfileId, game_type: GameType) -> Self {
        let now = Utc::now();
        Self {
            id,
            profile_id,
            game_type,
            games_played: 0,
            games_won: 0,
            current_rating: None,
            highest_rating: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rating used for computation; an unrated row counts as `default`
    pub fn effective_rating(&self, default: i32) -> i32 {
        self.current_rating.unwrap_or(default)
    }

    /// Apply one finished game: set the rating, raise the peak, bump counters
    pub fn apply_result(&mut self, new_rating: i32, won: bool) {
        self.current_rating = Some(new_rating);
        if self.highest_rating.map_or(true, |peak| new_rating > peak) {
            self.highest_rating = Some(new_rating);
        }
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }
    }
}

/// A profile together with all of its stats rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileWithStats {
    #[serde(flatten)]
    pub profile: Profile,
    pub stats: Vec<Stats>,
}

/// A finished game between two profiles. Draws are not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub profile_a: ProfileId,
    pub profile_b: ProfileId,
    pub game_type: GameType,
    pub a_won: bool,
}

/// Both players' stats after a result was recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedResult {
    pub player_a: Stats,
    pub player_b: Stats,
}
