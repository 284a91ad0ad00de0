use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque game identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Fresh identifier, unique even for registrations within the same clock tick
    pub fn generate() -> Self {
        Self(format!("game_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Game lifecycle: scheduled -> live -> final
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Live,
    Final,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Scheduled => write!(f, "scheduled"),
            GameStatus::Live => write!(f, "live"),
            GameStatus::Final => write!(f, "final"),
        }
    }
}

/// A sporting event that bets are placed against.
///
/// Scores are present only once the game is final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    /// Free-form league tag such as "NBA" or "NFL"
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
}

impl Game {
    /// Create a scheduled game with a fresh identifier and no scores
    pub fn scheduled(
        sport: String,
        home_team: String,
        away_team: String,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: GameId::generate(),
            sport,
            home_team,
            away_team,
            start_time,
            status: GameStatus::Scheduled,
            home_score: None,
            away_score: None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == GameStatus::Scheduled
    }

    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }

    /// `(home, away)` once both scores are known
    pub fn final_score(&self) -> Option<(u32, u32)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}
