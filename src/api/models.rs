//! API Request and Response Models

use crate::bets::{Bet, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// POST /games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
}

/// POST /games/:game_id/score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportScoreRequest {
    pub home_score: u32,
    pub away_score: u32,
}

/// POST /bets/:bet_id/accept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptBetRequest {
    pub acceptor: UserId,
}

/// POST /bets/:bet_id/cancel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBetRequest {
    pub requester: UserId,
}

/// A bet together with its one-line summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetView {
    pub bet: Bet,
    pub summary: String,
}
