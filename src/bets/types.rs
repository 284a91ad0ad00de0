use crate::bets::settlement::SettlementOutcome;
use crate::games::types::GameId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque bet identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetId(String);

impl BetId {
    pub fn generate() -> Self {
        Self(format!("bet_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a bettor as supplied by the calling platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supported wager types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    Moneyline,
    Spread,
    OverUnder,
    /// Accepted and stored, but never resolved by the settlement engine
    Prop,
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetType::Moneyline => write!(f, "moneyline"),
            BetType::Spread => write!(f, "spread"),
            BetType::OverUnder => write!(f, "over_under"),
            BetType::Prop => write!(f, "prop"),
        }
    }
}

/// What was picked and at what price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetOdds {
    #[serde(rename = "type")]
    pub bet_type: BetType,
    /// Spread (-7.5, +3.5) or total (215.5); absent means 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<f64>,
    /// American odds, e.g. -110 or +150
    pub odds: i32,
    /// "Lakers", "Over", "Warriors +7.5", ...
    pub selection: String,
}

impl BetOdds {
    pub fn line_or_zero(&self) -> f64 {
        self.line.unwrap_or(0.0)
    }
}

/// Bet lifecycle: open -> accepted -> settled, or open -> cancelled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Open,
    Accepted,
    Settled,
    Cancelled,
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetStatus::Open => write!(f, "open"),
            BetStatus::Accepted => write!(f, "accepted"),
            BetStatus::Settled => write!(f, "settled"),
            BetStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Peer-to-peer wager between a creator and, once accepted, an acceptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    pub game_id: GameId,
    pub creator: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptor: Option<UserId>,
    pub bet_type: BetType,
    pub odds: BetOdds,
    /// Stake, currency agnostic
    pub amount: f64,
    pub status: BetStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SettlementOutcome>,
}

impl Bet {
    pub(crate) fn open(
        creator: UserId,
        game_id: GameId,
        bet_type: BetType,
        odds: BetOdds,
        amount: f64,
    ) -> Self {
        Self {
            id: BetId::generate(),
            game_id,
            creator,
            acceptor: None,
            bet_type,
            odds,
            amount,
            status: BetStatus::Open,
            created_at: Utc::now(),
            accepted_at: None,
            settled_at: None,
            cancelled_at: None,
            winner: None,
            outcome: None,
        }
    }

    /// True if `user` is the creator or the acceptor
    pub fn involves(&self, user: &UserId) -> bool {
        &self.creator == user || self.acceptor.as_ref() == Some(user)
    }
}

/// Fields a caller supplies to open a bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBet {
    pub creator: UserId,
    pub game_id: GameId,
    pub bet_type: BetType,
    pub odds: BetOdds,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odds_wire_format() {
        let odds: BetOdds = serde_json::from_str(
            r#"{"type":"over_under","line":215.5,"odds":-110,"selection":"Over"}"#,
        )
        .unwrap();

        assert_eq!(odds.bet_type, BetType::OverUnder);
        assert_eq!(odds.line, Some(215.5));
        assert_eq!(odds.selection, "Over");
    }

    #[test]
    fn test_missing_line_defaults_to_zero() {
        let odds: BetOdds =
            serde_json::from_str(r#"{"type":"moneyline","odds":150,"selection":"Lakers"}"#).unwrap();

        assert_eq!(odds.line, None);
        assert_eq!(odds.line_or_zero(), 0.0);
    }

    #[test]
    fn test_involves() {
        let mut bet = Bet::open(
            UserId::from("alice"),
            GameId::from("game_1"),
            BetType::Moneyline,
            BetOdds {
                bet_type: BetType::Moneyline,
                line: None,
                odds: -110,
                selection: "Lakers".to_string(),
            },
            25.0,
        );
        assert!(bet.involves(&UserId::from("alice")));
        assert!(!bet.involves(&UserId::from("bob")));

        bet.acceptor = Some(UserId::from("bob"));
        assert!(bet.involves(&UserId::from("bob")));
    }
}
