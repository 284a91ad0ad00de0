//! Error types for the bookie ledger
//!
//! Ledger rejections are expected, caller-correctable conditions. They are
//! returned as values and never panic.

use crate::bets::types::{BetId, BetStatus, UserId};
use crate::games::types::{GameId, GameStatus};
use thiserror::Error;

/// Root error type for all bookie operations
#[derive(Debug, Error)]
pub enum BookieError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Coarse classification of a ledger rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced game or bet identifier is unknown
    NotFound,
    /// The record is not in a status that permits the operation
    InvalidState,
    /// The request itself is malformed
    InvalidInput,
}

/// Rejections produced by the game registry and bet ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("bet {0} not found")]
    BetNotFound(BetId),

    #[error("game {game_id} is {status}, bets can only be placed on scheduled games")]
    GameNotScheduled { game_id: GameId, status: GameStatus },

    #[error("game {game_id} is {status}, expected final")]
    GameNotFinal { game_id: GameId, status: GameStatus },

    #[error("bet {bet_id} is {status}, expected open")]
    BetNotOpen { bet_id: BetId, status: BetStatus },

    #[error("bet {bet_id} is {status}, expected accepted")]
    BetNotAccepted { bet_id: BetId, status: BetStatus },

    #[error("{user} cannot accept their own bet {bet_id}")]
    SelfAcceptance { bet_id: BetId, user: UserId },

    #[error("only the creator of bet {bet_id} may cancel it, not {user}")]
    NotCreator { bet_id: BetId, user: UserId },

    #[error("stake must be a positive amount, got {0}")]
    InvalidAmount(f64),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::GameNotFound(_) | LedgerError::BetNotFound(_) => ErrorKind::NotFound,
            LedgerError::GameNotScheduled { .. }
            | LedgerError::GameNotFinal { .. }
            | LedgerError::BetNotOpen { .. }
            | LedgerError::BetNotAccepted { .. }
            | LedgerError::SelfAcceptance { .. }
            | LedgerError::NotCreator { .. } => ErrorKind::InvalidState,
            LedgerError::InvalidAmount(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl From<toml::de::Error> for ConfigurationError {
    fn from(e: toml::de::Error) -> Self {
        ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e))
    }
}

pub type BookieResult<T> = Result<T, BookieError>;

/// Result alias for registry and ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
