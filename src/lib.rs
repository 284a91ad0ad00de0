//! Bookie - peer-to-peer sports wager ledger
//!
//! Users propose wagers on scheduled games, other users take the opposite
//! side, and once a final score is reported each accepted bet is settled
//! under moneyline, spread, over/under or prop rules.
//!
//! The core is synchronous and in-memory: [`games::GameRegistry`] holds the
//! schedule and results, [`bets::BetLedger`] holds wagers and their
//! lifecycle, and [`bets::SettlementEngine`] decides winners.
//! [`services::Sportsbook`] bundles one of each; [`api`] exposes it over HTTP.

pub mod api;
pub mod bets;
pub mod config;
pub mod errors;
pub mod games;
pub mod services;
pub mod store;

pub use bets::{
    format_bet, Bet, BetId, BetLedger, BetOdds, BetStatus, BetType, NewBet, PushPolicy,
    SettlementEngine, SettlementOutcome, UserId,
};
pub use config::{BookieConfig, ConfigLoader};
pub use errors::{BookieError, BookieResult, ErrorKind, LedgerError, LedgerResult};
pub use games::{Game, GameId, GameRegistry, GameStatus};
pub use services::Sportsbook;
