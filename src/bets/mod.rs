//! Bet ledger, settlement rules and bet rendering

pub mod format;
pub mod ledger;
pub mod settlement;
pub mod types;

pub use format::{describe_selection, format_bet};
pub use ledger::BetLedger;
pub use settlement::{PushPolicy, SettlementEngine, SettlementOutcome};
pub use types::*;
