//! One-line bet summaries for chat and API consumers

use crate::bets::types::{Bet, BetType};
use crate::games::types::Game;

/// What the creator picked, phrased per wager type
pub fn describe_selection(bet: &Bet) -> String {
    match (bet.bet_type, bet.odds.line) {
        (BetType::OverUnder, Some(line)) => format!("{} {}", bet.odds.selection, line),
        _ => bet.odds.selection.clone(),
    }
}

/// `"<away> @ <home> - <selection> - $<amount>"`
pub fn format_bet(bet: &Bet, game: &Game) -> String {
    format!(
        "{} @ {} - {} - ${}",
        game.away_team,
        game.home_team,
        describe_selection(bet),
        bet.amount
    )
}
