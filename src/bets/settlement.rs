//! Settlement engine
//!
//! Pure rules that turn a final score into a settlement outcome for an
//! accepted bet. Nothing here mutates a bet or a game; the ledger applies the
//! result.

use crate::bets::types::{Bet, BetType, UserId};
use crate::games::types::Game;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Selection label that marks the creator as backing the total going over
pub const OVER_SELECTION: &str = "Over";

/// Result of settling one bet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SettlementOutcome {
    CreatorWins,
    AcceptorWins,
    /// Exact tie against the line, or a level moneyline score
    Push,
    /// No rule applies: prop bets, missing scores or a missing acceptor
    Unresolved,
}

impl SettlementOutcome {
    /// The winning party of `bet`, if the outcome names one
    pub fn winner(&self, bet: &Bet) -> Option<UserId> {
        match self {
            SettlementOutcome::CreatorWins => Some(bet.creator.clone()),
            SettlementOutcome::AcceptorWins => bet.acceptor.clone(),
            SettlementOutcome::Push | SettlementOutcome::Unresolved => None,
        }
    }
}

impl fmt::Display for SettlementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementOutcome::CreatorWins => write!(f, "creator_wins"),
            SettlementOutcome::AcceptorWins => write!(f, "acceptor_wins"),
            SettlementOutcome::Push => write!(f, "push"),
            SettlementOutcome::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// How exact ties against the line are resolved
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PushPolicy {
    /// Ties settle as `Push` with no winner
    #[default]
    Void,
    /// Ties fall wherever the strict comparisons put them: a level moneyline
    /// makes the away team the winning team, and a spread or total push goes
    /// to the acceptor
    StrictComparison,
}

impl std::str::FromStr for PushPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "void" => Ok(PushPolicy::Void),
            "strict_comparison" => Ok(PushPolicy::StrictComparison),
            other => Err(format!("unknown push policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementEngine {
    push_policy: PushPolicy,
}

impl SettlementEngine {
    pub fn new(push_policy: PushPolicy) -> Self {
        Self { push_policy }
    }

    pub fn push_policy(&self) -> PushPolicy {
        self.push_policy
    }

    /// Winner identity for `bet` given its final `game`, or `None` when the
    /// outcome has no winner
    pub fn determine_winner(&self, bet: &Bet, game: &Game) -> Option<UserId> {
        self.outcome(bet, game).winner(bet)
    }

    pub fn outcome(&self, bet: &Bet, game: &Game) -> SettlementOutcome {
        let Some((home, away)) = game.final_score() else {
            return SettlementOutcome::Unresolved;
        };
        if bet.acceptor.is_none() {
            return SettlementOutcome::Unresolved;
        }

        match bet.bet_type {
            BetType::Moneyline => self.moneyline(bet, game, home, away),
            BetType::Spread => {
                // Positive when the home side covers
                let spread_result = f64::from(home) + bet.odds.line_or_zero() - f64::from(away);
                let creator_margin = if bet.odds.selection.contains(game.home_team.as_str()) {
                    spread_result
                } else {
                    -spread_result
                };
                self.against_line(creator_margin)
            }
            BetType::OverUnder => {
                let total = f64::from(home) + f64::from(away);
                let line = bet.odds.line_or_zero();
                let creator_margin = if bet.odds.selection == OVER_SELECTION {
                    total - line
                } else {
                    line - total
                };
                self.against_line(creator_margin)
            }
            BetType::Prop => SettlementOutcome::Unresolved,
        }
    }

    fn moneyline(&self, bet: &Bet, game: &Game, home: u32, away: u32) -> SettlementOutcome {
        let winning_team = match home.cmp(&away) {
            Ordering::Greater => &game.home_team,
            Ordering::Less => &game.away_team,
            Ordering::Equal => match self.push_policy {
                PushPolicy::Void => return SettlementOutcome::Push,
                PushPolicy::StrictComparison => &game.away_team,
            },
        };

        if bet.odds.selection == *winning_team {
            SettlementOutcome::CreatorWins
        } else {
            SettlementOutcome::AcceptorWins
        }
    }

    /// `creator_margin` is how far the creator's side finished beyond the line
    fn against_line(&self, creator_margin: f64) -> SettlementOutcome {
        if creator_margin > 0.0 {
            SettlementOutcome::CreatorWins
        } else if creator_margin < 0.0 {
            SettlementOutcome::AcceptorWins
        } else {
            match self.push_policy {
                PushPolicy::Void => SettlementOutcome::Push,
                PushPolicy::StrictComparison => SettlementOutcome::AcceptorWins,
            }
        }
    }
}
