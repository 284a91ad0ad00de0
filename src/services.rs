//! Service layer
//!
//! `Sportsbook` owns one game registry and one bet ledger and exposes the
//! operations external adapters call. Instances are independent; nothing is
//! process-global.

use crate::bets::{format_bet, Bet, BetId, BetLedger, NewBet, UserId};
use crate::config::LedgerConfig;
use crate::errors::{LedgerError, LedgerResult};
use crate::games::{Game, GameId, GameRegistry};
use chrono::{DateTime, Utc};

#[derive(Default)]
pub struct Sportsbook {
    games: GameRegistry,
    bets: BetLedger,
}

impl Sportsbook {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            games: GameRegistry::new(),
            bets: BetLedger::with_config(config),
        }
    }

    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    pub fn bets(&self) -> &BetLedger {
        &self.bets
    }

    pub fn schedule_game(
        &self,
        sport: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Game {
        self.games.register(sport, home_team, away_team, start_time)
    }

    pub fn game(&self, game_id: &GameId) -> LedgerResult<Game> {
        self.games
            .lookup(game_id)
            .ok_or_else(|| LedgerError::GameNotFound(game_id.clone()))
    }

    pub fn upcoming_games(&self) -> Vec<Game> {
        self.games.list_upcoming()
    }

    pub fn all_games(&self) -> Vec<Game> {
        self.games.list_all()
    }

    pub fn start_game(&self, game_id: &GameId) -> LedgerResult<Game> {
        self.games.start(game_id)
    }

    pub fn report_final_score(
        &self,
        game_id: &GameId,
        home_score: u32,
        away_score: u32,
    ) -> LedgerResult<Game> {
        self.games.report_final_score(game_id, home_score, away_score)
    }

    pub fn place_bet(&self, request: NewBet) -> LedgerResult<Bet> {
        self.bets.create(&self.games, request)
    }

    pub fn accept_bet(&self, bet_id: &BetId, acceptor: UserId) -> LedgerResult<Bet> {
        self.bets.accept(bet_id, acceptor)
    }

    pub fn settle_bet(&self, bet_id: &BetId) -> LedgerResult<Bet> {
        self.bets.settle(bet_id, &self.games)
    }

    pub fn settle_game(&self, game_id: &GameId) -> LedgerResult<Vec<Bet>> {
        self.bets.settle_game(game_id, &self.games)
    }

    pub fn cancel_bet(&self, bet_id: &BetId, requester: &UserId) -> LedgerResult<Bet> {
        self.bets.cancel(bet_id, requester)
    }

    pub fn bet(&self, bet_id: &BetId) -> LedgerResult<Bet> {
        self.bets
            .lookup(bet_id)
            .ok_or_else(|| LedgerError::BetNotFound(bet_id.clone()))
    }

    pub fn open_bets(&self) -> Vec<Bet> {
        self.bets.list_open()
    }

    pub fn bets_for_game(&self, game_id: &GameId) -> Vec<Bet> {
        self.bets.list_for_game(game_id)
    }

    pub fn bets_for_user(&self, user: &UserId) -> Vec<Bet> {
        self.bets.list_for_user(user)
    }

    /// Render a bet's one-line summary
    pub fn format_bet(&self, bet_id: &BetId) -> LedgerResult<String> {
        let bet = self.bet(bet_id)?;
        let game = self.game(&bet.game_id)?;
        Ok(format_bet(&bet, &game))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bets::{BetOdds, BetStatus, BetType};

    #[test]
    fn test_independent_instances() {
        let first = Sportsbook::default();
        let second = Sportsbook::default();

        let game = first.schedule_game("NBA", "Lakers", "Warriors", Utc::now());

        assert!(first.game(&game.id).is_ok());
        assert_eq!(second.game(&game.id), Err(LedgerError::GameNotFound(game.id)));
        assert!(second.all_games().is_empty());
    }

    #[test]
    fn test_format_bet_by_id() {
        let book = Sportsbook::default();
        let game = book.schedule_game("NBA", "Lakers", "Warriors", Utc::now());
        let bet = book
            .place_bet(NewBet {
                creator: UserId::from("alice"),
                game_id: game.id,
                bet_type: BetType::OverUnder,
                odds: BetOdds {
                    bet_type: BetType::OverUnder,
                    line: Some(215.5),
                    odds: -110,
                    selection: "Over".to_string(),
                },
                amount: 20.0,
            })
            .unwrap();

        assert_eq!(book.format_bet(&bet.id).unwrap(), "Warriors @ Lakers - Over 215.5 - $20");
        assert_eq!(bet.status, BetStatus::Open);
        assert!(matches!(
            book.format_bet(&BetId::from("bet_missing")),
            Err(LedgerError::BetNotFound(_))
        ));
    }
}
