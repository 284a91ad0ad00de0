//! Game registry
//!
//! Owns every `Game` record. The registry never looks at bets; the ledger
//! reads games through `lookup` when it needs an eligibility check.

use crate::errors::{LedgerError, LedgerResult};
use crate::games::types::{Game, GameId, GameStatus};
use crate::store::KeyedStore;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

#[derive(Default)]
pub struct GameRegistry {
    games: KeyedStore<GameId, Game>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new scheduled game
    pub fn register(
        &self,
        sport: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Game {
        let game = Game::scheduled(sport.into(), home_team.into(), away_team.into(), start_time);
        self.games.insert(game.id.clone(), game.clone());

        info!(
            game_id = %game.id,
            sport = %game.sport,
            home = %game.home_team,
            away = %game.away_team,
            "Registered game"
        );
        game
    }

    pub fn lookup(&self, game_id: &GameId) -> Option<Game> {
        self.games.get(game_id)
    }

    /// Games still open for betting, in registration order
    pub fn list_upcoming(&self) -> Vec<Game> {
        self.games.filter(Game::is_scheduled)
    }

    pub fn list_all(&self) -> Vec<Game> {
        self.games.filter(|_| true)
    }

    /// Move a scheduled game to live, closing it for new bets
    pub fn start(&self, game_id: &GameId) -> LedgerResult<Game> {
        self.games
            .update(game_id, |game| {
                if game.status != GameStatus::Scheduled {
                    debug!(game_id = %game_id, status = %game.status, "Rejected game start");
                    return Err(LedgerError::GameNotScheduled {
                        game_id: game_id.clone(),
                        status: game.status,
                    });
                }
                game.status = GameStatus::Live;
                info!(game_id = %game_id, "Game is live");
                Ok(game.clone())
            })
            .unwrap_or_else(|| Err(LedgerError::GameNotFound(game_id.clone())))
    }

    /// Record the final score and mark the game final.
    ///
    /// Applies from any status. Reporting again on a final game overwrites the
    /// previous scores.
    pub fn report_final_score(
        &self,
        game_id: &GameId,
        home_score: u32,
        away_score: u32,
    ) -> LedgerResult<Game> {
        self.games
            .update(game_id, |game| {
                if game.is_final() {
                    warn!(
                        game_id = %game_id,
                        previous_home = ?game.home_score,
                        previous_away = ?game.away_score,
                        home_score,
                        away_score,
                        "Overwriting final score of an already final game"
                    );
                }
                game.home_score = Some(home_score);
                game.away_score = Some(away_score);
                game.status = GameStatus::Final;

                info!(game_id = %game_id, home_score, away_score, "Game final");
                game.clone()
            })
            .ok_or_else(|| LedgerError::GameNotFound(game_id.clone()))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
