//! Bet ledger
//!
//! Owns every `Bet` record and enforces the bet lifecycle:
//!
//! ```text
//! open --accept--> accepted --settle--> settled
//!   \--cancel--> cancelled
//! ```
//!
//! Games are read from a `GameRegistry` passed in by the caller, so several
//! independent ledgers can coexist. Each transition runs under the bet's store
//! write guard, which gives at most one acceptor and at most one settlement
//! per bet even with concurrent callers.

use crate::bets::settlement::SettlementEngine;
use crate::bets::types::{Bet, BetId, BetStatus, NewBet, UserId};
use crate::config::LedgerConfig;
use crate::errors::{LedgerError, LedgerResult};
use crate::games::registry::GameRegistry;
use crate::games::types::GameId;
use crate::store::KeyedStore;
use chrono::Utc;
use tracing::{debug, info};

pub struct BetLedger {
    bets: KeyedStore<BetId, Bet>,
    engine: SettlementEngine,
    allow_self_accept: bool,
}

impl BetLedger {
    pub fn new() -> Self {
        Self::with_config(&LedgerConfig::default())
    }

    pub fn with_config(config: &LedgerConfig) -> Self {
        Self {
            bets: KeyedStore::new(),
            engine: SettlementEngine::new(config.push_policy),
            allow_self_accept: config.allow_self_accept,
        }
    }

    pub fn engine(&self) -> &SettlementEngine {
        &self.engine
    }

    /// Open a new bet on a scheduled game
    pub fn create(&self, games: &GameRegistry, request: NewBet) -> LedgerResult<Bet> {
        self.try_create(games, request)
            .inspect_err(|e| debug!(error = %e, "Rejected bet creation"))
    }

    fn try_create(&self, games: &GameRegistry, request: NewBet) -> LedgerResult<Bet> {
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(request.amount));
        }

        let game = games
            .lookup(&request.game_id)
            .ok_or_else(|| LedgerError::GameNotFound(request.game_id.clone()))?;
        if !game.is_scheduled() {
            return Err(LedgerError::GameNotScheduled {
                game_id: game.id,
                status: game.status,
            });
        }

        let bet = Bet::open(
            request.creator,
            request.game_id,
            request.bet_type,
            request.odds,
            request.amount,
        );
        self.bets.insert(bet.id.clone(), bet.clone());

        info!(
            bet_id = %bet.id,
            game_id = %bet.game_id,
            creator = %bet.creator,
            bet_type = %bet.bet_type,
            amount = bet.amount,
            "Bet created"
        );
        Ok(bet)
    }

    /// Take the other side of an open bet
    pub fn accept(&self, bet_id: &BetId, acceptor: UserId) -> LedgerResult<Bet> {
        self.bets
            .update(bet_id, |bet| {
                if bet.status != BetStatus::Open {
                    return Err(LedgerError::BetNotOpen {
                        bet_id: bet_id.clone(),
                        status: bet.status,
                    });
                }
                if !self.allow_self_accept && bet.creator == acceptor {
                    return Err(LedgerError::SelfAcceptance {
                        bet_id: bet_id.clone(),
                        user: acceptor,
                    });
                }

                bet.acceptor = Some(acceptor);
                bet.status = BetStatus::Accepted;
                bet.accepted_at = Some(Utc::now());

                info!(bet_id = %bet_id, acceptor = ?bet.acceptor, "Bet accepted");
                Ok(bet.clone())
            })
            .unwrap_or_else(|| Err(LedgerError::BetNotFound(bet_id.clone())))
            .inspect_err(|e| debug!(error = %e, "Rejected bet acceptance"))
    }

    /// Settle an accepted bet against its final game
    pub fn settle(&self, bet_id: &BetId, games: &GameRegistry) -> LedgerResult<Bet> {
        self.bets
            .update(bet_id, |bet| -> LedgerResult<Bet> {
                if bet.status != BetStatus::Accepted {
                    return Err(LedgerError::BetNotAccepted {
                        bet_id: bet_id.clone(),
                        status: bet.status,
                    });
                }

                let game = games
                    .lookup(&bet.game_id)
                    .ok_or_else(|| LedgerError::GameNotFound(bet.game_id.clone()))?;
                if !game.is_final() {
                    return Err(LedgerError::GameNotFinal {
                        game_id: game.id,
                        status: game.status,
                    });
                }

                let outcome = self.engine.outcome(bet, &game);
                bet.winner = outcome.winner(bet);
                bet.outcome = Some(outcome);
                bet.status = BetStatus::Settled;
                bet.settled_at = Some(Utc::now());

                info!(
                    bet_id = %bet_id,
                    game_id = %bet.game_id,
                    outcome = %outcome,
                    winner = ?bet.winner,
                    "Bet settled"
                );
                Ok(bet.clone())
            })
            .unwrap_or_else(|| Err(LedgerError::BetNotFound(bet_id.clone())))
            .inspect_err(|e| debug!(error = %e, "Rejected bet settlement"))
    }

    /// Settle every accepted bet on a final game.
    ///
    /// Returns the bets settled by this call; open and already settled bets
    /// are left alone.
    pub fn settle_game(&self, game_id: &GameId, games: &GameRegistry) -> LedgerResult<Vec<Bet>> {
        let game = games
            .lookup(game_id)
            .ok_or_else(|| LedgerError::GameNotFound(game_id.clone()))?;
        if !game.is_final() {
            return Err(LedgerError::GameNotFinal {
                game_id: game.id,
                status: game.status,
            });
        }

        let settled: Vec<Bet> = self
            .bets
            .filter(|bet| &bet.game_id == game_id && bet.status == BetStatus::Accepted)
            .into_iter()
            .filter_map(|bet| self.settle(&bet.id, games).ok())
            .collect();

        info!(game_id = %game_id, settled = settled.len(), "Settled game");
        Ok(settled)
    }

    /// Withdraw an open bet. Only its creator may do this.
    pub fn cancel(&self, bet_id: &BetId, requester: &UserId) -> LedgerResult<Bet> {
        self.bets
            .update(bet_id, |bet| {
                if &bet.creator != requester {
                    return Err(LedgerError::NotCreator {
                        bet_id: bet_id.clone(),
                        user: requester.clone(),
                    });
                }
                if bet.status != BetStatus::Open {
                    return Err(LedgerError::BetNotOpen {
                        bet_id: bet_id.clone(),
                        status: bet.status,
                    });
                }

                bet.status = BetStatus::Cancelled;
                bet.cancelled_at = Some(Utc::now());

                info!(bet_id = %bet_id, "Bet cancelled");
                Ok(bet.clone())
            })
            .unwrap_or_else(|| Err(LedgerError::BetNotFound(bet_id.clone())))
            .inspect_err(|e| debug!(error = %e, "Rejected bet cancellation"))
    }

    pub fn lookup(&self, bet_id: &BetId) -> Option<Bet> {
        self.bets.get(bet_id)
    }

    pub fn list_open(&self) -> Vec<Bet> {
        self.bets.filter(|bet| bet.status == BetStatus::Open)
    }

    /// All bets on a game, any status
    pub fn list_for_game(&self, game_id: &GameId) -> Vec<Bet> {
        self.bets.filter(|bet| &bet.game_id == game_id)
    }

    /// Bets the user created or accepted, any status
    pub fn list_for_user(&self, user: &UserId) -> Vec<Bet> {
        self.bets.filter(|bet| bet.involves(user))
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }
}

impl Default for BetLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bets::settlement::{PushPolicy, SettlementOutcome};
    use crate::bets::types::{BetOdds, BetType};
    use crate::games::types::{Game, GameStatus};

    struct Fixture {
        games: GameRegistry,
        ledger: BetLedger,
        game: Game,
    }

    fn fixture() -> Fixture {
        let games = GameRegistry::new();
        let game = games.register("NBA", "Lakers", "Warriors", Utc::now());
        Fixture {
            games,
            ledger: BetLedger::new(),
            game,
        }
    }

    fn moneyline(game_id: &GameId, creator: &str, selection: &str) -> NewBet {
        NewBet {
            creator: UserId::from(creator),
            game_id: game_id.clone(),
            bet_type: BetType::Moneyline,
            odds: BetOdds {
                bet_type: BetType::Moneyline,
                line: None,
                odds: -110,
                selection: selection.to_string(),
            },
            amount: 50.0,
        }
    }

    #[test]
    fn test_create_opens_bet() {
        let f = fixture();
        let bet = f.ledger.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")).unwrap();

        assert_eq!(bet.status, BetStatus::Open);
        assert!(bet.acceptor.is_none());
        assert!(bet.winner.is_none());
        assert_eq!(f.ledger.lookup(&bet.id), Some(bet));
    }

    #[test]
    fn test_create_rejects_unknown_game() {
        let f = fixture();
        let missing = GameId::from("game_missing");

        assert_eq!(
            f.ledger.create(&f.games, moneyline(&missing, "alice", "Lakers")),
            Err(LedgerError::GameNotFound(missing))
        );
        assert!(f.ledger.is_empty());
    }

    #[test]
    fn test_create_rejects_live_and_final_games() {
        let f = fixture();
        let final_game = f.games.register("NBA", "Celtics", "Heat", Utc::now());
        f.games.start(&f.game.id).unwrap();
        f.games.report_final_score(&final_game.id, 99, 98).unwrap();

        assert!(matches!(
            f.ledger.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")),
            Err(LedgerError::GameNotScheduled { status: GameStatus::Live, .. })
        ));
        assert!(matches!(
            f.ledger.create(&f.games, moneyline(&final_game.id, "alice", "Celtics")),
            Err(LedgerError::GameNotScheduled { status: GameStatus::Final, .. })
        ));
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        let f = fixture();
        for amount in [0.0, -5.0, f64::NAN] {
            let mut request = moneyline(&f.game.id, "alice", "Lakers");
            request.amount = amount;
            assert!(matches!(
                f.ledger.create(&f.games, request),
                Err(LedgerError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn test_accept_only_once() {
        let f = fixture();
        let bet = f.ledger.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")).unwrap();

        let accepted = f.ledger.accept(&bet.id, UserId::from("bob")).unwrap();
        assert_eq!(accepted.status, BetStatus::Accepted);
        assert_eq!(accepted.acceptor, Some(UserId::from("bob")));
        assert!(accepted.accepted_at.is_some());

        assert!(matches!(
            f.ledger.accept(&bet.id, UserId::from("carol")),
            Err(LedgerError::BetNotOpen { status: BetStatus::Accepted, .. })
        ));
        assert_eq!(f.ledger.lookup(&bet.id).unwrap().acceptor, Some(UserId::from("bob")));
    }

    #[test]
    fn test_accept_unknown_bet() {
        let f = fixture();
        let missing = BetId::from("bet_missing");

        assert_eq!(
            f.ledger.accept(&missing, UserId::from("bob")),
            Err(LedgerError::BetNotFound(missing))
        );
    }

    #[test]
    fn test_self_acceptance_is_configurable() {
        let f = fixture();
        let bet = f.ledger.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")).unwrap();
        assert!(f.ledger.accept(&bet.id, UserId::from("alice")).is_ok());

        let strict = BetLedger::with_config(&LedgerConfig {
            allow_self_accept: false,
            ..LedgerConfig::default()
        });
        let bet = strict.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")).unwrap();
        assert!(matches!(
            strict.accept(&bet.id, UserId::from("alice")),
            Err(LedgerError::SelfAcceptance { .. })
        ));
        assert_eq!(strict.lookup(&bet.id).unwrap().status, BetStatus::Open);
    }

    #[test]
    fn test_settle_requires_accepted_bet_and_final_game() {
        let f = fixture();
        let bet = f.ledger.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")).unwrap();

        assert!(matches!(
            f.ledger.settle(&bet.id, &f.games),
            Err(LedgerError::BetNotAccepted { status: BetStatus::Open, .. })
        ));

        f.ledger.accept(&bet.id, UserId::from("bob")).unwrap();
        assert!(matches!(
            f.ledger.settle(&bet.id, &f.games),
            Err(LedgerError::GameNotFinal { status: GameStatus::Scheduled, .. })
        ));

        f.games.report_final_score(&f.game.id, 110, 100).unwrap();
        let settled = f.ledger.settle(&bet.id, &f.games).unwrap();
        assert_eq!(settled.status, BetStatus::Settled);
        assert_eq!(settled.winner, Some(UserId::from("alice")));
        assert_eq!(settled.outcome, Some(SettlementOutcome::CreatorWins));
        assert!(settled.settled_at.is_some());

        assert!(matches!(
            f.ledger.settle(&bet.id, &f.games),
            Err(LedgerError::BetNotAccepted { status: BetStatus::Settled, .. })
        ));
    }

    #[test]
    fn test_settle_prop_without_winner() {
        let f = fixture();
        let mut request = moneyline(&f.game.id, "alice", "LeBron triple double");
        request.bet_type = BetType::Prop;
        let bet = f.ledger.create(&f.games, request).unwrap();
        f.ledger.accept(&bet.id, UserId::from("bob")).unwrap();
        f.games.report_final_score(&f.game.id, 110, 100).unwrap();

        let settled = f.ledger.settle(&bet.id, &f.games).unwrap();
        assert_eq!(settled.status, BetStatus::Settled);
        assert!(settled.winner.is_none());
        assert_eq!(settled.outcome, Some(SettlementOutcome::Unresolved));
    }

    #[test]
    fn test_strict_push_policy_flows_through_ledger() {
        let f = fixture();
        let ledger = BetLedger::with_config(&LedgerConfig {
            push_policy: PushPolicy::StrictComparison,
            ..LedgerConfig::default()
        });
        let bet = ledger.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")).unwrap();
        ledger.accept(&bet.id, UserId::from("bob")).unwrap();
        f.games.report_final_score(&f.game.id, 100, 100).unwrap();

        let settled = ledger.settle(&bet.id, &f.games).unwrap();
        assert_eq!(settled.winner, Some(UserId::from("bob")));
    }

    #[test]
    fn test_settle_game_settles_only_accepted_bets() {
        let f = fixture();
        let open = f.ledger.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")).unwrap();
        let accepted = f.ledger.create(&f.games, moneyline(&f.game.id, "carol", "Warriors")).unwrap();
        f.ledger.accept(&accepted.id, UserId::from("dave")).unwrap();

        assert!(matches!(
            f.ledger.settle_game(&f.game.id, &f.games),
            Err(LedgerError::GameNotFinal { .. })
        ));

        f.games.report_final_score(&f.game.id, 90, 100).unwrap();
        let settled = f.ledger.settle_game(&f.game.id, &f.games).unwrap();

        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].id, accepted.id);
        assert_eq!(settled[0].winner, Some(UserId::from("carol")));
        assert_eq!(f.ledger.lookup(&open.id).unwrap().status, BetStatus::Open);
        assert!(f.ledger.settle_game(&f.game.id, &f.games).unwrap().is_empty());
    }

    #[test]
    fn test_cancel_by_creator_from_open_only() {
        let f = fixture();
        let bet = f.ledger.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")).unwrap();

        assert!(matches!(
            f.ledger.cancel(&bet.id, &UserId::from("bob")),
            Err(LedgerError::NotCreator { .. })
        ));

        let cancelled = f.ledger.cancel(&bet.id, &UserId::from("alice")).unwrap();
        assert_eq!(cancelled.status, BetStatus::Cancelled);
        assert!(cancelled.cancelled_at.is_some());

        assert!(matches!(
            f.ledger.accept(&bet.id, UserId::from("bob")),
            Err(LedgerError::BetNotOpen { status: BetStatus::Cancelled, .. })
        ));
        assert!(f.ledger.list_open().is_empty());
    }

    #[test]
    fn test_listings() {
        let f = fixture();
        let other = f.games.register("NFL", "Chiefs", "Bills", Utc::now());
        let first = f.ledger.create(&f.games, moneyline(&f.game.id, "alice", "Lakers")).unwrap();
        let second = f.ledger.create(&f.games, moneyline(&other.id, "bob", "Bills")).unwrap();
        let third = f.ledger.create(&f.games, moneyline(&f.game.id, "carol", "Warriors")).unwrap();
        f.ledger.accept(&third.id, UserId::from("alice")).unwrap();

        let ids = |bets: Vec<Bet>| bets.into_iter().map(|b| b.id).collect::<Vec<_>>();

        assert_eq!(ids(f.ledger.list_open()), vec![first.id.clone(), second.id.clone()]);
        assert_eq!(ids(f.ledger.list_for_game(&f.game.id)), vec![first.id.clone(), third.id.clone()]);
        assert_eq!(ids(f.ledger.list_for_user(&UserId::from("alice"))), vec![first.id, third.id]);
        assert_eq!(ids(f.ledger.list_for_user(&UserId::from("bob"))), vec![second.id]);

        assert_eq!(f.ledger.list_open(), f.ledger.list_open());
    }
}
