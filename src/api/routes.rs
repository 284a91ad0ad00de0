//! Route Definitions

use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        // Games
        .route("/games", get(list_games_handler).post(create_game_handler))
        .route("/games/upcoming", get(upcoming_games_handler))
        .route("/games/:game_id", get(game_detail_handler))
        .route("/games/:game_id/start", post(start_game_handler))
        .route("/games/:game_id/score", post(report_score_handler))
        .route("/games/:game_id/settle", post(settle_game_handler))
        .route("/games/:game_id/bets", get(game_bets_handler))
        // Bets
        .route("/bets", post(create_bet_handler))
        .route("/bets/open", get(open_bets_handler))
        .route("/bets/:bet_id", get(bet_detail_handler))
        .route("/bets/:bet_id/accept", post(accept_bet_handler))
        .route("/bets/:bet_id/settle", post(settle_bet_handler))
        .route("/bets/:bet_id/cancel", post(cancel_bet_handler))
        .route("/users/:user_id/bets", get(user_bets_handler))
        .with_state(state)
}
