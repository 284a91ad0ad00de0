//! Request Handlers
//!
//! Each handler maps one sportsbook operation onto JSON in and out.

use super::{errors::ApiError, middleware::RequestId, models::*};
use crate::bets::{Bet, BetId, NewBet, UserId};
use crate::errors::LedgerError;
use crate::games::{Game, GameId};
use crate::services::Sportsbook;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub book: Sportsbook,
    pub version: String,
}

impl AppState {
    pub fn new(book: Sportsbook) -> Self {
        Self {
            book,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

fn rejected(request_id: RequestId) -> impl FnOnce(LedgerError) -> ApiError {
    move |err| ApiError::from_ledger(request_id.0, err)
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
        version: state.version.clone(),
    })
}

/// POST /games
pub async fn create_game_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGameRequest>,
) -> (StatusCode, Json<Game>) {
    let game = state
        .book
        .schedule_game(req.sport, req.home_team, req.away_team, req.start_time);
    (StatusCode::CREATED, Json(game))
}

/// GET /games
pub async fn list_games_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Game>> {
    Json(state.book.all_games())
}

/// GET /games/upcoming
pub async fn upcoming_games_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Game>> {
    Json(state.book.upcoming_games())
}

/// GET /games/:game_id
pub async fn game_detail_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> Result<Json<Game>, ApiError> {
    state
        .book
        .game(&game_id)
        .map(Json)
        .map_err(rejected(request_id))
}

/// POST /games/:game_id/start
pub async fn start_game_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> Result<Json<Game>, ApiError> {
    state
        .book
        .start_game(&game_id)
        .map(Json)
        .map_err(rejected(request_id))
}

/// POST /games/:game_id/score
pub async fn report_score_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
    Json(req): Json<ReportScoreRequest>,
) -> Result<Json<Game>, ApiError> {
    state
        .book
        .report_final_score(&game_id, req.home_score, req.away_score)
        .map(Json)
        .map_err(rejected(request_id))
}

/// POST /games/:game_id/settle
pub async fn settle_game_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> Result<Json<Vec<Bet>>, ApiError> {
    state
        .book
        .settle_game(&game_id)
        .map(Json)
        .map_err(rejected(request_id))
}

/// GET /games/:game_id/bets
pub async fn game_bets_handler(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> Json<Vec<Bet>> {
    Json(state.book.bets_for_game(&game_id))
}

/// POST /bets
pub async fn create_bet_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewBet>,
) -> Result<(StatusCode, Json<Bet>), ApiError> {
    let bet = state
        .book
        .place_bet(req)
        .map_err(rejected(request_id))?;
    Ok((StatusCode::CREATED, Json(bet)))
}

/// GET /bets/open
pub async fn open_bets_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Bet>> {
    Json(state.book.open_bets())
}

/// GET /bets/:bet_id
pub async fn bet_detail_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(bet_id): Path<BetId>,
) -> Result<Json<BetView>, ApiError> {
    let bet = state
        .book
        .bet(&bet_id)
        .map_err(rejected(request_id.clone()))?;
    let summary = state
        .book
        .format_bet(&bet_id)
        .map_err(rejected(request_id))?;
    Ok(Json(BetView { bet, summary }))
}

/// POST /bets/:bet_id/accept
pub async fn accept_bet_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(bet_id): Path<BetId>,
    Json(req): Json<AcceptBetRequest>,
) -> Result<Json<Bet>, ApiError> {
    state
        .book
        .accept_bet(&bet_id, req.acceptor)
        .map(Json)
        .map_err(rejected(request_id))
}

/// POST /bets/:bet_id/settle
pub async fn settle_bet_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(bet_id): Path<BetId>,
) -> Result<Json<Bet>, ApiError> {
    state
        .book
        .settle_bet(&bet_id)
        .map(Json)
        .map_err(rejected(request_id))
}

/// POST /bets/:bet_id/cancel
pub async fn cancel_bet_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(bet_id): Path<BetId>,
    Json(req): Json<CancelBetRequest>,
) -> Result<Json<Bet>, ApiError> {
    state
        .book
        .cancel_bet(&bet_id, &req.requester)
        .map(Json)
        .map_err(rejected(request_id))
}

/// GET /users/:user_id/bets
pub async fn user_bets_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> Json<Vec<Bet>> {
    Json(state.book.bets_for_user(&user_id))
}
