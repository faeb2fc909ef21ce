use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::GameError,
    models::{GameState, Placement},
    AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    pub p1_name: Option<String>,
    pub p2_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndTurnRequest {
    pub game_id: Option<i64>,
    /// `[[x, y, "L"], ...]`
    pub letters: Option<Vec<(i64, i64, String)>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub game_id: i64,
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = match &self {
            GameError::GameNotFound(_) => StatusCode::NOT_FOUND,
            GameError::GameAlreadyOver | GameError::Conflict(_) => StatusCode::CONFLICT,
            GameError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            err if err.is_rule_violation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Start a new game between two named players
pub async fn start_game(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<Json<GameState>, GameError> {
    let Json(payload) = payload.map_err(|e| log_rejection(GameError::InvalidInput(e.body_text())))?;

    let p1_name = payload.p1_name.unwrap_or_default();
    let p2_name = payload.p2_name.unwrap_or_default();

    let game = state
        .games
        .start_game(&p1_name, &p2_name)
        .await
        .map_err(log_rejection)?;

    Ok(Json(game))
}

/// Play letters for whoever's turn it is
pub async fn end_turn(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EndTurnRequest>, JsonRejection>,
) -> Result<Json<GameState>, GameError> {
    let Json(payload) = payload.map_err(|e| log_rejection(GameError::InvalidInput(e.body_text())))?;

    let game_id = payload
        .game_id
        .ok_or_else(|| log_rejection(GameError::InvalidInput("gameId is required".to_string())))?;
    let letters = payload
        .letters
        .ok_or_else(|| log_rejection(GameError::InvalidInput("letters is required".to_string())))?;
    let placements = parse_placements(letters).map_err(log_rejection)?;

    let game = state
        .games
        .end_turn(game_id, &placements)
        .await
        .map_err(log_rejection)?;

    Ok(Json(game))
}

/// Fetch the current state of a game
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<GameState>, GameError> {
    let Query(query) = query.map_err(|e| log_rejection(GameError::InvalidInput(e.body_text())))?;

    let game = state
        .games
        .get_status(query.game_id)
        .await
        .map_err(log_rejection)?;

    Ok(Json(game))
}

/// Each letter must be a single character; letters are matched upper-case
fn parse_placements(letters: Vec<(i64, i64, String)>) -> Result<Vec<Placement>, GameError> {
    letters
        .into_iter()
        .map(|(x, y, letter)| {
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Placement::new(x, y, c.to_ascii_uppercase())),
                _ => Err(GameError::InvalidInput(format!(
                    "letter at ({}, {}) must be a single character, got '{}'",
                    x, y, letter
                ))),
            }
        })
        .collect()
}

fn log_rejection(err: GameError) -> GameError {
    match &err {
        GameError::Storage(_) => tracing::error!("Game request failed: {}", err),
        err if err.is_rule_violation() => {
            tracing::debug!("Move rejected ({}): {}", err.kind(), err)
        }
        _ => tracing::info!("Game request rejected ({}): {}", err.kind(), err),
    }
    err
}
