pub mod health;
pub mod scrabble;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/scrabble", scrabble_routes())
}

fn scrabble_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/start", post(scrabble::start_game))
        .route("/end-turn", post(scrabble::end_turn))
        .route("/status", get(scrabble::get_status))
}
