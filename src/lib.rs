pub mod config;
pub mod db;
pub mod error;
pub mod game;
pub mod models;
pub mod routes;
pub mod service;
pub mod utils;

use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use service::ScrabbleService;

/// Application state shared across all handlers
pub struct AppState {
    pub games: ScrabbleService,
}

/// Build the HTTP router with CORS and request tracing
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
