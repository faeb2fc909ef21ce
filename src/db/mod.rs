use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{error::GameError, models::GameState};

pub mod memory;
pub mod queries;

pub use memory::MemoryGameRepository;

pub async fn create_pool(database_url: &str, max_connections: u32) -> sqlx::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Storage for game rows.
///
/// The engine never locks; `save` is where concurrent turns for the same
/// game are serialized, by refusing a write whose `expected_turn` no longer
/// matches the stored row.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Store a new game and return it with its assigned id
    async fn insert(&self, game: GameState) -> Result<GameState, GameError>;

    async fn find(&self, game_id: i64) -> Result<Option<GameState>, GameError>;

    /// Replace a stored game, failing with `Conflict` if another turn was
    /// saved since `expected_turn` was read
    async fn save(&self, game: &GameState, expected_turn: u32) -> Result<(), GameError>;
}

/// PostgreSQL-backed repository
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for PgGameRepository {
    async fn insert(&self, game: GameState) -> Result<GameState, GameError> {
        queries::create_game(&self.pool, &game).await
    }

    async fn find(&self, game_id: i64) -> Result<Option<GameState>, GameError> {
        queries::get_game(&self.pool, game_id).await
    }

    async fn save(&self, game: &GameState, expected_turn: u32) -> Result<(), GameError> {
        if queries::update_game(&self.pool, game, expected_turn).await? {
            Ok(())
        } else {
            tracing::warn!(
                "Game {} was not at turn {} when saving, rejecting stale turn",
                game.id,
                expected_turn
            );
            Err(GameError::Conflict(game.id))
        }
    }
}
