use sqlx::{types::Json, PgPool};

use crate::{
    error::GameError,
    models::{GameRecord, GameState},
};

// Game queries

pub async fn create_game(pool: &PgPool, game: &GameState) -> Result<GameState, GameError> {
    let record = sqlx::query_as::<_, GameRecord>(
        r#"
        INSERT INTO games (
            p1_name, p2_name, board, bag, p1_rack, p2_rack,
            turn_count, winner, p1_score, p2_score
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&game.p1_name)
    .bind(&game.p2_name)
    .bind(Json(&game.board))
    .bind(Json(&game.bag))
    .bind(Json(&game.p1_rack))
    .bind(Json(&game.p2_rack))
    .bind(game.turn_count as i32)
    .bind(game.winner.as_deref())
    .bind(game.p1_score as i32)
    .bind(game.p2_score as i32)
    .fetch_one(pool)
    .await?;

    record.try_into()
}

pub async fn get_game(pool: &PgPool, game_id: i64) -> Result<Option<GameState>, GameError> {
    let record = sqlx::query_as::<_, GameRecord>("SELECT * FROM games WHERE id = $1")
        .bind(game_id)
        .fetch_optional(pool)
        .await?;

    record.map(GameState::try_from).transpose()
}

/// Write back a game after a turn.
///
/// Only succeeds if the stored row is still at `expected_turn`, so two
/// turns computed from the same snapshot cannot both be saved. Returns
/// whether the row was updated.
pub async fn update_game(pool: &PgPool, game: &GameState, expected_turn: u32) -> Result<bool, GameError> {
    let result = sqlx::query(
        r#"
        UPDATE games
        SET board = $1,
            bag = $2,
            p1_rack = $3,
            p2_rack = $4,
            turn_count = $5,
            winner = $6,
            p1_score = $7,
            p2_score = $8,
            updated_at = NOW()
        WHERE id = $9 AND turn_count = $10
        "#,
    )
    .bind(Json(&game.board))
    .bind(Json(&game.bag))
    .bind(Json(&game.p1_rack))
    .bind(Json(&game.p2_rack))
    .bind(game.turn_count as i32)
    .bind(game.winner.as_deref())
    .bind(game.p1_score as i32)
    .bind(game.p2_score as i32)
    .bind(game.id)
    .bind(expected_turn as i32)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
