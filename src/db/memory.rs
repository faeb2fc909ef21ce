use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::GameRepository;
use crate::{error::GameError, models::GameState};

/// In-process repository used when no database is configured, and in tests
pub struct MemoryGameRepository {
    games: DashMap<i64, GameState>,
    next_id: AtomicI64,
}

impl MemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameRepository for MemoryGameRepository {
    async fn insert(&self, mut game: GameState) -> Result<GameState, GameError> {
        game.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn find(&self, game_id: i64) -> Result<Option<GameState>, GameError> {
        Ok(self.games.get(&game_id).map(|game| game.clone()))
    }

    async fn save(&self, game: &GameState, expected_turn: u32) -> Result<(), GameError> {
        // The entry guard holds the shard lock across the check and the write
        let mut stored = self
            .games
            .get_mut(&game.id)
            .ok_or(GameError::GameNotFound(game.id))?;

        if stored.turn_count != expected_turn {
            return Err(GameError::Conflict(game.id));
        }

        *stored = game.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        game::{DrawPolicy, TurnEngine},
        utils::letters::LetterDistribution,
    };
    use rand::{rngs::StdRng, SeedableRng};
    use tokio_test::{assert_err, assert_ok, block_on};

    fn new_game() -> GameState {
        let engine = TurnEngine::new(LetterDistribution::standard(), DrawPolicy::UniformLetters);
        engine
            .start_game("Alice", "Bob", &mut StdRng::seed_from_u64(3))
            .unwrap()
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let repo = MemoryGameRepository::new();

        let first = block_on(repo.insert(new_game())).unwrap();
        let second = block_on(repo.insert(new_game())).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(block_on(repo.find(1)).unwrap().is_some());
        assert!(block_on(repo.find(2)).unwrap().is_some());
    }

    #[test]
    fn test_find_missing_game() {
        let repo = MemoryGameRepository::new();
        let found = assert_ok!(block_on(repo.find(99)));
        assert!(found.is_none());
    }

    #[test]
    fn test_save_checks_turn_count() {
        let repo = MemoryGameRepository::new();
        let game = block_on(repo.insert(new_game())).unwrap();

        let mut next = game.clone();
        next.turn_count = 2;
        assert_ok!(block_on(repo.save(&next, 1)));

        // A second turn computed from the turn-1 snapshot is stale
        let mut stale = game.clone();
        stale.turn_count = 2;
        let err = assert_err!(block_on(repo.save(&stale, 1)));
        assert_eq!(err, GameError::Conflict(game.id));

        let stored = block_on(repo.find(game.id)).unwrap().unwrap();
        assert_eq!(stored.turn_count, 2);
    }

    #[test]
    fn test_save_unknown_game() {
        let repo = MemoryGameRepository::new();
        let mut game = new_game();
        game.id = 42;

        let err = assert_err!(block_on(repo.save(&game, 1)));
        assert_eq!(err, GameError::GameNotFound(42));
    }
}
