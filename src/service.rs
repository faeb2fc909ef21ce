use std::sync::Arc;

use crate::{
    db::GameRepository,
    error::GameError,
    game::{DrawPolicy, TurnEngine},
    models::{GameState, Placement},
    utils::letters::LetterDistribution,
};

/// Loads games, runs the turn engine against them and stores the result
pub struct ScrabbleService {
    repo: Arc<dyn GameRepository>,
    letters: Arc<LetterDistribution>,
    policy: DrawPolicy,
}

impl ScrabbleService {
    pub fn new(
        repo: Arc<dyn GameRepository>,
        letters: Arc<LetterDistribution>,
        policy: DrawPolicy,
    ) -> Self {
        Self {
            repo,
            letters,
            policy,
        }
    }

    fn engine(&self) -> TurnEngine<'_> {
        TurnEngine::new(&self.letters, self.policy)
    }

    /// Deal a new game and store it
    pub async fn start_game(&self, p1_name: &str, p2_name: &str) -> Result<GameState, GameError> {
        let game = {
            let mut rng = rand::rng();
            self.engine().start_game(p1_name, p2_name, &mut rng)?
        };

        let game = self.repo.insert(game).await?;
        tracing::info!(
            "Started game {} between {} and {}",
            game.id,
            game.p1_name,
            game.p2_name
        );

        Ok(game)
    }

    /// Play the current player's letters on a stored game.
    ///
    /// The turn is computed from one snapshot of the game and saved only if
    /// no other turn landed in between.
    pub async fn end_turn(
        &self,
        game_id: i64,
        placements: &[Placement],
    ) -> Result<GameState, GameError> {
        let game = self.get_status(game_id).await?;

        let outcome = {
            let mut rng = rand::rng();
            self.engine().end_turn(&game, placements, &mut rng)?
        };

        self.repo.save(&outcome.state, game.turn_count).await?;
        let scored: Vec<String> = outcome
            .words
            .iter()
            .zip(&outcome.word_scores)
            .map(|(word, points)| format!("{} ({})", word, points))
            .collect();
        tracing::info!(
            "Game {} turn {} scored {}: {}",
            game_id,
            game.turn_count,
            outcome.score,
            scored.join(", ")
        );

        Ok(outcome.state)
    }

    pub async fn get_status(&self, game_id: i64) -> Result<GameState, GameError> {
        self.repo
            .find(game_id)
            .await?
            .ok_or(GameError::GameNotFound(game_id))
    }
}
