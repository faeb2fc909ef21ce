use rand::Rng;

use crate::{
    error::GameError,
    game::{
        bag::{Bag, DrawPolicy},
        scorer::{ScoreResult, Scorer},
        validator::PlacementValidator,
        words::WordExtractor,
    },
    models::{Board, GameState, Placement, Player, Rack, RACK_SIZE},
    utils::letters::LetterDistribution,
};

/// Result of an accepted turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// State after the turn, ready to be persisted
    pub state: GameState,
    /// Words formed, cross words first and the main word last
    pub words: Vec<String>,
    /// Points for each entry of `words`
    pub word_scores: Vec<u32>,
    /// Points earned this turn
    pub score: u32,
}

/// Resolves game creation and turns.
///
/// The engine holds no game state of its own. Every call takes the current
/// state by reference and returns a new value. Randomness is supplied by the
/// caller.
pub struct TurnEngine<'a> {
    letters: &'a LetterDistribution,
    policy: DrawPolicy,
}

impl<'a> TurnEngine<'a> {
    pub fn new(letters: &'a LetterDistribution, policy: DrawPolicy) -> Self {
        Self { letters, policy }
    }

    /// Set up a new game: fresh bag, seven letters each, empty board.
    ///
    /// Letters are dealt alternately to player one and player two. The
    /// returned state has id 0 until the repository assigns one.
    pub fn start_game<R: Rng + ?Sized>(
        &self,
        p1_name: &str,
        p2_name: &str,
        rng: &mut R,
    ) -> Result<GameState, GameError> {
        let p1_name = p1_name.trim();
        let p2_name = p2_name.trim();
        if p1_name.is_empty() || p2_name.is_empty() {
            return Err(GameError::InvalidInput(
                "both player names are required".to_string(),
            ));
        }

        let mut bag = Bag::from_distribution(self.letters);
        let mut p1_rack = Rack::new();
        let mut p2_rack = Rack::new();

        for _ in 0..RACK_SIZE {
            for rack in [&mut p1_rack, &mut p2_rack] {
                if let Some(letter) = bag.draw(rng, self.policy) {
                    rack.push(letter);
                }
            }
        }

        tracing::debug!(
            "Dealt racks for {} and {}, {} tiles left in bag",
            p1_name,
            p2_name,
            bag.tile_count()
        );

        Ok(GameState {
            id: 0,
            p1_name: p1_name.to_string(),
            p2_name: p2_name.to_string(),
            board: Board::new(),
            bag,
            p1_rack,
            p2_rack,
            turn_count: 1,
            winner: None,
            p1_score: 0,
            p2_score: 0,
        })
    }

    /// Resolve the current player's move.
    ///
    /// Validates and places the letters on a copy of the board and rack,
    /// scores the formed words, refills the rack from the bag and checks for
    /// the end of the game. Any rejection returns an error and `state` is
    /// left as it was.
    pub fn end_turn<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        placements: &[Placement],
        rng: &mut R,
    ) -> Result<TurnOutcome, GameError> {
        if state.winner.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        let player = state.current_player();
        let mv = PlacementValidator::validate(placements, state.turn_count)?;

        let mut board = state.board.clone();
        let mut rack = state.rack(player).clone();
        let words = WordExtractor::extract(&mut board, &mv, &mut rack)?;
        let ScoreResult {
            word_scores,
            total: score,
        } = Scorer::score_words(&words, self.letters);

        let mut next = state.clone();
        next.add_score(player, score);
        next.board = board;
        next.turn_count += 1;

        self.refill(&mut rack, &mut next.bag, rng);
        *next.rack_mut(player) = rack;

        if next.bag.is_empty() && next.rack(player).is_empty() {
            // Ties go to player two
            let winner = if next.score(Player::One) > next.score(Player::Two) {
                Player::One
            } else {
                Player::Two
            };
            next.winner = Some(next.name(winner).to_string());

            tracing::info!(
                "Game {} finished: {} wins {} to {}",
                next.id,
                next.name(winner),
                next.p1_score,
                next.p2_score
            );
        }

        tracing::debug!(
            "Game {} turn {}: {} played {:?} for {} points",
            state.id,
            state.turn_count,
            state.name(player),
            words,
            score
        );

        Ok(TurnOutcome {
            state: next,
            words,
            word_scores,
            score,
        })
    }

    /// Top the rack back up to seven letters, or until the bag runs out
    fn refill<R: Rng + ?Sized>(&self, rack: &mut Rack, bag: &mut Bag, rng: &mut R) {
        while !rack.is_full() {
            match bag.draw(rng, self.policy) {
                Some(letter) => rack.push(letter),
                None => break,
            }
        }
    }
}
