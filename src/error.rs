use thiserror::Error;

/// Every way a game operation can be rejected.
///
/// None of these are fatal to the process; the routes turn them into
/// HTTP responses and the turn that caused them leaves no trace.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("game {0} not found")]
    GameNotFound(i64),

    #[error("game is already over")]
    GameAlreadyOver,

    #[error("letter placed outside the board at ({x}, {y})")]
    OutOfBounds { x: i64, y: i64 },

    #[error("letters must be placed in a straight line")]
    NotStraightLine,

    #[error("first word must be placed on the center square")]
    MustStartAtCenter,

    #[error("rack does not contain the letter {0}")]
    LetterNotInRack(char),

    #[error("square ({x}, {y}) is already occupied")]
    CellOccupied { x: usize, y: usize },

    #[error("letters have to form a single word along the placement axis")]
    DiscontinuousPlacement,

    #[error("game {0} was changed by another turn, reload and try again")]
    Conflict(i64),

    #[error("storage error: {0}")]
    Storage(String),
}

impl GameError {
    /// Stable tag for API clients
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::InvalidInput(_) => "invalid_input",
            GameError::GameNotFound(_) => "game_not_found",
            GameError::GameAlreadyOver => "game_already_over",
            GameError::OutOfBounds { .. } => "out_of_bounds",
            GameError::NotStraightLine => "not_straight_line",
            GameError::MustStartAtCenter => "must_start_at_center",
            GameError::LetterNotInRack(_) => "letter_not_in_rack",
            GameError::CellOccupied { .. } => "cell_occupied",
            GameError::DiscontinuousPlacement => "discontinuous_placement",
            GameError::Conflict(_) => "conflict",
            GameError::Storage(_) => "storage",
        }
    }

    /// True for rejections caused by the submitted move itself
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            GameError::OutOfBounds { .. }
                | GameError::NotStraightLine
                | GameError::MustStartAtCenter
                | GameError::LetterNotInRack(_)
                | GameError::CellOccupied { .. }
                | GameError::DiscontinuousPlacement
        )
    }
}

impl From<sqlx::Error> for GameError {
    fn from(err: sqlx::Error) -> Self {
        GameError::Storage(err.to_string())
    }
}
