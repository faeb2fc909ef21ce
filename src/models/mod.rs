pub mod game;

pub use game::{
    // Database row
    GameRecord,
    // Game state
    Board, GameState, GameStatus, Placement, Player, Rack, BOARD_SIZE, CENTER, RACK_SIZE,
};
