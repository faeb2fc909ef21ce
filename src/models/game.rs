use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

use crate::{error::GameError, game::Bag};

/// Width and height of the board
pub const BOARD_SIZE: usize = 15;
/// Coordinate of the center square on both axes
pub const CENTER: usize = 7;
/// Number of letters a rack is refilled to
pub const RACK_SIZE: usize = 7;

/// 15x15 grid of placed letters, indexed `[x][y]`.
///
/// Cells are write-once: `place` refuses to touch an occupied square.
/// Serializes as nested arrays of `null` or a one-letter string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<char>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the signed coordinate lies on the board
    pub fn in_bounds(x: i64, y: i64) -> bool {
        (0..BOARD_SIZE as i64).contains(&x) && (0..BOARD_SIZE as i64).contains(&y)
    }

    /// Letter at a square, `None` when empty or off the board
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.cells.get(x).and_then(|column| column.get(y)).copied().flatten()
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some()
    }

    /// Put a letter on an empty square
    pub fn place(&mut self, x: usize, y: usize, letter: char) -> Result<(), GameError> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return Err(GameError::OutOfBounds {
                x: x as i64,
                y: y as i64,
            });
        }

        let cell = &mut self.cells[x][y];
        if cell.is_some() {
            return Err(GameError::CellOccupied { x, y });
        }
        *cell = Some(letter);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }
}

/// Letters held by one player, in the order they were drawn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rack(Vec<char>);

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn letters(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= RACK_SIZE
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter)
    }

    pub fn push(&mut self, letter: char) {
        self.0.push(letter);
    }

    /// Remove the first instance of `letter`, returning whether one was found
    pub fn remove(&mut self, letter: char) -> bool {
        match self.0.iter().position(|held| *held == letter) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }
}

impl From<Vec<char>> for Rack {
    fn from(letters: Vec<char>) -> Self {
        Self(letters)
    }
}

/// One letter of a proposed move. Coordinates are signed so that
/// malformed input is still reported as out of bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub letter: char,
}

impl Placement {
    pub fn new(x: i64, y: i64, letter: char) -> Self {
        Self { x, y, letter }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Odd turns belong to player one, even turns to player two
    pub fn for_turn(turn_count: u32) -> Self {
        if turn_count % 2 == 1 {
            Player::One
        } else {
            Player::Two
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Finished,
}

/// Complete state of one game, as persisted and returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub id: i64,
    pub p1_name: String,
    pub p2_name: String,
    pub board: Board,
    pub bag: Bag,
    pub p1_rack: Rack,
    pub p2_rack: Rack,
    pub turn_count: u32,
    pub winner: Option<String>,
    pub p1_score: u32,
    pub p2_score: u32,
}

impl GameState {
    pub fn status(&self) -> GameStatus {
        if self.winner.is_some() {
            GameStatus::Finished
        } else {
            GameStatus::InProgress
        }
    }

    pub fn current_player(&self) -> Player {
        Player::for_turn(self.turn_count)
    }

    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.p1_name,
            Player::Two => &self.p2_name,
        }
    }

    pub fn rack(&self, player: Player) -> &Rack {
        match player {
            Player::One => &self.p1_rack,
            Player::Two => &self.p2_rack,
        }
    }

    pub fn rack_mut(&mut self, player: Player) -> &mut Rack {
        match player {
            Player::One => &mut self.p1_rack,
            Player::Two => &mut self.p2_rack,
        }
    }

    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::One => self.p1_score,
            Player::Two => self.p2_score,
        }
    }

    pub fn add_score(&mut self, player: Player, points: u32) {
        match player {
            Player::One => self.p1_score += points,
            Player::Two => self.p2_score += points,
        }
    }
}

/// Row of the `games` table
#[derive(Debug, Clone, FromRow)]
pub struct GameRecord {
    pub id: i64,
    pub p1_name: String,
    pub p2_name: String,
    pub board: Json<Board>,
    pub bag: Json<Bag>,
    pub p1_rack: Json<Rack>,
    pub p2_rack: Json<Rack>,
    pub turn_count: i32,
    pub winner: Option<String>,
    pub p1_score: i32,
    pub p2_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<GameRecord> for GameState {
    type Error = GameError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let turn_count = column_u32(record.id, "turn_count", record.turn_count)?;
        if turn_count == 0 {
            return Err(GameError::Storage(format!(
                "game {} has turn_count 0",
                record.id
            )));
        }

        Ok(Self {
            id: record.id,
            turn_count,
            p1_score: column_u32(record.id, "p1_score", record.p1_score)?,
            p2_score: column_u32(record.id, "p2_score", record.p2_score)?,
            p1_name: record.p1_name,
            p2_name: record.p2_name,
            board: record.board.0,
            bag: record.bag.0,
            p1_rack: record.p1_rack.0,
            p2_rack: record.p2_rack.0,
            winner: record.winner,
        })
    }
}

fn column_u32(game_id: i64, column: &str, value: i32) -> Result<u32, GameError> {
    u32::try_from(value).map_err(|_| {
        GameError::Storage(format!("game {} has negative {}: {}", game_id, column, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_starts_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.get(7, 7), None);
        assert_eq!(board.get(15, 0), None);
    }

    #[test]
    fn test_board_cells_are_write_once() {
        let mut board = Board::new();
        board.place(7, 7, 'A').unwrap();
        assert_eq!(board.get(7, 7), Some('A'));

        let err = board.place(7, 7, 'B').unwrap_err();
        assert_eq!(err, GameError::CellOccupied { x: 7, y: 7 });
        assert_eq!(board.get(7, 7), Some('A'));
    }

    #[test]
    fn test_board_bounds() {
        assert!(Board::in_bounds(0, 0));
        assert!(Board::in_bounds(14, 14));
        assert!(!Board::in_bounds(-1, 0));
        assert!(!Board::in_bounds(0, 15));

        let mut board = Board::new();
        assert!(board.place(15, 0, 'A').is_err());
    }

    #[test]
    fn test_board_serializes_as_nested_arrays() {
        let mut board = Board::new();
        board.place(0, 1, 'Z').unwrap();

        let json = serde_json::to_value(&board).unwrap();
        let columns = json.as_array().unwrap();
        assert_eq!(columns.len(), BOARD_SIZE);
        assert_eq!(columns[0].as_array().unwrap().len(), BOARD_SIZE);
        assert_eq!(columns[0][1], "Z");
        assert!(columns[0][0].is_null());

        let back: Board = serde_json::from_value(json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_rack_removes_first_match_only() {
        let mut rack = Rack::from(vec!['A', 'B', 'A']);
        assert!(rack.remove('A'));
        assert_eq!(rack.letters(), &['B', 'A']);
        assert!(!rack.remove('Z'));
        assert_eq!(rack.len(), 2);
    }

    fn record(turn_count: i32, p1_score: i32) -> GameRecord {
        GameRecord {
            id: 9,
            p1_name: "Alice".to_string(),
            p2_name: "Bob".to_string(),
            board: Json(Board::new()),
            bag: Json(Bag::default()),
            p1_rack: Json(Rack::from(vec!['A'])),
            p2_rack: Json(Rack::new()),
            turn_count,
            winner: None,
            p1_score,
            p2_score: 4,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_game_from_record() {
        let game = GameState::try_from(record(3, 12)).unwrap();
        assert_eq!(game.id, 9);
        assert_eq!(game.turn_count, 3);
        assert_eq!(game.p1_score, 12);
        assert_eq!(game.p2_score, 4);
        assert_eq!(game.p1_rack.letters(), &['A']);
    }

    #[test]
    fn test_corrupt_record_is_storage_error() {
        let err = GameState::try_from(record(3, -5)).unwrap_err();
        assert_eq!(
            err,
            GameError::Storage("game 9 has negative p1_score: -5".to_string())
        );

        assert!(matches!(
            GameState::try_from(record(0, 0)),
            Err(GameError::Storage(_))
        ));
        assert!(matches!(
            GameState::try_from(record(-1, 0)),
            Err(GameError::Storage(_))
        ));
    }

    #[test]
    fn test_player_turn_parity() {
        assert_eq!(Player::for_turn(1), Player::One);
        assert_eq!(Player::for_turn(2), Player::Two);
        assert_eq!(Player::for_turn(7), Player::One);
    }
}
