use crate::{
    error::GameError,
    game::validator::{Axis, ValidatedMove},
    models::{Board, Rack},
};

pub struct WordExtractor;

impl WordExtractor {
    /// Place a validated move on `board`, taking its letters out of `rack`,
    /// and return every word it formed.
    ///
    /// Perpendicular words come first in placement order, followed by the
    /// main word along the move's axis. Gaps between placed letters must be
    /// bridged by letters already on the board; those letters become part of
    /// the main word.
    ///
    /// On error, `board` and `rack` may be partially updated. Callers pass
    /// working copies.
    pub fn extract(
        board: &mut Board,
        mv: &ValidatedMove,
        rack: &mut Rack,
    ) -> Result<Vec<String>, GameError> {
        let axis = mv.axis;
        let mut main_word = String::new();
        let mut words = Vec::new();
        let mut previous: Option<usize> = None;

        for placed in &mv.letters {
            let (x, y, letter) = (placed.x, placed.y, placed.letter);

            if !rack.contains(letter) {
                return Err(GameError::LetterNotInRack(letter));
            }
            if board.is_occupied(x, y) {
                return Err(GameError::CellOccupied { x, y });
            }

            let current = axis.moving(x, y);
            if let Some(previous) = previous {
                for along in previous + 1..current {
                    let (bx, by) = axis.step(x, y, along);
                    match board.get(bx, by) {
                        Some(bridge) => main_word.push(bridge),
                        None => return Err(GameError::DiscontinuousPlacement),
                    }
                }
            }

            board.place(x, y, letter)?;
            rack.remove(letter);
            main_word.push(letter);

            if let Some(word) = Self::perpendicular_word(board, x, y, axis) {
                tracing::debug!("Letter {} at ({}, {}) formed cross word {}", letter, x, y, word);
                words.push(word);
            }

            previous = Some(current);
        }

        words.push(main_word);
        Ok(words)
    }

    /// Word crossing `(x, y)` at right angles to `axis`, if the square has a
    /// neighbour on that line
    fn perpendicular_word(board: &Board, x: usize, y: usize, axis: Axis) -> Option<String> {
        let cross = axis.perpendicular();
        let origin = cross.moving(x, y) as i64;
        let at = |along: i64| -> Option<char> {
            if along < 0 {
                return None;
            }
            let (cx, cy) = cross.step(x, y, along as usize);
            board.get(cx, cy)
        };

        if at(origin - 1).is_none() && at(origin + 1).is_none() {
            return None;
        }

        let mut start = origin;
        while at(start - 1).is_some() {
            start -= 1;
        }
        let mut end = origin;
        while at(end + 1).is_some() {
            end += 1;
        }

        (start..=end).map(at).collect()
    }
}
