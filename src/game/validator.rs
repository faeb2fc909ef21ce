use crate::{
    error::GameError,
    models::{Board, Placement, CENTER},
};

/// Direction a move's letters run in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// All letters share the same `y`; `x` grows left to right
    Horizontal,
    /// All letters share the same `x`; `y` grows top to bottom
    Vertical,
}

impl Axis {
    /// Coordinate that changes along this axis
    pub fn moving(self, x: usize, y: usize) -> usize {
        match self {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }

    /// Square at position `along` on this axis, keeping the other coordinate of `(x, y)`
    pub fn step(self, x: usize, y: usize, along: usize) -> (usize, usize) {
        match self {
            Axis::Horizontal => (along, y),
            Axis::Vertical => (x, along),
        }
    }

    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A placement that passed the bounds check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedLetter {
    pub x: usize,
    pub y: usize,
    pub letter: char,
}

/// Placements ready for word extraction: on the board, in one line,
/// and sorted along their axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMove {
    pub axis: Axis,
    pub letters: Vec<PlacedLetter>,
}

pub struct PlacementValidator;

impl PlacementValidator {
    /// Check a proposed move against the geometric rules.
    ///
    /// Runs, in order: non-empty, bounds, straight line, center square on
    /// the first turn. Rack contents and square occupancy are checked while
    /// the words are extracted.
    pub fn validate(placements: &[Placement], turn_count: u32) -> Result<ValidatedMove, GameError> {
        if placements.is_empty() {
            return Err(GameError::InvalidInput(
                "at least one letter must be placed".to_string(),
            ));
        }

        let mut letters = placements
            .iter()
            .map(Self::check_bounds)
            .collect::<Result<Vec<_>, _>>()?;

        let axis = Self::axis(&letters)?;

        if turn_count == 1 && !letters.iter().any(|l| l.x == CENTER && l.y == CENTER) {
            return Err(GameError::MustStartAtCenter);
        }

        letters.sort_by_key(|l| axis.moving(l.x, l.y));

        Ok(ValidatedMove { axis, letters })
    }

    fn check_bounds(placement: &Placement) -> Result<PlacedLetter, GameError> {
        if !Board::in_bounds(placement.x, placement.y) {
            return Err(GameError::OutOfBounds {
                x: placement.x,
                y: placement.y,
            });
        }

        Ok(PlacedLetter {
            x: placement.x as usize,
            y: placement.y as usize,
            letter: placement.letter,
        })
    }

    /// Horizontal when every `y` matches, vertical when every `x` matches.
    /// A single letter satisfies both and counts as horizontal.
    fn axis(letters: &[PlacedLetter]) -> Result<Axis, GameError> {
        let first = letters[0];
        if letters.iter().all(|l| l.y == first.y) {
            Ok(Axis::Horizontal)
        } else if letters.iter().all(|l| l.x == first.x) {
            Ok(Axis::Vertical)
        } else {
            Err(GameError::NotStraightLine)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placements(coords: &[(i64, i64, char)]) -> Vec<Placement> {
        coords
            .iter()
            .map(|&(x, y, letter)| Placement::new(x, y, letter))
            .collect()
    }

    #[test]
    fn test_empty_move_is_rejected() {
        let err = PlacementValidator::validate(&[], 3).unwrap_err();
        assert!(matches!(err, GameError::InvalidInput(_)));
    }

    #[test]
    fn test_out_of_bounds() {
        let moves = placements(&[(7, 7, 'A'), (15, 7, 'B')]);
        assert_eq!(
            PlacementValidator::validate(&moves, 1),
            Err(GameError::OutOfBounds { x: 15, y: 7 })
        );

        let moves = placements(&[(-1, 3, 'A')]);
        assert_eq!(
            PlacementValidator::validate(&moves, 2),
            Err(GameError::OutOfBounds { x: -1, y: 3 })
        );
    }

    #[test]
    fn test_bounds_checked_before_line() {
        // Diagonal and off the board: bounds wins
        let moves = placements(&[(0, 0, 'A'), (20, 20, 'B')]);
        assert!(matches!(
            PlacementValidator::validate(&moves, 2),
            Err(GameError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_not_straight_line() {
        let moves = placements(&[(7, 7, 'A'), (8, 8, 'B')]);
        assert_eq!(
            PlacementValidator::validate(&moves, 1),
            Err(GameError::NotStraightLine)
        );
    }

    #[test]
    fn test_axis_detection() {
        let horizontal = placements(&[(7, 7, 'A'), (8, 7, 'B')]);
        assert_eq!(
            PlacementValidator::validate(&horizontal, 1).unwrap().axis,
            Axis::Horizontal
        );

        let vertical = placements(&[(7, 7, 'C'), (7, 8, 'A'), (7, 9, 'T')]);
        assert_eq!(
            PlacementValidator::validate(&vertical, 1).unwrap().axis,
            Axis::Vertical
        );

        let single = placements(&[(7, 7, 'A')]);
        assert_eq!(
            PlacementValidator::validate(&single, 1).unwrap().axis,
            Axis::Horizontal
        );
    }

    #[test]
    fn test_first_turn_must_cover_center() {
        let moves = placements(&[(3, 3, 'A'), (4, 3, 'B')]);
        assert_eq!(
            PlacementValidator::validate(&moves, 1),
            Err(GameError::MustStartAtCenter)
        );

        // Center does not have to be the first listed letter
        let moves = placements(&[(6, 7, 'A'), (7, 7, 'B')]);
        assert!(PlacementValidator::validate(&moves, 1).is_ok());

        // Later turns have no center constraint
        let moves = placements(&[(3, 3, 'A'), (4, 3, 'B')]);
        assert!(PlacementValidator::validate(&moves, 2).is_ok());
    }

    #[test]
    fn test_letters_sorted_along_axis() {
        let moves = placements(&[(9, 7, 'T'), (7, 7, 'C'), (8, 7, 'A')]);
        let validated = PlacementValidator::validate(&moves, 1).unwrap();
        let word: String = validated.letters.iter().map(|l| l.letter).collect();
        assert_eq!(word, "CAT");

        let moves = placements(&[(7, 9, 'T'), (7, 7, 'C'), (7, 8, 'A')]);
        let validated = PlacementValidator::validate(&moves, 1).unwrap();
        let word: String = validated.letters.iter().map(|l| l.letter).collect();
        assert_eq!(word, "CAT");
    }
}
