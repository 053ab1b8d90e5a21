//! Per-square step tables and slider direction sets.

use once_cell::sync::Lazy;

use super::types::Position;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub(crate) const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

fn step_targets(deltas: &[(i8, i8)]) -> Vec<Vec<Position>> {
    Position::all()
        .map(|from| {
            deltas
                .iter()
                .map(|&(dx, dy)| from.offset(dx, dy))
                .filter(|to| to.is_on_board())
                .collect()
        })
        .collect()
}

/// On-board knight destinations for every square, by square index.
pub(crate) static KNIGHT_TARGETS: Lazy<Vec<Vec<Position>>> =
    Lazy::new(|| step_targets(&KNIGHT_DELTAS));

/// On-board king steps (no castling) for every square, by square index.
pub(crate) static KING_TARGETS: Lazy<Vec<Vec<Position>>> =
    Lazy::new(|| step_targets(&KING_DELTAS));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_knight_has_two_targets() {
        assert_eq!(KNIGHT_TARGETS[Position::new(0, 0).index()].len(), 2);
        assert_eq!(KNIGHT_TARGETS[Position::new(3, 3).index()].len(), 8);
    }

    #[test]
    fn king_targets_stay_on_board() {
        assert_eq!(KING_TARGETS[Position::new(0, 0).index()].len(), 3);
        assert_eq!(KING_TARGETS[Position::new(0, 3).index()].len(), 5);
        assert_eq!(KING_TARGETS[Position::new(4, 4).index()].len(), 8);
        assert!(KING_TARGETS
            .iter()
            .flatten()
            .all(|p| p.is_on_board()));
    }
}
