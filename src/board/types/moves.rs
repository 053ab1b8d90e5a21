//! Move types.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::position::Position;
use crate::board::error::PositionError;

/// A displacement of whatever stands on `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Parses both the display form (`e2->e4`) and the compact form (`e2e4`).
impl FromStr for Move {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = match s.split_once("->") {
            Some(parts) => parts,
            None if s.len() == 4 && s.is_ascii() => s.split_at(2),
            None => {
                return Err(PositionError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };
        Ok(Move {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

/// What a committed move did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveResult {
    /// The piece that moved, as it stands on the destination.
    pub moved: Piece,
    /// Whatever occupied the destination before the move.
    pub captured: Option<Piece>,
    /// Secondary displacements; the rook hop of a castling move.
    pub special_moves: Vec<Move>,
}

impl MoveResult {
    #[inline]
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_castling(&self) -> bool {
        !self.special_moves.is_empty()
    }
}
