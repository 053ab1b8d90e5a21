//! Board coordinates.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::PositionError;

/// A square addressed by zero-based file (`x`) and rank (`y`).
///
/// `y = 0` is white's back rank. Construction does not check bounds so that
/// ray casting can step past the edge before testing [`Position::is_on_board`];
/// only conversion to notation and grid access require an on-board value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Position { x, y }
    }

    /// Build an on-board position, rejecting anything outside `0..8`.
    pub fn try_new(x: i8, y: i8) -> Result<Self, PositionError> {
        let pos = Position { x, y };
        if pos.is_on_board() {
            Ok(pos)
        } else {
            Err(PositionError::OutOfRange { x, y })
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.x >= 0 && self.x < 8 && self.y >= 0 && self.y < 8
    }

    /// Step by `(dx, dy)`; the result may be off the board.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Square index (a1=0, b1=1, ..., h8=63). Only meaningful on the board.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        (self.y as usize) * 8 + self.x as usize
    }

    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Position {
            x: (idx % 8) as i8,
            y: (idx / 8) as i8,
        }
    }

    /// Flip the rank (a1 <-> a8).
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Position {
            x: self.x,
            y: 7 - self.y,
        }
    }

    /// Letter-file plus numeric-rank notation, e.g. `e2`.
    pub fn to_notation(self) -> Result<String, PositionError> {
        if !self.is_on_board() {
            return Err(PositionError::OutOfRange {
                x: self.x,
                y: self.y,
            });
        }
        let mut s = String::with_capacity(2);
        s.push((b'a' + self.x as u8) as char);
        s.push((b'1' + self.y as u8) as char);
        Ok(s)
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64).map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_notation() {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "({},{})", self.x, self.y),
        }
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(PositionError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        let x = match bytes[0] {
            b @ b'a'..=b'h' => (b - b'a') as i8,
            _ => {
                return Err(PositionError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };
        let y = match bytes[1] {
            b @ b'1'..=b'8' => (b - b'1') as i8,
            _ => {
                return Err(PositionError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };
        Ok(Position { x, y })
    }
}

impl TryFrom<(i8, i8)> for Position {
    type Error = PositionError;

    fn try_from((x, y): (i8, i8)) -> Result<Self, Self::Error> {
        Position::try_new(x, y)
    }
}
