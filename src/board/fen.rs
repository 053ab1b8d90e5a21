use std::fmt;
use std::str::FromStr;

use super::error::{ChessError, NotationError};
use super::{Board, BoardState, CastlingRights, Color, Piece, Position};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl BoardState {
    /// Parse a position from its six-field notation.
    ///
    /// Placement runs from rank 8 down to rank 1, files a to h. The
    /// en-passant field is validated and then ignored.
    pub fn try_from_fen(fen: &str) -> Result<Self, NotationError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(NotationError::WrongFieldCount { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(NotationError::WrongRankCount { found: ranks.len() });
        }

        let mut state = BoardState::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let y = 7 - rank_idx as i8;
            let mut files = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    files += skip as usize;
                } else {
                    let piece =
                        Piece::from_fen_char(c).ok_or(NotationError::InvalidPiece { char: c })?;
                    if files < 8 {
                        state.set(Position::new(files as i8, y), piece);
                    }
                    files += 1;
                }
                if files > 8 {
                    return Err(NotationError::TooManyFiles {
                        rank: rank_idx,
                        files,
                    });
                }
            }
            if files < 8 {
                return Err(NotationError::TooFewFiles {
                    rank: rank_idx,
                    files,
                });
            }
        }

        let side = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(NotationError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };
        state.set_side_to_move(side);

        let rights = CastlingRights::from_notation(parts[2])
            .map_err(|c| NotationError::InvalidCastling { char: c })?;
        state.set_castling_rights(rights);

        if parts[3] != "-" {
            parts[3]
                .parse::<Position>()
                .map_err(|_| NotationError::InvalidEnPassant {
                    found: parts[3].to_string(),
                })?;
        }

        let halfmove_clock = parts[4].parse().map_err(|_| NotationError::InvalidClock {
            field: "half-move clock",
            found: parts[4].to_string(),
        })?;
        let fullmove_number = parts[5].parse().map_err(|_| NotationError::InvalidClock {
            field: "full-move number",
            found: parts[5].to_string(),
        })?;
        state.set_clocks(halfmove_clock, fullmove_number);

        Ok(state)
    }

    /// Parse a position from its six-field notation.
    ///
    /// # Panics
    /// Panics if the notation is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid position notation")
    }

    /// Serialize to the six-field notation. The en-passant field is always `-`.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for y in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for x in 0..8 {
                match self.get(Position::new(x, y)).to_fen_char() {
                    Some(c) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(c);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        format!(
            "{} {} {} - {} {}",
            rows.join("/"),
            active,
            self.castling,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for BoardState {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardState::try_from_fen(s)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

impl Board {
    pub fn try_from_fen(fen: &str) -> Result<Self, ChessError> {
        Ok(Board::from_state(BoardState::try_from_fen(fen)?))
    }

    /// # Panics
    /// Panics if the notation is invalid.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Board::from_state(BoardState::from_fen(fen))
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        self.state.to_fen()
    }
}

/// Parse a notation string into a board with empty history.
pub fn parse_position(fen: &str) -> Result<Board, ChessError> {
    Board::try_from_fen(fen)
}

/// Serialize the board's current position.
#[must_use]
pub fn serialize(board: &Board) -> String {
    board.to_fen()
}
