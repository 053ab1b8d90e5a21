//! Fluent builder for constructing positions.
//!
//! Allows creating positions piece by piece rather than parsing notation.
//!
//! # Example
//! ```
//! use gridchess::board::{BoardBuilder, Color, Piece, PieceKind, Position};
//!
//! let board = BoardBuilder::new()
//!     .piece(Position::new(4, 0), Piece::new(PieceKind::King, Color::White))
//!     .piece(Position::new(4, 7), Piece::new(PieceKind::King, Color::Black))
//!     .piece(Position::new(0, 1), Piece::new(PieceKind::Pawn, Color::White))
//!     .side_to_move(Color::White)
//!     .build()
//!     .unwrap();
//! assert_eq!(board.to_fen(), "4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
//! ```

use super::error::ChessError;
use super::{Board, BoardState, CastleSide, CastlingRights, Color, Piece, Position};

#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Position, Piece)>,
    side_to_move: Color,
    castling: CastlingRights,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// An empty board, White to move, no castling rights.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Start from an existing position.
    #[must_use]
    pub fn from_state(state: &BoardState) -> Self {
        BoardBuilder {
            pieces: state.pieces().collect(),
            side_to_move: state.side_to_move(),
            castling: state.castling_rights(),
            halfmove_clock: state.halfmove_clock(),
            fullmove_number: state.fullmove_number(),
        }
    }

    #[must_use]
    pub fn starting_position() -> Self {
        Self::from_state(&BoardState::new())
    }

    /// Place a piece, replacing whatever was there.
    #[must_use]
    pub fn piece(mut self, pos: Position, piece: Piece) -> Self {
        self.pieces.retain(|(p, _)| *p != pos);
        if !piece.is_empty() {
            self.pieces.push((pos, piece));
        }
        self
    }

    #[must_use]
    pub fn clear(mut self, pos: Position) -> Self {
        self.pieces.retain(|(p, _)| *p != pos);
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling = rights;
        self
    }

    #[must_use]
    pub fn castle(mut self, color: Color, side: CastleSide) -> Self {
        self.castling.set(color, side);
        self
    }

    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    #[must_use]
    pub const fn fullmove_number(mut self, number: u32) -> Self {
        self.fullmove_number = number;
        self
    }

    /// Build the state; fails if a piece was placed off the board.
    pub fn build_state(self) -> Result<BoardState, ChessError> {
        let mut state = BoardState::empty();
        for (pos, piece) in self.pieces {
            state.put(pos, piece)?;
        }
        state.set_side_to_move(self.side_to_move);
        state.set_castling_rights(self.castling);
        state.set_clocks(self.halfmove_clock, self.fullmove_number);
        Ok(state)
    }

    pub fn build(self) -> Result<Board, ChessError> {
        self.build_state().map(Board::from_state)
    }
}
