//! Prelude module for convenient imports.
//!
//! # Example
//! ```
//! use gridchess::board::prelude::*;
//!
//! let board = Board::new();
//! assert_eq!(board.side_to_move(), Color::White);
//! ```

pub use super::{
    Board, BoardBuilder, BoardState, CastlingRights, ChessError, Color, EvalOptions, Move,
    MoveResult, Piece, PieceKind, Position, SearchOptions, SearchResult,
};
