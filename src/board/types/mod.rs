//! Core chess types.
//!
//! - `Position` - file/rank coordinate, may step off the board transiently
//! - `Piece`, `PieceKind` and `Color` - packed cell encoding and its parts
//! - `Move` and `MoveResult` - displacements and what committing one did
//! - `CastlingRights` and `CastleSide` - castling state

mod castling;
mod moves;
mod piece;
mod position;

pub use castling::{CastleSide, CastlingRights};
pub use moves::{Move, MoveResult};
pub use piece::{Color, Piece, PieceKind};
pub use position::Position;

