//! Error types for chess board operations.

use std::fmt;

use super::types::{Color, Move, Piece, PieceKind, Position};

/// Structural violations of the positional notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Notation must have exactly 6 space-separated fields
    WrongFieldCount { found: usize },
    /// Piece placement must have exactly 8 ranks
    WrongRankCount { found: usize },
    /// Invalid piece character in placement
    InvalidPiece { char: char },
    /// A rank describes more than 8 files
    TooManyFiles { rank: usize, files: usize },
    /// A rank describes fewer than 8 files
    TooFewFiles { rank: usize, files: usize },
    /// Side to move must be 'w' or 'b'
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// En passant field must be '-' or a square
    InvalidEnPassant { found: String },
    /// Half-move clock or full-move number is not a number
    InvalidClock { field: &'static str, found: String },
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::WrongFieldCount { found } => {
                write!(f, "Notation must have 6 fields, found {found}")
            }
            NotationError::WrongRankCount { found } => {
                write!(f, "Piece placement must have 8 ranks, found {found}")
            }
            NotationError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in notation")
            }
            NotationError::TooManyFiles { rank, files } => {
                write!(f, "Too many files ({files}) in rank {rank}")
            }
            NotationError::TooFewFiles { rank, files } => {
                write!(f, "Too few files ({files}) in rank {rank}")
            }
            NotationError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            NotationError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in notation")
            }
            NotationError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant field '{found}'")
            }
            NotationError::InvalidClock { field, found } => {
                write!(f, "Invalid {field} '{found}'")
            }
        }
    }
}

impl std::error::Error for NotationError {}

/// Error type for coordinate failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Coordinate outside the 8x8 board
    OutOfRange { x: i8, y: i8 },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::OutOfRange { x, y } => {
                write!(f, "Position ({x}, {y}) out of bounds (must be 0-7)")
            }
            PositionError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Crate-level error.
///
/// Apart from `Notation`, `Position`, `IllegalMove` and `SearchAborted`, every
/// variant marks a broken internal invariant: correct calling code never sees
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    Notation(NotationError),
    Position(PositionError),
    /// A generator was invoked on a square that does not hold the expected kind
    PreconditionViolation {
        expected: PieceKind,
        found: Piece,
        at: Position,
    },
    /// A move was requested from an empty square
    NoPieceAt { at: Position },
    /// A session was asked to commit a move the side to move may not play
    IllegalMove { mv: Move },
    /// Undo with nothing to restore
    EmptyHistory,
    /// King lookup on a position without that king
    KingNotFound { color: Color },
    /// An evaluation term left the representable range
    InvalidScore { term: &'static str },
    /// Search stopped by its stop flag or node budget
    SearchAborted,
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::Notation(err) => write!(f, "Malformed notation: {err}"),
            ChessError::Position(err) => write!(f, "{err}"),
            ChessError::PreconditionViolation {
                expected,
                found,
                at,
            } => {
                write!(f, "Expected a {expected} on {at}, found {found}")
            }
            ChessError::NoPieceAt { at } => write!(f, "No piece at {at}"),
            ChessError::IllegalMove { mv } => write!(f, "Illegal move {mv}"),
            ChessError::EmptyHistory => write!(f, "No history to undo"),
            ChessError::KingNotFound { color } => write!(f, "{color} king not found"),
            ChessError::InvalidScore { term } => {
                write!(f, "Evaluation term '{term}' produced an invalid score")
            }
            ChessError::SearchAborted => write!(f, "Search aborted"),
        }
    }
}

impl std::error::Error for ChessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChessError::Notation(err) => Some(err),
            ChessError::Position(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NotationError> for ChessError {
    fn from(err: NotationError) -> Self {
        ChessError::Notation(err)
    }
}

impl From<PositionError> for ChessError {
    fn from(err: PositionError) -> Self {
        ChessError::Position(err)
    }
}
