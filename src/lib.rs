pub mod board;
pub mod cache;
pub mod engine;
pub mod sync;
mod zobrist;

pub use board::{Board, BoardState, ChessError, Color, Move, Piece, PieceKind, Position};
pub use cache::QueryCache;
pub use engine::{EngineConfig, GameSession};
