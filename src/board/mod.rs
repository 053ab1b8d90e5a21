//! Board representation and game rules.
//!
//! An 8x8 grid of piece encodings plus side to move, castling rights and
//! clocks. Moves are generated per piece kind, filtered for legality by
//! committing and undoing them, and searched with a full-width negamax.
//! En passant and promotion are not part of the rules.
//!
//! # Example
//! ```
//! use gridchess::board::{Board, Color};
//!
//! let mut board = Board::new();
//! let moves = board.legal_moves_for(Color::White, None).unwrap();
//! assert_eq!(moves.len(), 20);
//! ```

mod attack_tables;
mod builder;
mod error;
mod eval;
mod fen;
mod history;
mod make_unmake;
mod movegen;
pub mod prelude;
mod rules;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::BoardBuilder;
pub use error::{ChessError, NotationError, PositionError};
pub use eval::{
    evaluate, EvalOptions, EvalWeights, Evaluator, DEFAULT_MATERIAL, DEFAULT_PAWN_ADVANCEMENT,
    PAWN_VALUE,
};
pub use fen::{parse_position, serialize, START_FEN};
pub use rules::{CheckStatus, DangerousMove, GameEnd, MoveFilter, Outcome};
pub use state::{Board, BoardState};
pub use types::{CastleSide, CastlingRights, Color, Move, MoveResult, Piece, PieceKind, Position};

pub use search::{
    construct_node_chain, is_mate_score, iterative_search, negamax, search, terminal_score,
    MoveNode, NodeComparator, SearchInfo, SearchLimits, SearchOptions, SearchResult, TieBreak,
    DRAW_SCORE, MATE_SCORE, MAX_SEARCH_DEPTH,
};
