//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts of the legal-move tree
//! - `fen.rs` - Notation parsing and serialization
//! - `make_unmake.rs` - Move application and undo
//! - `rules.rs` - Legality filter, check and game end
//! - `edge_cases.rs` - Castling, blocked pawns and other special positions
//! - `eval.rs` - Evaluation terms and symmetry
//! - `search.rs` - Tree construction, negamax and root selection
//! - `proptest.rs` - Property-based tests

mod proptest;
mod rules;
mod search;

use super::Position;

/// Square from algebraic notation.
pub(super) fn sq(s: &str) -> Position {
    s.parse().expect("valid square")
}
