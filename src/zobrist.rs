//! Zobrist signatures for board states.
//!
//! The signature covers the grid, the side to move and the castling rights.
//! Clocks are left out: they never change which moves exist.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Position};

pub(crate) struct ZobristKeys {
    // piece_keys[kind][color][square_index]
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) black_to_move_key: u64,
    // one key per castling-rights bit
    pub(crate) castling_keys: [u64; 4],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64);
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [0; 4];

        for kind in &mut piece_keys {
            for color in kind.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

/// Key for `piece` standing on `pos`; zero for an empty cell.
#[inline]
pub(crate) fn piece_key(piece: Piece, pos: Position) -> u64 {
    match (piece.kind(), piece.color()) {
        (Some(kind), Some(color)) => ZOBRIST.piece_keys[kind.index()][color.index()][pos.index()],
        _ => 0,
    }
}

#[inline]
pub(crate) fn side_key(side: Color) -> u64 {
    match side {
        Color::White => 0,
        Color::Black => ZOBRIST.black_to_move_key,
    }
}

pub(crate) fn castling_key(rights: CastlingRights) -> u64 {
    let bits = rights.as_u8();
    ZOBRIST
        .castling_keys
        .iter()
        .enumerate()
        .filter(|&(bit, _)| bits & (1u8 << bit) != 0)
        .fold(0, |acc, (_, key)| acc ^ key)
}
