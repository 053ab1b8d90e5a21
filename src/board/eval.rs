//! Static evaluation.
//!
//! Scores are from White's point of view. Three independent terms can be
//! switched on and off: material, pawn advancement and mobility. Every term is
//! accumulated with checked arithmetic and reports [`ChessError::InvalidScore`]
//! instead of wrapping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ChessError;
use super::{Board, BoardState, Color, PieceKind};
use crate::cache::QueryCache;

/// Capture value of a pawn; the other weights are scaled against it.
pub const PAWN_VALUE: i32 = 150;

/// Material weights indexed by [`PieceKind::index`]: king, queen, bishop,
/// knight, rook, pawn. The king weight outweighs everything else combined.
pub const DEFAULT_MATERIAL: [i32; 6] = [20_000, 1_300, 470, 450, 700, PAWN_VALUE];

const PROMOTE: i32 = 80;

/// Pawn bonus by relative rank (0 = own back rank) and file.
pub const DEFAULT_PAWN_ADVANCEMENT: [[i32; 8]; 8] = [
    [0; 8],
    [0; 8],
    [2; 8],
    [2; 8],
    [4; 8],
    [5; 8],
    [PROMOTE / 2; 8],
    [PROMOTE; 8],
];

/// Which terms take part in the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalOptions {
    pub piece_value: bool,
    pub pawn_advancement: bool,
    pub mobility: bool,
}

impl EvalOptions {
    pub const fn material_only() -> Self {
        EvalOptions {
            piece_value: true,
            pawn_advancement: false,
            mobility: false,
        }
    }
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            piece_value: true,
            pawn_advancement: true,
            mobility: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalWeights {
    pub material: [i32; 6],
    pub pawn_advancement: [[i32; 8]; 8],
    /// Points per legal destination.
    pub mobility: i32,
}

impl EvalWeights {
    #[inline]
    pub fn piece_value(&self, kind: PieceKind) -> i32 {
        self.material[kind.index()]
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            material: DEFAULT_MATERIAL,
            pawn_advancement: DEFAULT_PAWN_ADVANCEMENT,
            mobility: 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluator {
    pub options: EvalOptions,
    pub weights: EvalWeights,
}

fn add(total: i32, delta: Option<i32>, term: &'static str) -> Result<i32, ChessError> {
    delta
        .and_then(|d| total.checked_add(d))
        .ok_or(ChessError::InvalidScore { term })
}

impl Evaluator {
    pub fn new(options: EvalOptions) -> Self {
        Evaluator {
            options,
            weights: EvalWeights::default(),
        }
    }

    /// Score `state` from White's point of view.
    pub fn evaluate(
        &self,
        state: &BoardState,
        cache: Option<&QueryCache>,
    ) -> Result<i32, ChessError> {
        let mut score = 0;
        if self.options.piece_value {
            score = add(score, Some(self.material(state)?), "material")?;
        }
        if self.options.pawn_advancement {
            score = add(score, Some(self.pawn_advancement(state)?), "pawn advancement")?;
        }
        if self.options.mobility {
            score = add(score, Some(self.mobility(state, cache)?), "mobility")?;
        }
        Ok(score)
    }

    /// Sum over kinds of (white count - black count) * weight.
    pub fn material(&self, state: &BoardState) -> Result<i32, ChessError> {
        let mut counts = [[0i32; 6]; 2];
        for (_, piece) in state.pieces() {
            if let (Some(kind), Some(color)) = (piece.kind(), piece.color()) {
                counts[color.index()][kind.index()] += 1;
            }
        }

        let mut score = 0;
        for kind in PieceKind::ALL {
            let diff = counts[Color::White.index()][kind.index()]
                - counts[Color::Black.index()][kind.index()];
            score = add(score, diff.checked_mul(self.weights.piece_value(kind)), "material")?;
        }
        Ok(score)
    }

    pub fn pawn_advancement(&self, state: &BoardState) -> Result<i32, ChessError> {
        let mut score = 0;
        for color in Color::BOTH {
            for (pos, piece) in state.pieces_of(color) {
                if piece.kind() != Some(PieceKind::Pawn) {
                    continue;
                }
                let rank = match color {
                    Color::White => pos.y,
                    Color::Black => 7 - pos.y,
                };
                let bonus = self
                    .weights
                    .pawn_advancement
                    .get(rank as usize)
                    .and_then(|row| row.get(pos.x as usize))
                    .copied()
                    .ok_or(ChessError::InvalidScore {
                        term: "pawn advancement",
                    })?;
                score = add(score, bonus.checked_mul(color.sign()), "pawn advancement")?;
            }
        }
        Ok(score)
    }

    /// Legal destination count per piece, signed by color.
    pub fn mobility(
        &self,
        state: &BoardState,
        cache: Option<&QueryCache>,
    ) -> Result<i32, ChessError> {
        let mut scratch = Board::from_state(state.clone());
        let origins: Vec<_> = state.pieces().collect();
        let mut score = 0;
        for (from, piece) in origins {
            let Some(color) = piece.color() else {
                continue;
            };
            let count = scratch.legal_destinations(from, cache)?.len() as i32;
            let term = count
                .checked_mul(self.weights.mobility)
                .and_then(|v| v.checked_mul(color.sign()));
            score = add(score, term, "mobility")?;
        }
        Ok(score)
    }
}

impl Board {
    /// Score the current position with default weights.
    pub fn evaluate(&self, options: EvalOptions) -> Result<i32, ChessError> {
        Evaluator::new(options).evaluate(&self.state, None)
    }
}

/// Score `board` from White's point of view with default weights.
pub fn evaluate(board: &Board, options: EvalOptions) -> Result<i32, ChessError> {
    board.evaluate(options)
}
