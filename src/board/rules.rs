//! Legality filtering and check detection.
//!
//! A candidate move is legal when, after committing it on the board, no enemy
//! piece attacks the mover's king. Every candidate is committed and undone on
//! the same board, so the board comes back exactly as it was.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::{ChessError, PositionError};
use super::{Board, Color, Move, Position};
use crate::cache::{DestinationKey, LegalMovesKey, QueryCache, TowardsKey};

/// A candidate destination that would leave the mover's king attacked.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DangerousMove {
    pub to: Position,
    /// Enemy moves that would land on the king afterwards.
    pub attackers: Vec<Move>,
}

/// Candidates split into safe destinations and dangerous ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveFilter {
    pub valid: Vec<Position>,
    pub danger: Vec<DangerousMove>,
}

/// How a game with no legal moves for the side to move ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// No legal moves while in check; the side to move lost.
    Checkmate,
    /// No legal moves without being in check; a draw.
    Stalemate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameEnd {
    pub outcome: Outcome,
    /// The side that has no legal move.
    pub side: Color,
    pub king: Position,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckStatus {
    /// Kings currently attacked, White first.
    pub attacked_kings: Vec<Position>,
    pub end: Option<GameEnd>,
}

impl CheckStatus {
    pub fn is_checkmate(&self) -> bool {
        matches!(self.end, Some(GameEnd { outcome: Outcome::Checkmate, .. }))
    }

    pub fn is_stalemate(&self) -> bool {
        matches!(self.end, Some(GameEnd { outcome: Outcome::Stalemate, .. }))
    }
}

impl Board {
    /// Split `candidates` for the piece on `from` into moves that keep its
    /// king safe and moves that expose it.
    pub fn filter_king_vulnerable_moves(
        &mut self,
        from: Position,
        candidates: &[Position],
    ) -> Result<MoveFilter, ChessError> {
        let color = self
            .get(from)
            .color()
            .ok_or(ChessError::NoPieceAt { at: from })?;

        let mut filter = MoveFilter::default();
        for &to in candidates {
            self.apply_move(from, to)?;
            let attackers = self
                .state
                .find_king(color)
                .map(|king| self.state.moves_towards(king, color.opponent()));
            self.undo()?;

            let attackers = attackers?;
            if attackers.is_empty() {
                filter.valid.push(to);
            } else {
                filter.danger.push(DangerousMove { to, attackers });
            }
        }
        Ok(filter)
    }

    /// Destinations for the piece on `from`; pseudo-legal unless `legal` is set.
    pub fn destinations(
        &mut self,
        from: Position,
        legal: bool,
        cache: Option<&QueryCache>,
    ) -> Result<Vec<Position>, ChessError> {
        let key = DestinationKey {
            signature: self.signature(),
            from,
            legal,
        };
        let mut compute = || {
            let pseudo = self.state.pseudo_destinations(from)?;
            if legal {
                Ok(self.filter_king_vulnerable_moves(from, &pseudo)?.valid)
            } else {
                Ok(pseudo)
            }
        };
        match cache {
            Some(cache) => cache.destinations(key, compute),
            None => compute(),
        }
    }

    #[inline]
    pub fn legal_destinations(
        &mut self,
        from: Position,
        cache: Option<&QueryCache>,
    ) -> Result<Vec<Position>, ChessError> {
        self.destinations(from, true, cache)
    }

    /// Every `by` move that lands on `target`.
    pub fn moves_towards(
        &self,
        target: Position,
        by: Color,
        cache: Option<&QueryCache>,
    ) -> Result<Vec<Move>, ChessError> {
        if !target.is_on_board() {
            return Err(PositionError::OutOfRange {
                x: target.x,
                y: target.y,
            }
            .into());
        }
        let key = TowardsKey {
            signature: self.signature(),
            target,
            by,
        };
        let compute = || Ok(self.state.moves_towards(target, by));
        match cache {
            Some(cache) => cache.towards(key, compute),
            None => compute(),
        }
    }

    /// Every legal move for `color`, pieces in board order.
    pub fn legal_moves_for(
        &mut self,
        color: Color,
        cache: Option<&QueryCache>,
    ) -> Result<Vec<Move>, ChessError> {
        let key = LegalMovesKey {
            signature: self.signature(),
            color,
        };
        let mut compute = || {
            let origins: Vec<Position> = self.state.pieces_of(color).map(|(pos, _)| pos).collect();
            let mut moves = Vec::new();
            for from in origins {
                let targets = self.legal_destinations(from, cache)?;
                moves.extend(targets.into_iter().map(|to| Move::new(from, to)));
            }
            Ok(moves)
        };
        match cache {
            Some(cache) => cache.legal_moves(key, compute),
            None => compute(),
        }
    }

    /// Whether the side to move may play `from -> to`.
    pub fn is_legal_move(
        &mut self,
        from: Position,
        to: Position,
        cache: Option<&QueryCache>,
    ) -> Result<bool, ChessError> {
        if !from.is_on_board() || !to.is_on_board() {
            return Ok(false);
        }
        if !self.get(from).is_color(self.side_to_move()) {
            return Ok(false);
        }
        Ok(self.legal_destinations(from, cache)?.contains(&to))
    }

    pub fn is_king_in_check(&self, color: Color) -> Result<bool, ChessError> {
        self.state.is_king_in_check(color)
    }

    /// Attacked kings, plus the game end if the side to move has no legal move.
    pub fn check_status(&mut self, cache: Option<&QueryCache>) -> Result<CheckStatus, ChessError> {
        let mut status = CheckStatus::default();
        for color in Color::BOTH {
            let king = self.state.find_king(color)?;
            if self.state.is_square_attacked(king, color.opponent()) {
                status.attacked_kings.push(king);
            }
        }

        let side = self.side_to_move();
        if self.legal_moves_for(side, cache)?.is_empty() {
            let king = self.state.find_king(side)?;
            let outcome = if status.attacked_kings.contains(&king) {
                Outcome::Checkmate
            } else {
                Outcome::Stalemate
            };
            status.end = Some(GameEnd {
                outcome,
                side,
                king,
            });
        }
        Ok(status)
    }
}
