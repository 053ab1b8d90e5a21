mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables::{BISHOP_DIRECTIONS, KING_TARGETS, KNIGHT_TARGETS, ROOK_DIRECTIONS};
use super::error::ChessError;
use super::{BoardState, Color, Move, PieceKind, Position};

impl BoardState {
    /// Guard shared by the per-kind generators.
    pub(crate) fn expect_piece(
        &self,
        kind: PieceKind,
        color: Color,
        at: Position,
    ) -> Result<(), ChessError> {
        let found = self.get(at);
        if found.is(kind, color) {
            Ok(())
        } else {
            Err(ChessError::PreconditionViolation {
                expected: kind,
                found,
                at,
            })
        }
    }

    /// Pseudo-legal destinations for whatever stands on `from`.
    pub fn pseudo_destinations(&self, from: Position) -> Result<Vec<Position>, ChessError> {
        let piece = self.get(from);
        let (kind, color) = match (piece.kind(), piece.color()) {
            (Some(kind), Some(color)) => (kind, color),
            _ => return Err(ChessError::NoPieceAt { at: from }),
        };
        match kind {
            PieceKind::King => self.king_destinations(color, from),
            PieceKind::Queen => self.queen_destinations(color, from),
            PieceKind::Bishop => self.bishop_destinations(color, from),
            PieceKind::Knight => self.knight_destinations(color, from),
            PieceKind::Rook => self.rook_destinations(color, from),
            PieceKind::Pawn => self.pawn_destinations(color, from),
        }
    }

    /// Every pseudo-legal move for `color`, in board order.
    pub fn pseudo_moves_for(&self, color: Color) -> Result<Vec<Move>, ChessError> {
        let mut moves = Vec::new();
        for (from, _) in self.pieces_of(color) {
            moves.extend(
                self.pseudo_destinations(from)?
                    .into_iter()
                    .map(|to| Move::new(from, to)),
            );
        }
        Ok(moves)
    }

    /// Squares holding a `by` piece that attacks `target`.
    ///
    /// Pawns attack diagonally only and castling never attacks, so this never
    /// recurses into castling generation. Nothing attacks an off-board square.
    pub fn attackers_of(&self, target: Position, by: Color) -> Vec<Position> {
        let mut attackers = Vec::new();
        if !target.is_on_board() {
            return attackers;
        }

        attackers.extend(
            KNIGHT_TARGETS[target.index()]
                .iter()
                .copied()
                .filter(|&from| self.get(from).is(PieceKind::Knight, by)),
        );
        attackers.extend(
            KING_TARGETS[target.index()]
                .iter()
                .copied()
                .filter(|&from| self.get(from).is(PieceKind::King, by)),
        );

        let back = -by.pawn_direction();
        for dx in [-1, 1] {
            let from = target.offset(dx, back);
            if from.is_on_board() && self.get(from).is(PieceKind::Pawn, by) {
                attackers.push(from);
            }
        }

        let lines = [
            (&ROOK_DIRECTIONS, PieceKind::Rook),
            (&BISHOP_DIRECTIONS, PieceKind::Bishop),
        ];
        for (directions, slider) in lines {
            for &(dx, dy) in directions.iter() {
                if let Some(from) = self.first_blocker(target, dx, dy) {
                    let piece = self.get(from);
                    if piece.is(slider, by) || piece.is(PieceKind::Queen, by) {
                        attackers.push(from);
                    }
                }
            }
        }

        attackers
    }

    #[inline]
    pub fn is_square_attacked(&self, target: Position, by: Color) -> bool {
        !self.attackers_of(target, by).is_empty()
    }

    /// Every `by` move that lands on `target`.
    pub fn moves_towards(&self, target: Position, by: Color) -> Vec<Move> {
        self.attackers_of(target, by)
            .into_iter()
            .map(|from| Move::new(from, target))
            .collect()
    }

    pub fn is_king_in_check(&self, color: Color) -> Result<bool, ChessError> {
        let king = self.find_king(color)?;
        Ok(self.is_square_attacked(king, color.opponent()))
    }
}
