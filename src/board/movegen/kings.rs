use super::super::attack_tables::KING_TARGETS;
use super::super::error::ChessError;
use super::super::{BoardState, CastleSide, Color, PieceKind, Position};

impl BoardState {
    /// Adjacent squares plus any castling destination currently available.
    pub fn king_destinations(
        &self,
        color: Color,
        from: Position,
    ) -> Result<Vec<Position>, ChessError> {
        self.expect_piece(PieceKind::King, color, from)?;
        let mut targets = self.king_steps(color, from);
        for side in CastleSide::BOTH {
            if self.can_castle(color, from, side) {
                targets.push(Position::new(side.king_target_file(), from.y));
            }
        }
        Ok(targets)
    }

    pub(crate) fn king_steps(&self, color: Color, from: Position) -> Vec<Position> {
        KING_TARGETS[from.index()]
            .iter()
            .copied()
            .filter(|&to| !self.get(to).is_color(color))
            .collect()
    }

    /// Right present, king and rook on their home squares, every square
    /// between them empty, and no square the king stands on or crosses attacked.
    pub(crate) fn can_castle(&self, color: Color, from: Position, side: CastleSide) -> bool {
        let rank = color.back_rank();
        if !self.castling.has(color, side) || from != Position::new(4, rank) {
            return false;
        }
        if !self
            .get(Position::new(side.rook_file(), rank))
            .is(PieceKind::Rook, color)
        {
            return false;
        }

        let (low, high) = if side.rook_file() < from.x {
            (side.rook_file() + 1, from.x - 1)
        } else {
            (from.x + 1, side.rook_file() - 1)
        };
        if (low..=high).any(|x| !self.is_empty(Position::new(x, rank))) {
            return false;
        }

        let target = side.king_target_file();
        let (path_low, path_high) = if target < from.x {
            (target, from.x)
        } else {
            (from.x, target)
        };
        let enemy = color.opponent();
        !(path_low..=path_high).any(|x| self.is_square_attacked(Position::new(x, rank), enemy))
    }
}
