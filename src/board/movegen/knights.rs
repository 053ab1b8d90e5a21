use super::super::attack_tables::KNIGHT_TARGETS;
use super::super::error::ChessError;
use super::super::{BoardState, Color, PieceKind, Position};

impl BoardState {
    pub fn knight_destinations(
        &self,
        color: Color,
        from: Position,
    ) -> Result<Vec<Position>, ChessError> {
        self.expect_piece(PieceKind::Knight, color, from)?;
        Ok(KNIGHT_TARGETS[from.index()]
            .iter()
            .copied()
            .filter(|&to| !self.get(to).is_color(color))
            .collect())
    }
}
