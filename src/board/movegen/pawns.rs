use super::super::error::ChessError;
use super::super::{BoardState, Color, PieceKind, Position};

/// The two forward-diagonal squares a pawn of `color` on `from` attacks.
pub(crate) fn pawn_attack_squares(color: Color, from: Position) -> impl Iterator<Item = Position> {
    let dir = color.pawn_direction();
    [from.offset(-1, dir), from.offset(1, dir)]
        .into_iter()
        .filter(|to| to.is_on_board())
}

impl BoardState {
    /// Pushes and diagonal captures. No en passant, and a pawn on its last
    /// rank has nowhere to go.
    pub fn pawn_destinations(
        &self,
        color: Color,
        from: Position,
    ) -> Result<Vec<Position>, ChessError> {
        self.expect_piece(PieceKind::Pawn, color, from)?;
        let mut targets = Vec::with_capacity(4);
        let dir = color.pawn_direction();

        let single = from.offset(0, dir);
        if single.is_on_board() && self.is_empty(single) {
            targets.push(single);
            let double = single.offset(0, dir);
            if from.y == color.pawn_start_rank() && double.is_on_board() && self.is_empty(double)
            {
                targets.push(double);
            }
        }

        targets.extend(pawn_attack_squares(color, from).filter(|&to| {
            let piece = self.get(to);
            !piece.is_empty() && !piece.is_color(color)
        }));

        Ok(targets)
    }
}
