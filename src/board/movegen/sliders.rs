use super::super::attack_tables::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};
use super::super::error::ChessError;
use super::super::{BoardState, Color, PieceKind, Position};

/// Type of sliding piece for move generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl SliderType {
    pub(crate) fn directions(self) -> &'static [(i8, i8)] {
        match self {
            SliderType::Bishop => &BISHOP_DIRECTIONS,
            SliderType::Rook => &ROOK_DIRECTIONS,
            SliderType::Queen => &QUEEN_DIRECTIONS,
        }
    }

    fn kind(self) -> PieceKind {
        match self {
            SliderType::Bishop => PieceKind::Bishop,
            SliderType::Rook => PieceKind::Rook,
            SliderType::Queen => PieceKind::Queen,
        }
    }
}

impl BoardState {
    /// Walk each direction until the edge or the first occupied square. An enemy
    /// blocker is included as a capture, an own blocker is not.
    pub(crate) fn ray_cast(
        &self,
        from: Position,
        color: Color,
        directions: &[(i8, i8)],
    ) -> Vec<Position> {
        let mut targets = Vec::new();
        for &(dx, dy) in directions {
            let mut to = from.offset(dx, dy);
            while to.is_on_board() {
                let piece = self.get(to);
                if piece.is_empty() {
                    targets.push(to);
                } else {
                    if !piece.is_color(color) {
                        targets.push(to);
                    }
                    break;
                }
                to = to.offset(dx, dy);
            }
        }
        targets
    }

    pub(crate) fn slider_destinations(
        &self,
        color: Color,
        from: Position,
        slider: SliderType,
    ) -> Result<Vec<Position>, ChessError> {
        self.expect_piece(slider.kind(), color, from)?;
        Ok(self.ray_cast(from, color, slider.directions()))
    }

    pub fn bishop_destinations(
        &self,
        color: Color,
        from: Position,
    ) -> Result<Vec<Position>, ChessError> {
        self.slider_destinations(color, from, SliderType::Bishop)
    }

    pub fn rook_destinations(
        &self,
        color: Color,
        from: Position,
    ) -> Result<Vec<Position>, ChessError> {
        self.slider_destinations(color, from, SliderType::Rook)
    }

    pub fn queen_destinations(
        &self,
        color: Color,
        from: Position,
    ) -> Result<Vec<Position>, ChessError> {
        self.slider_destinations(color, from, SliderType::Queen)
    }

    /// First piece met walking from `from` in direction `(dx, dy)`.
    pub(crate) fn first_blocker(&self, from: Position, dx: i8, dy: i8) -> Option<Position> {
        let mut to = from.offset(dx, dy);
        while to.is_on_board() {
            if !self.get(to).is_empty() {
                return Some(to);
            }
            to = to.offset(dx, dy);
        }
        None
    }
}
