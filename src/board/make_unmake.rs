use super::error::{ChessError, PositionError};
use super::{Board, CastleSide, Color, Move, MoveResult, Piece, PieceKind, Position};

/// Castling right tied to a corner square, if any.
#[inline]
fn corner_right(pos: Position) -> Option<(Color, CastleSide)> {
    match (pos.x, pos.y) {
        (0, 0) => Some((Color::White, CastleSide::Queen)),
        (7, 0) => Some((Color::White, CastleSide::King)),
        (0, 7) => Some((Color::Black, CastleSide::Queen)),
        (7, 7) => Some((Color::Black, CastleSide::King)),
        _ => None,
    }
}

/// Side a king move castles towards: same rank, exactly two files.
#[inline]
pub(crate) fn castling_side(from: Position, to: Position) -> Option<CastleSide> {
    if from.y != to.y {
        return None;
    }
    match to.x - from.x {
        2 => Some(CastleSide::King),
        -2 => Some(CastleSide::Queen),
        _ => None,
    }
}

impl Board {
    /// Commit the move `from -> to` without any legality check.
    ///
    /// The prior state is pushed onto the history first, so [`Board::undo`]
    /// restores it exactly.
    pub fn apply_move(&mut self, from: Position, to: Position) -> Result<MoveResult, ChessError> {
        let moved = self.state.get(from);
        let (kind, color) = match (moved.kind(), moved.color()) {
            (Some(kind), Some(color)) => (kind, color),
            _ => return Err(ChessError::NoPieceAt { at: from }),
        };
        if !to.is_on_board() {
            return Err(PositionError::OutOfRange { x: to.x, y: to.y }.into());
        }

        self.history.push(self.state.clone());
        let state = &mut self.state;

        state.set(from, Piece::EMPTY);
        let target = state.get(to);
        state.set(to, moved);
        let captured = (!target.is_empty()).then_some(target);

        let mut special_moves = Vec::new();
        let king_home = Position::new(4, color.back_rank());
        if kind == PieceKind::King && from == king_home {
            if let Some(side) = castling_side(from, to) {
                let rook_from = Position::new(side.rook_file(), from.y);
                let rook_to = Position::new(side.rook_target_file(), from.y);
                let rook = state.get(rook_from);
                if rook.is(PieceKind::Rook, color) {
                    state.set(rook_from, Piece::EMPTY);
                    state.set(rook_to, rook);
                    special_moves.push(Move::new(rook_from, rook_to));
                }
            }
        }

        let mut rights = state.castling_rights();
        if kind == PieceKind::King {
            rights.remove_color(color);
        }
        for corner in [from, to] {
            if let Some((owner, side)) = corner_right(corner) {
                rights.remove(owner, side);
            }
        }
        if rights != state.castling_rights() {
            state.set_castling_rights(rights);
        }

        if captured.is_some() || kind == PieceKind::Pawn {
            state.halfmove_clock = 0;
        } else {
            state.halfmove_clock = state.halfmove_clock.saturating_add(1);
        }

        state.toggle_turn();
        if state.side_to_move() == Color::White {
            state.increment_fullmove_number();
        }

        Ok(MoveResult {
            moved,
            captured,
            special_moves,
        })
    }

    pub fn apply(&mut self, mv: Move) -> Result<MoveResult, ChessError> {
        self.apply_move(mv.from, mv.to)
    }

    /// Restore the state from before the most recent committed move.
    pub fn undo(&mut self) -> Result<(), ChessError> {
        self.state = self.history.pop()?;
        Ok(())
    }

    /// Count leaf nodes of the legal-move tree to `depth` plies.
    pub fn perft(&mut self, depth: usize) -> Result<u64, ChessError> {
        if depth == 0 {
            return Ok(1);
        }

        let side = self.side_to_move();
        let moves = self.legal_moves_for(side, None)?;
        if depth == 1 {
            return Ok(moves.len() as u64);
        }

        let mut nodes = 0;
        for mv in moves {
            self.apply(mv)?;
            let count = self.perft(depth - 1);
            self.undo()?;
            nodes += count?;
        }

        Ok(nodes)
    }
}
