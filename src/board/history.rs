use super::error::ChessError;
use super::state::BoardState;

/// Stack of prior states, one pushed before each committed move.
#[derive(Clone, Debug, Default)]
pub(crate) struct History {
    snapshots: Vec<BoardState>,
}

impl History {
    pub(crate) fn new() -> Self {
        History {
            snapshots: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, state: BoardState) {
        self.snapshots.push(state);
    }

    pub(crate) fn pop(&mut self) -> Result<BoardState, ChessError> {
        self.snapshots.pop().ok_or(ChessError::EmptyHistory)
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshots.len()
    }
}
