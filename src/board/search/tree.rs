//! Game tree built by committing and undoing moves on one board.

use crate::board::error::ChessError;
use crate::board::eval::Evaluator;
use crate::board::rules::Outcome;
use crate::board::{Board, BoardState, Color, Move};
use crate::cache::QueryCache;
use crate::sync::StopFlag;

use super::constants::{DRAW_SCORE, MATE_SCORE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveNode {
    pub children: Vec<MoveNode>,
    /// Negamax value from the point of view of the side that played
    /// `parent_move`. Unset on the root and before scoring.
    pub score: Option<i32>,
    /// Side to move at this node.
    pub color: Color,
    /// Snapshot kept only on leaves, for evaluation.
    pub state: Option<BoardState>,
    pub parent_move: Option<Move>,
    /// Set when the side to move had no legal move before the depth ran out.
    pub terminal: Option<Outcome>,
    /// Plies left below this node when it was built.
    pub depth: u32,
}

impl MoveNode {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Nodes in this subtree, this one included.
    pub fn count_nodes(&self) -> u64 {
        1 + self.children.iter().map(MoveNode::count_nodes).sum::<u64>()
    }

    /// Index of the first child with the highest score.
    pub fn best_child_index(&self) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (idx, child) in self.children.iter().enumerate() {
            if let Some(score) = child.score {
                if best.map_or(true, |(_, b)| score > b) {
                    best = Some((idx, score));
                }
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Moves along the first best child at every level.
    pub fn principal_variation(&self) -> Vec<Move> {
        let mut pv = Vec::new();
        let mut node = self;
        while let Some(idx) = node.best_child_index() {
            node = &node.children[idx];
            match node.parent_move {
                Some(mv) => pv.push(mv),
                None => break,
            }
        }
        pv
    }
}

/// Score of a node whose side to move has no legal move, from that side's
/// point of view.
#[inline]
pub fn terminal_score(outcome: Outcome, depth: u32) -> i32 {
    match outcome {
        Outcome::Checkmate => -(MATE_SCORE + depth as i32),
        Outcome::Stalemate => DRAW_SCORE,
    }
}

/// Shared state of one tree construction.
pub(crate) struct TreeContext<'a> {
    pub(crate) board: &'a mut Board,
    pub(crate) cache: Option<&'a QueryCache>,
    pub(crate) stop: Option<&'a StopFlag>,
    pub(crate) node_limit: Option<u64>,
    pub(crate) nodes: u64,
}

impl TreeContext<'_> {
    fn should_stop(&self) -> bool {
        self.stop.map_or(false, StopFlag::is_stopped)
            || self.node_limit.map_or(false, |limit| self.nodes > limit)
    }

    /// Build the tree below the current board position with `color` to move.
    ///
    /// Every committed move is undone before returning, also on error, so the
    /// board is left as it was found.
    pub(crate) fn construct_node_chain(
        &mut self,
        depth: u32,
        color: Color,
        parent_move: Option<Move>,
    ) -> Result<MoveNode, ChessError> {
        self.nodes += 1;
        if self.should_stop() {
            return Err(ChessError::SearchAborted);
        }

        let mut node = MoveNode {
            children: Vec::new(),
            score: None,
            color,
            state: None,
            parent_move,
            terminal: None,
            depth,
        };

        if depth == 0 {
            node.state = Some(self.board.state().clone());
            return Ok(node);
        }

        let moves = self.board.legal_moves_for(color, self.cache)?;
        if moves.is_empty() {
            node.terminal = Some(if self.board.is_king_in_check(color)? {
                Outcome::Checkmate
            } else {
                Outcome::Stalemate
            });
            return Ok(node);
        }

        node.children.reserve(moves.len());
        for mv in moves {
            self.board.apply(mv)?;
            let child = self.construct_node_chain(depth - 1, color.opponent(), Some(mv));
            self.board.undo()?;
            node.children.push(child?);
        }
        Ok(node)
    }
}

/// Score `node` from its side to move's point of view and store
/// `-negamax(child)` on every child.
pub fn negamax(
    node: &mut MoveNode,
    evaluator: &Evaluator,
    cache: Option<&QueryCache>,
) -> Result<i32, ChessError> {
    if let Some(outcome) = node.terminal {
        return Ok(terminal_score(outcome, node.depth));
    }

    if node.children.is_empty() {
        let state = node
            .state
            .as_ref()
            .ok_or(ChessError::InvalidScore { term: "leaf state" })?;
        let eval = evaluator.evaluate(state, cache)?;
        return Ok(node.color.sign() * eval);
    }

    let mut best = i32::MIN;
    for child in &mut node.children {
        let score = negamax(child, evaluator, cache)?
            .checked_neg()
            .ok_or(ChessError::InvalidScore { term: "negamax" })?;
        child.score = Some(score);
        best = best.max(score);
    }
    Ok(best)
}
