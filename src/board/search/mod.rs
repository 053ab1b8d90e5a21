//! Full-width negamax search.
//!
//! The tree is built first by committing and undoing every legal move on the
//! caller's board, then scored bottom-up. There is no pruning: depth, a node
//! budget and a stop flag are the only controls.
//!
//! Features:
//! - Explicit checkmate and stalemate scores inside the tree
//! - Deterministic first-max or seeded tie-breaking at the root
//! - Caller-supplied root comparator
//! - Iterative deepening that keeps the deepest completed result

mod constants;
mod info;
mod params;
mod tree;

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub use constants::{is_mate_score, DRAW_SCORE, MATE_SCORE, MAX_SEARCH_DEPTH};
pub use info::SearchInfo;
pub use params::{NodeComparator, SearchLimits, SearchOptions, TieBreak};
pub use tree::{negamax, terminal_score, MoveNode};

use tree::TreeContext;

use super::error::ChessError;
use super::rules::Outcome;
use super::{Board, Color, Move};
use crate::cache::QueryCache;

/// Outcome of a search from the root side's point of view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: Option<i32>,
    /// The root side has no legal move and is in check.
    pub is_checkmate: bool,
    /// The root side has no legal move and is not in check.
    pub is_stalemate: bool,
    pub depth: u32,
    pub nodes: u64,
    pub principal_variation: Vec<Move>,
    /// The scored tree, when requested through `SearchOptions::keep_tree`.
    pub root: Option<MoveNode>,
}

/// Build the tree of all legal lines of `depth` plies with `color` to move.
///
/// The board is restored before returning.
pub fn construct_node_chain(
    board: &mut Board,
    depth: u32,
    color: Color,
    cache: Option<&QueryCache>,
) -> Result<MoveNode, ChessError> {
    let mut ctx = TreeContext {
        board,
        cache,
        stop: None,
        node_limit: None,
        nodes: 0,
    };
    ctx.construct_node_chain(depth, color, None)
}

/// Pick the root child to play.
fn select_best(root: &MoveNode, options: &SearchOptions) -> Option<usize> {
    if root.children.is_empty() {
        return None;
    }

    if let Some(comparator) = &options.comparator {
        return root
            .children
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| comparator(a, b))
            .map(|(idx, _)| idx);
    }

    match options.tie_break {
        TieBreak::FirstMax => root.best_child_index(),
        TieBreak::Seeded(seed) => {
            let best = root.children.iter().filter_map(|c| c.score).max()?;
            let tied: Vec<usize> = root
                .children
                .iter()
                .enumerate()
                .filter(|(_, c)| c.score == Some(best))
                .map(|(idx, _)| idx)
                .collect();
            let mut rng = StdRng::seed_from_u64(seed);
            tied.choose(&mut rng).copied()
        }
    }
}

fn search_with_budget(
    board: &mut Board,
    depth: u32,
    options: &SearchOptions,
    node_limit: Option<u64>,
) -> Result<SearchResult, ChessError> {
    let depth = depth.min(MAX_SEARCH_DEPTH);
    let start = Instant::now();
    let cache = options.cache.as_deref();
    let color = board.side_to_move();

    let mut ctx = TreeContext {
        board,
        cache,
        stop: options.limits.stop.as_ref(),
        node_limit,
        nodes: 0,
    };
    let mut root = ctx.construct_node_chain(depth, color, None)?;
    let nodes = ctx.nodes;

    negamax(&mut root, &options.evaluator, cache)?;

    let best = select_best(&root, options);
    let best_move = best.and_then(|idx| root.children[idx].parent_move);
    let best_score = best.and_then(|idx| root.children[idx].score);

    let mut principal_variation = Vec::new();
    if let Some(idx) = best {
        let child = &root.children[idx];
        principal_variation.extend(child.parent_move);
        principal_variation.extend(child.principal_variation());
    }

    let (is_checkmate, is_stalemate) = if depth == 0 {
        (false, false)
    } else {
        match root.terminal {
            Some(outcome) => (
                outcome == Outcome::Checkmate,
                outcome == Outcome::Stalemate,
            ),
            None => (false, false),
        }
    };

    SearchInfo {
        depth,
        nodes,
        score: best_score,
        time_ms: start.elapsed().as_millis(),
        pv: principal_variation.clone(),
    }
    .report();

    Ok(SearchResult {
        best_move,
        best_score,
        is_checkmate,
        is_stalemate,
        depth,
        nodes,
        principal_variation,
        root: options.keep_tree.then_some(root),
    })
}

/// Search `depth` plies for the side to move.
///
/// The board is mutated during the search and restored before returning,
/// also when the search is aborted.
pub fn search(
    board: &mut Board,
    depth: u32,
    options: &SearchOptions,
) -> Result<SearchResult, ChessError> {
    search_with_budget(board, depth, options, options.limits.max_nodes)
}

/// Search depths `1..=max_depth` and return the deepest completed result.
///
/// When the node budget runs out or the stop flag is raised, the last
/// completed depth is returned; if not even depth 1 completed the error is
/// passed on.
pub fn iterative_search(
    board: &mut Board,
    max_depth: u32,
    options: &SearchOptions,
) -> Result<SearchResult, ChessError> {
    let mut best: Option<SearchResult> = None;
    let mut used = 0u64;

    for depth in 1..=max_depth.clamp(1, MAX_SEARCH_DEPTH) {
        let remaining = match options.limits.max_nodes {
            Some(limit) if used >= limit => break,
            Some(limit) => Some(limit - used),
            None => None,
        };

        match search_with_budget(board, depth, options, remaining) {
            Ok(result) => {
                used += result.nodes;
                let finished = result.best_move.is_none();
                best = Some(result);
                if finished {
                    break;
                }
            }
            Err(ChessError::SearchAborted) if best.is_some() => {
                log::debug!("search aborted at depth {depth}; keeping depth {}", depth - 1);
                break;
            }
            Err(err) => return Err(err),
        }
    }

    best.ok_or(ChessError::SearchAborted)
}

impl Board {
    /// Search the current position; see [`search`].
    pub fn search(
        &mut self,
        depth: u32,
        options: &SearchOptions,
    ) -> Result<SearchResult, ChessError> {
        search(self, depth, options)
    }
}
