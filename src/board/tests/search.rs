//! Tree construction, negamax and root selection.

use std::sync::Arc;

use super::sq;
use crate::board::{
    construct_node_chain, iterative_search, negamax, search, terminal_score, Board, ChessError,
    Color, EvalOptions, Evaluator, Move, Outcome, SearchLimits, SearchOptions, TieBreak,
    DRAW_SCORE, MATE_SCORE,
};
use crate::cache::QueryCache;
use crate::sync::StopFlag;

const HANGING_PAWN: &str = "rnbqkbnr/ppppp1pp/8/5p2/6PP/8/PPPPPP2/RNBQKBNR w - - 0 1";
const BACK_RANK: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

fn material() -> SearchOptions {
    SearchOptions::new(EvalOptions::material_only())
}

#[test]
fn test_depth_one_takes_hanging_pawn() {
    let mut board = Board::from_fen(HANGING_PAWN);
    let result = search(&mut board, 1, &material()).unwrap();
    assert_eq!(result.best_score, Some(150));
    assert_eq!(result.best_move, Some(Move::new(sq("g4"), sq("f5"))));
    assert!(!result.is_checkmate);
    assert!(!result.is_stalemate);
    assert_eq!(board.to_fen(), HANGING_PAWN);
}

#[test]
fn test_black_side_uses_its_own_perspective() {
    let state = Board::from_fen(HANGING_PAWN).into_state().mirrored();
    let mut board = Board::from_state(state);
    assert_eq!(board.side_to_move(), Color::Black);
    let result = search(&mut board, 1, &material()).unwrap();
    assert_eq!(result.best_score, Some(150));
    assert_eq!(result.best_move, Some(Move::new(sq("g5"), sq("f4"))));
}

#[test]
fn test_search_is_deterministic() {
    let mut board = Board::new();
    let first = search(&mut board, 2, &material()).unwrap();
    let second = search(&mut board, 2, &material()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_finds_mate_in_one() {
    let mut board = Board::from_fen(BACK_RANK);
    let result = search(&mut board, 2, &material()).unwrap();
    assert_eq!(result.best_move, Some(Move::new(sq("a1"), sq("a8"))));
    assert_eq!(result.best_score, Some(MATE_SCORE + 1));
    assert_eq!(result.principal_variation, vec![Move::new(sq("a1"), sq("a8"))]);
}

#[test]
fn test_root_checkmate_and_stalemate() {
    let mut mated =
        Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let result = search(&mut mated, 2, &material()).unwrap();
    assert_eq!(result.best_move, None);
    assert_eq!(result.best_score, None);
    assert!(result.is_checkmate);
    assert!(!result.is_stalemate);

    let mut stale = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let result = search(&mut stale, 2, &material()).unwrap();
    assert_eq!(result.best_move, None);
    assert!(result.is_stalemate);
    assert!(!result.is_checkmate);
}

#[test]
fn test_depth_zero_has_no_move() {
    let mut board = Board::new();
    let result = search(&mut board, 0, &material()).unwrap();
    assert_eq!(result.best_move, None);
    assert_eq!(result.nodes, 1);
    assert!(!result.is_checkmate && !result.is_stalemate);
}

#[test]
fn test_terminal_scores() {
    assert_eq!(terminal_score(Outcome::Checkmate, 3), -(MATE_SCORE + 3));
    assert_eq!(terminal_score(Outcome::Stalemate, 3), DRAW_SCORE);
    assert!(crate::board::is_mate_score(MATE_SCORE + 1));
    assert!(!crate::board::is_mate_score(20_000));
}

#[test]
fn test_tree_shape_and_negamax() {
    let mut board = Board::new();
    let mut root = construct_node_chain(&mut board, 2, Color::White, None).unwrap();
    assert_eq!(root.children.len(), 20);
    assert!(root.children.iter().all(|c| c.children.len() == 20));
    assert_eq!(root.count_nodes(), 1 + 20 + 400);
    assert!(root.children[0].children[0].state.is_some());
    assert!(root.state.is_none());
    assert_eq!(board.history_len(), 0);

    let evaluator = Evaluator::new(EvalOptions::material_only());
    let value = negamax(&mut root, &evaluator, None).unwrap();
    assert_eq!(value, 0);
    assert!(root.children.iter().all(|c| c.score == Some(0)));
    assert_eq!(root.score, None);
}

#[test]
fn test_negamax_scores_children_from_mover_view() {
    let mut board = Board::from_fen(HANGING_PAWN);
    let mut root = construct_node_chain(&mut board, 1, Color::White, None).unwrap();
    let evaluator = Evaluator::new(EvalOptions::material_only());
    assert_eq!(negamax(&mut root, &evaluator, None).unwrap(), 150);

    let capture = root
        .children
        .iter()
        .find(|c| c.parent_move == Some(Move::new(sq("g4"), sq("f5"))))
        .unwrap();
    assert_eq!(capture.score, Some(150));
    assert_eq!(capture.color, Color::Black);
}

#[test]
fn test_first_max_is_first_generated() {
    let mut board = Board::new();
    let first = board.legal_moves_for(Color::White, None).unwrap()[0];
    let result = search(&mut board, 1, &material()).unwrap();
    assert_eq!(result.best_move, Some(first));
}

#[test]
fn test_seeded_tie_break_is_reproducible() {
    let mut board = Board::new();
    let options = material().with_tie_break(TieBreak::Seeded(7));
    let a = search(&mut board, 1, &options).unwrap();
    let b = search(&mut board, 1, &options).unwrap();
    assert_eq!(a.best_move, b.best_move);
    assert_eq!(a.best_score, Some(0));

    let legal = board.legal_moves_for(Color::White, None).unwrap();
    assert!(legal.contains(&a.best_move.unwrap()));
}

#[test]
fn test_comparator_overrides_tie_break() {
    let mut board = Board::new();
    let options = material().with_comparator(|a, b| a.parent_move.cmp(&b.parent_move));
    let result = search(&mut board, 1, &options).unwrap();
    let lowest = board
        .legal_moves_for(Color::White, None)
        .unwrap()
        .into_iter()
        .min();
    assert_eq!(result.best_move, lowest);
}

#[test]
fn test_keep_tree_returns_scored_root() {
    let mut board = Board::new();
    let result = search(&mut board, 2, &material().keep_tree(true)).unwrap();
    let root = result.root.expect("tree kept");
    assert_eq!(root.count_nodes(), result.nodes);
    assert_eq!(result.nodes, 421);

    let result = search(&mut board, 2, &material()).unwrap();
    assert!(result.root.is_none());
}

#[test]
fn test_node_budget_aborts_and_restores() {
    let mut board = Board::new();
    let options = material().with_limits(SearchLimits {
        max_nodes: Some(100),
        stop: None,
    });
    assert_eq!(search(&mut board, 3, &options), Err(ChessError::SearchAborted));
    assert_eq!(board.to_fen(), crate::board::START_FEN);
    assert_eq!(board.history_len(), 0);
}

#[test]
fn test_stop_flag_aborts() {
    let mut board = Board::new();
    let options = material().with_limits(SearchLimits {
        max_nodes: None,
        stop: Some(StopFlag::stopped()),
    });
    assert_eq!(search(&mut board, 2, &options), Err(ChessError::SearchAborted));
    assert_eq!(board.history_len(), 0);
}

#[test]
fn test_iterative_keeps_last_completed_depth() {
    let mut board = Board::new();
    let options = material().with_limits(SearchLimits {
        max_nodes: Some(200),
        stop: None,
    });
    let result = iterative_search(&mut board, 3, &options).unwrap();
    assert_eq!(result.depth, 1);
    assert!(result.best_move.is_some());
    assert_eq!(board.to_fen(), crate::board::START_FEN);
}

#[test]
fn test_iterative_matches_fixed_depth() {
    let mut board = Board::from_fen(BACK_RANK);
    let fixed = search(&mut board, 2, &material()).unwrap();
    let deepened = iterative_search(&mut board, 2, &material()).unwrap();
    assert_eq!(deepened.depth, 2);
    assert_eq!(deepened.best_move, fixed.best_move);
    assert_eq!(deepened.best_score, fixed.best_score);
}

#[test]
fn test_cache_does_not_change_result() {
    let mut board = Board::from_fen(HANGING_PAWN);
    let plain = search(&mut board, 2, &material()).unwrap();
    let cache = Arc::new(QueryCache::new(4096));
    let cached = search(&mut board, 2, &material().with_cache(Arc::clone(&cache))).unwrap();
    assert_eq!(plain.best_move, cached.best_move);
    assert_eq!(plain.best_score, cached.best_score);
    assert!(!cache.is_empty());
}

#[test]
fn test_board_search_method() {
    let mut board = Board::from_fen(HANGING_PAWN);
    let result = board.search(1, &material()).unwrap();
    assert_eq!(result.best_move, Some(Move::new(sq("g4"), sq("f5"))));
}
