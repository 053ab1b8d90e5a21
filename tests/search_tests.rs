//! Search tests to verify the engine finds correct moves in various positions.

use std::sync::Arc;

use gridchess::board::{
    is_mate_score, iterative_search, parse_position, search, serialize, Board, ChessError,
    EvalOptions, Move, SearchLimits, SearchOptions, MATE_SCORE, START_FEN,
};
use gridchess::cache::QueryCache;
use gridchess::sync::StopFlag;

fn mv(s: &str) -> Move {
    s.parse().expect("valid move")
}

fn material() -> SearchOptions {
    SearchOptions::new(EvalOptions::material_only())
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    // White to move, Qe8# is mate
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q1K1 w - - 0 1");
    let result = search(&mut board, 2, &material()).unwrap();
    assert_eq!(result.best_move, Some(mv("e1e8")), "Should find Qe8#");
    assert!(is_mate_score(result.best_score.unwrap()));
}

/// Test that a mate is preferred over winning material
#[test]
fn prefers_mate_over_material() {
    // Rxd1 wins a knight, Ra8 mates
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R2n2K1 w - - 0 1");
    let result = search(&mut board, 2, &material()).unwrap();
    assert_eq!(result.best_move, Some(mv("a1a8")));
    assert_eq!(result.best_score, Some(MATE_SCORE + 1));
}

/// Test that the engine wins free material
#[test]
fn takes_free_queen() {
    let mut board = Board::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let result = search(&mut board, 2, &material()).unwrap();
    assert_eq!(result.best_move, Some(mv("e4d5")));
    // a pawn against a bare king
    assert_eq!(result.best_score, Some(150));
}

/// Test that the engine moves an attacked rook away
#[test]
fn saves_attacked_rook() {
    // The b5 pawn attacks a4
    let mut board = Board::from_fen("4k3/8/8/1p6/R7/8/8/4K3 w - - 0 1");
    let result = search(&mut board, 2, &material()).unwrap();
    let best = result.best_move.expect("Should find a move");
    assert_eq!(best.from, "a4".parse().unwrap());
    assert_eq!(result.best_score, Some(700 - 150));
}

/// Search must leave the caller's board as it found it
#[test]
fn search_restores_board() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut board = parse_position(fen).unwrap();
    let signature = board.signature();
    search(&mut board, 1, &SearchOptions::default()).unwrap();
    assert_eq!(serialize(&board), fen);
    assert_eq!(board.signature(), signature);
    assert_eq!(board.history_len(), 0);
}

#[test]
fn shared_cache_across_searches() {
    let cache = Arc::new(QueryCache::new(1 << 12));
    let options = material().with_cache(Arc::clone(&cache));
    let mut board = Board::new();

    let first = search(&mut board, 2, &options).unwrap();
    let misses = cache.stats().misses;
    let second = search(&mut board, 2, &options).unwrap();

    assert_eq!(first.best_move, second.best_move);
    assert_eq!(cache.stats().misses, misses, "second search should be all hits");
}

#[test]
fn stop_from_another_thread() {
    let stop = StopFlag::new();
    let handle = stop.clone();
    std::thread::spawn(move || handle.stop()).join().unwrap();

    let options = material().with_limits(SearchLimits {
        max_nodes: None,
        stop: Some(stop),
    });
    let mut board = Board::new();
    assert_eq!(
        iterative_search(&mut board, 3, &options),
        Err(ChessError::SearchAborted)
    );
    assert_eq!(board.to_fen(), START_FEN);
}

#[test]
fn node_budget_limits_depth() {
    let options = material().with_limits(SearchLimits {
        max_nodes: Some(1_000),
        stop: None,
    });
    let mut board = Board::new();
    let result = iterative_search(&mut board, 4, &options).unwrap();
    // depth 1 costs 21 nodes, depth 2 costs 421, depth 3 more than the rest
    assert_eq!(result.depth, 2);
    assert!(result.nodes <= 1_000);
}
