//! Legality filter, check detection and game end.

use super::sq;
use crate::board::{Board, Color, Move, Outcome, Position};
use crate::cache::QueryCache;

fn sorted(mut squares: Vec<Position>) -> Vec<Position> {
    squares.sort();
    squares
}

#[test]
fn test_start_position_move_count() {
    let mut board = Board::new();
    assert_eq!(board.legal_moves_for(Color::White, None).unwrap().len(), 20);
    assert_eq!(board.legal_moves_for(Color::Black, None).unwrap().len(), 20);
}

#[test]
fn test_pinned_piece_has_no_legal_destination() {
    let mut board = Board::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
    assert!(board.legal_destinations(sq("e2"), None).unwrap().is_empty());

    let pseudo = board.destinations(sq("e2"), false, None).unwrap();
    assert_eq!(pseudo.len(), 9);

    let filter = board.filter_king_vulnerable_moves(sq("e2"), &pseudo).unwrap();
    assert!(filter.valid.is_empty());
    assert_eq!(filter.danger.len(), pseudo.len());
    for danger in &filter.danger {
        assert_eq!(danger.attackers, vec![Move::new(sq("e7"), sq("e1"))]);
    }
}

#[test]
fn test_king_must_leave_check() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
    assert!(board.is_king_in_check(Color::White).unwrap());
    // f1 stays on the rook's rank once the king steps off e1
    assert_eq!(
        sorted(board.legal_destinations(sq("e1"), None).unwrap()),
        sorted(vec![sq("d2"), sq("e2"), sq("f2")])
    );
}

#[test]
fn test_filter_leaves_board_untouched() {
    let mut board = Board::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
    let before = board.state().clone();
    let _ = board.legal_moves_for(Color::White, None).unwrap();
    assert_eq!(board.state(), &before);
    assert_eq!(board.history_len(), 0);
}

#[test]
fn test_checkmate_detected() {
    let mut board =
        Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let status = board.check_status(None).unwrap();
    assert_eq!(status.attacked_kings, vec![sq("e1")]);
    let end = status.end.expect("game over");
    assert_eq!(end.outcome, Outcome::Checkmate);
    assert_eq!(end.side, Color::White);
    assert_eq!(end.king, sq("e1"));
    assert!(status.is_checkmate());
    assert!(!status.is_stalemate());
}

#[test]
fn test_stalemate_detected() {
    let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let status = board.check_status(None).unwrap();
    assert!(status.attacked_kings.is_empty());
    assert!(status.is_stalemate());
    assert_eq!(status.end.map(|e| e.side), Some(Color::Black));
}

#[test]
fn test_check_without_mate() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
    let status = board.check_status(None).unwrap();
    assert_eq!(status.attacked_kings, vec![sq("e1")]);
    assert!(status.end.is_none());
}

#[test]
fn test_kings_only_still_have_moves() {
    let mut board = Board::from_fen("k7/8/8/8/8/8/8/K7 w - - 0 1");
    assert_eq!(board.legal_moves_for(Color::White, None).unwrap().len(), 3);
    assert!(board.check_status(None).unwrap().end.is_none());
}

#[test]
fn test_is_legal_move() {
    let mut board = Board::new();
    assert!(board.is_legal_move(sq("e2"), sq("e4"), None).unwrap());
    assert!(!board.is_legal_move(sq("e2"), sq("e5"), None).unwrap());
    // not Black's turn
    assert!(!board.is_legal_move(sq("e7"), sq("e5"), None).unwrap());
    assert!(!board.is_legal_move(sq("e4"), sq("e5"), None).unwrap());
    assert!(!board
        .is_legal_move(sq("e2"), Position::new(4, 8), None)
        .unwrap());
}

#[test]
fn test_moves_towards_includes_pawn_diagonals() {
    let board = Board::new();
    let mut moves = board.moves_towards(sq("f3"), Color::White, None).unwrap();
    moves.sort();
    let mut expected = vec![
        Move::new(sq("e2"), sq("f3")),
        Move::new(sq("g2"), sq("f3")),
        Move::new(sq("g1"), sq("f3")),
    ];
    expected.sort();
    assert_eq!(moves, expected);
}

#[test]
fn test_cached_queries_match_uncached() {
    let cache = QueryCache::new(1024);
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut board = Board::from_fen(fen);

    let plain = board.legal_moves_for(Color::White, None).unwrap();
    let first = board.legal_moves_for(Color::White, Some(&cache)).unwrap();
    let second = board.legal_moves_for(Color::White, Some(&cache)).unwrap();
    assert_eq!(plain, first);
    assert_eq!(first, second);
    assert!(cache.stats().hits > 0);
}

#[test]
fn test_cache_separates_positions() {
    let cache = QueryCache::new(1024);
    let mut board = Board::new();
    let before = board.legal_destinations(sq("d1"), Some(&cache)).unwrap();
    assert!(before.is_empty());

    board.apply_move(sq("e2"), sq("e4")).unwrap();
    board.apply_move(sq("e7"), sq("e5")).unwrap();
    let after = board.legal_destinations(sq("d1"), Some(&cache)).unwrap();
    assert_eq!(after.len(), 4);
}
