//! Property-based tests using proptest.

use crate::board::{Board, BoardState, Color, EvalOptions, Evaluator, Move};
use crate::cache::QueryCache;
use proptest::prelude::*;
use rand::prelude::*;

/// Strategy to generate a random playout length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=24usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `num_moves` random legal moves; returns how many were played.
fn random_playout(board: &mut Board, rng: &mut StdRng, num_moves: usize) -> usize {
    let mut played = 0;
    for _ in 0..num_moves {
        let side = board.side_to_move();
        let moves = board.legal_moves_for(side, None).unwrap();
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        board.apply(mv).unwrap();
        played += 1;
    }
    played
}

proptest! {
    /// Property: apply followed by undo restores the board exactly
    #[test]
    fn prop_apply_undo_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let initial = board.state().clone();

        let played = random_playout(&mut board, &mut rng, num_moves);
        for _ in 0..played {
            board.undo().unwrap();
        }

        prop_assert_eq!(board.state(), &initial);
        prop_assert_eq!(board.history_len(), 0);
    }

    /// Property: the incremental signature always equals a full recomputation
    #[test]
    fn prop_signature_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            if random_playout(&mut board, &mut rng, 1) == 0 {
                break;
            }
            prop_assert_eq!(board.signature(), board.state().calculate_signature());
        }
    }

    /// Property: notation round-trip preserves the position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_playout(&mut board, &mut rng, num_moves);

        let fen = board.to_fen();
        let parsed = BoardState::try_from_fen(&fen).unwrap();
        prop_assert_eq!(&parsed, board.state());
        prop_assert_eq!(parsed.to_fen(), fen);
    }

    /// Property: no legal move leaves the mover's king attacked
    #[test]
    fn prop_legal_moves_keep_king_safe(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_playout(&mut board, &mut rng, num_moves);

        let side = board.side_to_move();
        for mv in board.legal_moves_for(side, None).unwrap() {
            board.apply(mv).unwrap();
            let exposed = board.is_king_in_check(side).unwrap();
            board.undo().unwrap();
            prop_assert!(!exposed, "{} leaves the {} king attacked", mv, side);
        }
    }

    /// Property: every legal move is a pseudo-legal move
    #[test]
    fn prop_legal_subset_of_pseudo(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_playout(&mut board, &mut rng, num_moves);

        let side = board.side_to_move();
        let pseudo: Vec<Move> = board.state().pseudo_moves_for(side).unwrap();
        for mv in board.legal_moves_for(side, None).unwrap() {
            prop_assert!(pseudo.contains(&mv));
        }
    }

    /// Property: cached queries agree with uncached ones
    #[test]
    fn prop_cache_transparent(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let cache = QueryCache::new(256);
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_playout(&mut board, &mut rng, num_moves);

        for color in Color::BOTH {
            let plain = board.legal_moves_for(color, None).unwrap();
            let cached = board.legal_moves_for(color, Some(&cache)).unwrap();
            prop_assert_eq!(plain, cached);
        }
    }

    /// Property: mirroring the position negates the evaluation
    #[test]
    fn prop_eval_mirror_symmetry(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_playout(&mut board, &mut rng, num_moves);

        let eval = Evaluator::new(EvalOptions::default());
        let score = eval.evaluate(board.state(), None).unwrap();
        let mirrored = eval.evaluate(&board.state().mirrored(), None).unwrap();
        prop_assert_eq!(score, -mirrored);
    }
}
