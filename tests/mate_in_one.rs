use serde::Deserialize;

use gridchess::board::{Board, EvalOptions, Move, SearchOptions};

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    #[serde(rename = "type")]
    kind: String,
    fen: String,
    moves: String,
}

fn load_problems() -> Vec<Problem> {
    let data = include_str!("data/problems.json");
    let set: ProblemSet = serde_json::from_str(data).expect("invalid problems.json");
    set.problems
        .into_iter()
        .filter(|p| p.kind == "Mate in One")
        .collect()
}

fn solution(moves: &str) -> Move {
    let first = moves.split(';').next().unwrap_or(moves);
    first.replace('-', "").parse().expect("valid move")
}

fn is_mate_after(fen: &str, mv: Move) -> bool {
    let mut board = Board::from_fen(fen);
    assert!(
        board.is_legal_move(mv.from, mv.to, None).unwrap(),
        "{mv} is not legal in {fen}"
    );
    board.apply(mv).unwrap();
    board.check_status(None).unwrap().is_checkmate()
}

#[test]
fn mate_in_one_suite() {
    for problem in load_problems() {
        let mv = solution(&problem.moves);
        assert!(
            is_mate_after(&problem.fen, mv),
            "mate in one failed for fen: {} move: {}",
            problem.fen,
            problem.moves
        );
    }
}

#[test]
fn mate_search_suite() {
    let options = SearchOptions::new(EvalOptions::material_only());
    for problem in load_problems() {
        let mut board = Board::from_fen(&problem.fen);
        let result = board.search(2, &options).unwrap();
        let best = result
            .best_move
            .unwrap_or_else(|| panic!("no move found for fen: {}", problem.fen));
        assert!(
            is_mate_after(&problem.fen, best),
            "search played {best} in {} which does not mate",
            problem.fen
        );
        assert_eq!(board.to_fen(), Board::from_fen(&problem.fen).to_fen());
    }
}
