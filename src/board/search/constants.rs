//! Search scores.

/// Base score of a checkmate. The remaining depth is added on top, so a mate
/// found closer to the root scores higher for the winner.
pub const MATE_SCORE: i32 = 1_000_000;

/// Score of a stalemate.
pub const DRAW_SCORE: i32 = 0;

/// Deepest tree the search will build.
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Scores with absolute value >= this are mate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE;

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}
