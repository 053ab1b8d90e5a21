use std::fmt;

use crate::board::Move;

use super::constants::is_mate_score;

/// Progress of one completed search depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u32,
    pub nodes: u64,
    pub score: Option<i32>,
    pub time_ms: u128,
    pub pv: Vec<Move>,
}

impl SearchInfo {
    fn score_text(&self) -> String {
        match self.score {
            None => "none".to_string(),
            Some(s) if is_mate_score(s) => {
                if s > 0 { "mate +" } else { "mate -" }.to_string()
            }
            Some(s) => format!("cp {s}"),
        }
    }

    pub(crate) fn report(&self) {
        log::debug!("{self}");
    }
}

impl fmt::Display for SearchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pv: Vec<String> = self.pv.iter().map(ToString::to_string).collect();
        write!(
            f,
            "depth {} score {} nodes {} time {} pv {}",
            self.depth,
            self.score_text(),
            self.nodes,
            self.time_ms,
            pv.join(" ")
        )
    }
}
