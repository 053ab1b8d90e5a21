#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{EvalOptions, TieBreak};
use crate::cache::DEFAULT_CACHE_CAPACITY;

/// Session defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Plies searched by `GameSession::search`.
    pub depth: u32,
    /// Entries per cache table; 0 disables caching.
    pub cache_capacity: usize,
    pub eval: EvalOptions,
    pub tie_break: TieBreak,
    /// Node budget per search (None = unlimited)
    pub max_nodes: Option<u64>,
    /// Deepen one ply at a time and keep the deepest result that fits the budget.
    pub iterative: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            eval: EvalOptions::default(),
            tie_break: TieBreak::FirstMax,
            max_nodes: None,
            iterative: false,
        }
    }
}
