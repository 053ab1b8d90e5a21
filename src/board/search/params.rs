use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::eval::{EvalOptions, Evaluator};
use crate::cache::QueryCache;
use crate::sync::StopFlag;

use super::tree::MoveNode;

/// Orders root children; the child that sorts first is played.
pub type NodeComparator = Arc<dyn Fn(&MoveNode, &MoveNode) -> Ordering + Send + Sync>;

/// How to choose among root children sharing the best score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TieBreak {
    /// The first best child in generation order.
    #[default]
    FirstMax,
    /// A uniform pick among the best children, from an RNG seeded with this value.
    Seeded(u64),
}

/// Bounds on the work a search may do.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    /// Abort once this many nodes have been built.
    pub max_nodes: Option<u64>,
    /// Abort as soon as this flag is raised.
    pub stop: Option<StopFlag>,
}

#[derive(Clone, Default)]
pub struct SearchOptions {
    pub evaluator: Evaluator,
    pub tie_break: TieBreak,
    /// Overrides `tie_break` when set.
    pub comparator: Option<NodeComparator>,
    /// Return the scored tree with the result.
    pub keep_tree: bool,
    pub cache: Option<Arc<QueryCache>>,
    pub limits: SearchLimits,
}

impl SearchOptions {
    pub fn new(eval: EvalOptions) -> Self {
        SearchOptions {
            evaluator: Evaluator::new(eval),
            ..SearchOptions::default()
        }
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[must_use]
    pub fn with_comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&MoveNode, &MoveNode) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<QueryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn keep_tree(mut self, keep: bool) -> Self {
        self.keep_tree = keep;
        self
    }
}

impl fmt::Debug for SearchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOptions")
            .field("evaluator", &self.evaluator)
            .field("tie_break", &self.tie_break)
            .field("comparator", &self.comparator.as_ref().map(|_| "<fn>"))
            .field("keep_tree", &self.keep_tree)
            .field("cache", &self.cache)
            .field("limits", &self.limits)
            .finish()
    }
}
