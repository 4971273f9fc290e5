//! Search policy types.

use std::fmt;

use crate::error::SearchError;

/// Budget, ordering and diagnostics configuration for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on node expansions. Popping the goal is not an expansion, so
    /// a goal on top of Open is accepted even when the cap is spent. `None`
    /// searches until the goal is popped or the frontier empties.
    pub max_expansions: Option<u64>,
    /// Order among frontier entries with equal `f_cost`.
    pub tie_break: TieBreak,
    /// Drop the successor equal to the expanding node's parent without
    /// counting it as a duplicate.
    pub skip_parent_successor: bool,
    /// Build a [`SearchGraph`](crate::graph::SearchGraph) audit trail.
    pub record_graph: bool,
    /// Run the full structural check after every expansion. Quadratic; for
    /// tests and debugging.
    pub check_invariants: bool,
}

impl SearchPolicy {
    /// Reject configurations that cannot describe a meaningful search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is
    /// `Some(0)`: such a run could not even expand the root.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: None,
            tie_break: TieBreak::Lifo,
            skip_parent_successor: true,
            record_graph: false,
            check_invariants: false,
        }
    }
}

/// Which of several equal-cost frontier entries pops first.
///
/// Every insert and every priority change takes a fresh sequence number, so
/// "most recent" means most recently (re)prioritized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TieBreak {
    /// Most recent entry first. Tends to dive toward the goal.
    #[default]
    Lifo,
    /// Oldest entry first.
    Fifo,
}

impl TieBreak {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lifo => "lifo",
            Self::Fifo => "fifo",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
