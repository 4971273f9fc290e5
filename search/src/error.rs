//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (contract violations, caught panics, budget exhaustion) are expressed via
//! [`crate::graph::TerminationReason`] and leave the node store intact for
//! inspection.

/// Typed failure for pre-flight search validation.
///
/// Returned before the first expansion. No store or audit trail is produced
/// because no search steps were taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy cannot describe a meaningful search.
    InvalidPolicy { detail: String },
    /// The heuristic returned a negative or non-finite value for the root.
    /// `value` is the rendered number.
    HeuristicContractViolation { value: String },
    /// The heuristic panicked while estimating the root.
    HeuristicPanicked,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::HeuristicContractViolation { value } => write!(
                f,
                "heuristic returned {value} for the root; estimates must be finite and non-negative"
            ),
            Self::HeuristicPanicked => write!(f, "heuristic panicked while estimating the root"),
        }
    }
}

impl std::error::Error for SearchError {}
