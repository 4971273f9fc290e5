//! Heuristic contract.
//!
//! A heuristic estimates the remaining cost from a state to the goal. The
//! search calls it once per distinct state, when the node is created, and
//! never re-evaluates it.

/// Remaining-cost estimator.
///
/// # Contract
///
/// - Values must be finite and non-negative. Anything else terminates the
///   search with `HeuristicContractViolation`.
/// - Must be deterministic.
/// - Admissibility (never overestimating) is what makes the returned path
///   optimal; the search does not check it.
///
/// Closures `Fn(&S) -> f64` implement this trait directly.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S) -> f64;

    /// Stable identifier recorded in audit graphs and reports.
    fn heuristic_id(&self) -> &str {
        "anonymous"
    }
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> f64,
{
    fn estimate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Always 0. Turns A* into uniform-cost search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<S> Heuristic<S> for ZeroHeuristic {
    fn estimate(&self, _state: &S) -> f64 {
        0.0
    }

    fn heuristic_id(&self) -> &str {
        "zero"
    }
}

/// Finite and non-negative.
#[must_use]
pub fn is_valid_estimate(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
