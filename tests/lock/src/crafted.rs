//! Small hand-built graphs that force specific search behaviour.
//!
//! States are labels; edges are directed and listed in successor order.
//! Heuristic values default to 0, which is consistent on every graph here
//! except where a large value is planted to delay a cheap route.

use lodestar_search::contract::SearchWorld;
use lodestar_search::heuristic::Heuristic;

/// A directed graph over `&'static str` labels.
#[derive(Debug, Clone, Copy)]
pub struct CraftedGraph {
    pub name: &'static str,
    pub edges: &'static [(&'static str, &'static [&'static str])],
    pub estimates: &'static [(&'static str, f64)],
}

impl CraftedGraph {
    /// A heuristic reading the planted estimates.
    #[must_use]
    pub const fn heuristic(&self) -> PlantedHeuristic {
        PlantedHeuristic {
            estimates: self.estimates,
        }
    }
}

impl SearchWorld for CraftedGraph {
    type State = &'static str;

    fn world_id(&self) -> &str {
        self.name
    }

    fn successors(&self, state: &&'static str) -> Vec<&'static str> {
        self.edges
            .iter()
            .find(|(from, _)| from == state)
            .map(|(_, to)| to.to_vec())
            .unwrap_or_default()
    }

    fn identity_bytes(&self, state: &&'static str) -> Vec<u8> {
        state.as_bytes().to_vec()
    }
}

/// Per-label estimates, 0 for unlisted labels.
#[derive(Debug, Clone, Copy)]
pub struct PlantedHeuristic {
    estimates: &'static [(&'static str, f64)],
}

impl Heuristic<&'static str> for PlantedHeuristic {
    fn estimate(&self, state: &&'static str) -> f64 {
        self.estimates
            .iter()
            .find(|(label, _)| label == state)
            .map_or(0.0, |&(_, h)| h)
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn heuristic_id(&self) -> &str {
        "planted"
    }
}

/// `C` is closed at depth 3 via `L1, L2`, then reached at depth 2 via the
/// delayed `P` and re-opened; its closed child `D` is relaxed with it.
pub const REOPEN: CraftedGraph = CraftedGraph {
    name: "crafted_reopen",
    edges: &[
        ("S", &["L1", "P"]),
        ("L1", &["L2"]),
        ("L2", &["C"]),
        ("P", &["C"]),
        ("C", &["D"]),
        ("D", &["G"]),
    ],
    estimates: &[("P", 10.0), ("D", 20.0)],
};

/// `Y` is first parented by `Z`. When `X` is re-opened at a lower cost,
/// propagation walks `X`'s discovered edge to `Y` and re-parents it.
pub const REPARENT: CraftedGraph = CraftedGraph {
    name: "crafted_reparent",
    edges: &[
        ("S", &["L1", "P"]),
        ("L1", &["L2"]),
        ("L2", &["X", "Z"]),
        ("Z", &["Y"]),
        ("X", &["Y"]),
        ("P", &["X"]),
        ("Y", &["G"]),
    ],
    estimates: &[("P", 10.0), ("Y", 20.0)],
};

/// `X` is generated at depth 3 via `L1, L2` and stays open behind its large
/// estimate until the delayed `P` reaches it at depth 2. The cheaper route is
/// taken in place: no close, no re-open.
pub const IMPROVE_OPEN: CraftedGraph = CraftedGraph {
    name: "crafted_improve_open",
    edges: &[
        ("S", &["L1", "P"]),
        ("L1", &["L2"]),
        ("L2", &["X"]),
        ("P", &["X"]),
        ("X", &["Y"]),
        ("Y", &["G"]),
    ],
    estimates: &[("P", 1.5), ("X", 10.0)],
};

/// Two equal-cost routes to `G`. The tie-break decides which one wins.
pub const DIAMOND: CraftedGraph = CraftedGraph {
    name: "crafted_diamond",
    edges: &[("S", &["A", "B"]), ("A", &["G"]), ("B", &["G"])],
    estimates: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successors_follow_edge_order() {
        assert_eq!(REOPEN.successors(&"S"), vec!["L1", "P"]);
        assert!(REOPEN.successors(&"G").is_empty());
    }

    #[test]
    fn unlisted_labels_estimate_zero() {
        let h = REPARENT.heuristic();
        assert!((h.estimate(&"Y") - 20.0).abs() < f64::EPSILON);
        assert!(h.estimate(&"S").abs() < f64::EPSILON);
    }
}
