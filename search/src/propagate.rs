//! Cost propagation after a path improvement.
//!
//! When a node's `g_cost` drops, every node generated from it may now have a
//! cheaper route. [`propagate_improvement`] walks outward from the improved
//! node over the recorded `discovered` edges, breadth-first:
//!
//! - a tree child (current parent is the improved node) inherits the new
//!   depth;
//! - any other discovered node whose path through the improved node is
//!   strictly shorter is re-parented onto it.
//!
//! Each node is relaxed at most once per pass. Relaxed open nodes get a new
//! frontier priority; relaxed closed nodes stay closed, and their own
//! discovered nodes are visited in turn.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use crate::frontier::OpenFrontier;
use crate::node::{NodeId, NodeStatus};
use crate::store::{NodeStore, StoreError};

/// What one propagation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Nodes whose depth dropped, in visit order.
    pub relaxed: Vec<NodeId>,
    /// How many of those switched to a different parent.
    pub reparented: u64,
}

impl PropagationReport {
    /// `true` if the pass changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relaxed.is_empty()
    }
}

/// Push the improvement at `improved` down to everything reachable from it.
///
/// `improved` must already carry its new depth.
///
/// # Errors
///
/// Any [`StoreError`] from a relaxation. These indicate corrupted parent
/// links; the store is left as it was at the failing edge.
pub fn propagate_improvement<S: Clone + Eq + Hash>(
    store: &mut NodeStore<S>,
    open: &mut OpenFrontier,
    improved: NodeId,
) -> Result<PropagationReport, StoreError> {
    let mut report = PropagationReport::default();
    let mut visited: HashSet<NodeId> = HashSet::from([improved]);
    let mut worklist: VecDeque<NodeId> = VecDeque::from([improved]);

    while let Some(current) = worklist.pop_front() {
        let Some(node) = store.get(current) else {
            return Err(StoreError::UnknownNode { id: current });
        };
        let via_depth = node.depth().saturating_add(1);
        let discovered = node.discovered().to_vec();

        for child in discovered {
            if visited.contains(&child) {
                continue;
            }
            let Some(child_node) = store.get(child) else {
                return Err(StoreError::UnknownNode { id: child });
            };
            if via_depth >= child_node.depth() {
                continue;
            }

            let relaxed = store.relax(child, current)?;
            if relaxed.reparented {
                report.reparented += 1;
            }
            if store[child].status() == NodeStatus::Open {
                open.reprioritize(child, store[child].f_cost());
            }
            visited.insert(child);
            report.relaxed.push(child);
            worklist.push_back(child);
        }
    }
    Ok(report)
}
