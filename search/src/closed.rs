//! Closed set: nodes already expanded.

use std::collections::HashSet;
use std::hash::Hash;

use crate::node::NodeId;
use crate::store::NodeStore;

/// Handles of expanded nodes. A closed node leaves only by being re-opened.
#[derive(Debug, Clone, Default)]
pub struct ClosedSet {
    members: HashSet<NodeId>,
}

impl ClosedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the node was already closed.
    pub fn insert(&mut self, node: NodeId) -> bool {
        self.members.insert(node)
    }

    /// Returns `false` if the node was not closed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.members.remove(&node)
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    /// The closed node holding `state`, if any.
    #[must_use]
    pub fn find_by_state<S: Clone + Eq + Hash>(
        &self,
        store: &NodeStore<S>,
        state: &S,
    ) -> Option<NodeId> {
        store.lookup(state).filter(|&node| self.contains(node))
    }

    /// Closed handles, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
