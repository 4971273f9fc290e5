//! Open frontier: a min-priority queue over node handles with decrease-key.
//!
//! Decrease-key is lazy. Reprioritizing pushes a fresh heap entry and records
//! its rank as the node's live rank; older entries for the node become stale
//! and are discarded when they surface. Ranks are unique per entry, so exactly
//! one heap entry per open node is ever live.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use crate::node::{FrontierKey, NodeId};
use crate::policy::TieBreak;
use crate::store::NodeStore;

/// A frontier entry wrapping a node handle with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f_cost` first).
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// The set of generated, not yet expanded nodes.
#[derive(Debug)]
pub struct OpenFrontier {
    heap: BinaryHeap<FrontierEntry>,
    /// Live key per open node.
    live: HashMap<NodeId, FrontierKey>,
    next_sequence: u64,
    tie_break: TieBreak,
    high_water: u64,
}

impl OpenFrontier {
    #[must_use]
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_sequence: 0,
            tie_break,
            high_water: 0,
        }
    }

    /// Add `node` with priority `f_cost`.
    ///
    /// Returns `false` (and changes nothing) if the node is already open.
    pub fn insert(&mut self, node: NodeId, f_cost: f64) -> bool {
        if self.live.contains_key(&node) {
            return false;
        }
        self.push_entry(node, f_cost);
        let size = self.live.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        true
    }

    /// Give an open node a new priority and a fresh tie-break sequence.
    ///
    /// Returns `false` if the node is not open.
    pub fn reprioritize(&mut self, node: NodeId, f_cost: f64) -> bool {
        if !self.live.contains_key(&node) {
            return false;
        }
        self.push_entry(node, f_cost);
        true
    }

    /// Put back a node just taken by [`OpenFrontier::pop_with_key`], keeping
    /// its key so the queue order is unchanged.
    pub(crate) fn restore(&mut self, node: NodeId, key: FrontierKey) {
        if self.live.contains_key(&node) {
            return;
        }
        self.live.insert(node, key);
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
        });
    }

    /// Remove and return the open node with the lowest key.
    pub fn pop_lowest_cost(&mut self) -> Option<NodeId> {
        self.pop_with_key().map(|(node, _)| node)
    }

    /// Like [`OpenFrontier::pop_lowest_cost`], also returning the key the node
    /// held when popped.
    pub fn pop_with_key(&mut self) -> Option<(NodeId, FrontierKey)> {
        while let Some(entry) = self.heap.pop() {
            let key = entry.key.0;
            if self.live.get(&entry.node) == Some(&key) {
                self.live.remove(&entry.node);
                return Some((entry.node, key));
            }
        }
        None
    }

    /// The live key of an open node.
    #[must_use]
    pub fn key_of(&self, node: NodeId) -> Option<FrontierKey> {
        self.live.get(&node).copied()
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.live.contains_key(&node)
    }

    /// The open node holding `state`, if any.
    #[must_use]
    pub fn find_by_state<S: Clone + Eq + Hash>(
        &self,
        store: &NodeStore<S>,
        state: &S,
    ) -> Option<NodeId> {
        store.lookup(state).filter(|&node| self.contains(node))
    }

    /// Open handles, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.live.keys().copied()
    }

    /// Number of open nodes (stale heap entries excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Heap entries superseded by a later reprioritization.
    #[must_use]
    pub fn stale_entries(&self) -> usize {
        self.heap.len() - self.live.len()
    }

    /// High-water mark of open node count.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    #[must_use]
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    fn push_entry(&mut self, node: NodeId, f_cost: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let rank = match self.tie_break {
            TieBreak::Fifo => sequence,
            TieBreak::Lifo => u64::MAX - sequence,
        };
        let key = FrontierKey { f_cost, rank };
        self.live.insert(node, key);
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
        });
    }
}
