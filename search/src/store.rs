//! `NodeStore`: the arena that owns every node of one search.
//!
//! Nodes live in a `Vec` indexed by [`NodeId`]; a `HashMap` from state to
//! handle enforces one node per distinct state. Parent links are handles, never
//! references, so re-parenting is a field write plus two child-list edits.
//!
//! All structural edits go through [`NodeStore::insert`],
//! [`NodeStore::record_discovered`] and [`NodeStore::relax`]. Each keeps the
//! parent link, the parent's `children` list and `depth` in agreement, which
//! [`NodeStore::check_invariants`] verifies from scratch.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use crate::node::{NodeId, NodeStatus, SearchNode};

/// Typed failure for a structural edit. Fail-closed: the store is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The state already has a node.
    DuplicateState { existing: NodeId },
    /// A handle that this store never issued.
    UnknownNode { id: NodeId },
    /// A relaxation that would not shorten the path.
    CostIncrease {
        id: NodeId,
        current_depth: u32,
        proposed_depth: u32,
    },
    /// The proposed parent descends from the node being relaxed.
    WouldCycle { id: NodeId, parent: NodeId },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateState { existing } => {
                write!(f, "state already stored as node {existing}")
            }
            Self::UnknownNode { id } => write!(f, "unknown node {id}"),
            Self::CostIncrease {
                id,
                current_depth,
                proposed_depth,
            } => write!(
                f,
                "relaxing node {id} from depth {current_depth} to {proposed_depth} is not an improvement"
            ),
            Self::WouldCycle { id, parent } => {
                write!(f, "re-parenting node {id} under {parent} would create a cycle")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// A structural invariant found broken by [`NodeStore::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub node: NodeId,
    pub detail: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}: {}", self.node, self.detail)
    }
}

impl std::error::Error for InvariantViolation {}

/// Outcome of a successful [`NodeStore::relax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relaxed {
    pub old_depth: u32,
    pub new_depth: u32,
    /// The best parent changed.
    pub reparented: bool,
}

/// Arena of search nodes with a state index.
#[derive(Debug, Clone)]
pub struct NodeStore<S> {
    nodes: Vec<SearchNode<S>>,
    index: HashMap<S, NodeId>,
}

impl<S: Clone + Eq + Hash> NodeStore<S> {
    /// A store holding only the root node, open, at depth 0.
    #[must_use]
    pub fn with_root(state: S, h_cost: f64) -> (Self, NodeId) {
        let root = NodeId::from_index(0);
        let mut index = HashMap::new();
        index.insert(state.clone(), root);
        let store = Self {
            nodes: vec![SearchNode {
                id: root,
                state,
                parent: None,
                depth: 0,
                h_cost,
                children: Vec::new(),
                discovered: Vec::new(),
                status: NodeStatus::Open,
            }],
            index,
        };
        (store, root)
    }

    /// Number of nodes ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a store is born with its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode<S>> {
        self.nodes.get(id.index())
    }

    /// The node holding `state`, if any.
    #[must_use]
    pub fn lookup(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    /// Nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchNode<S>> {
        self.nodes.iter()
    }

    /// Create an open node for `state` as a child of `parent`.
    ///
    /// The node starts one move deeper than its parent and is recorded in the
    /// parent's `children` and `discovered` lists.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownNode`] for a foreign `parent`,
    /// [`StoreError::DuplicateState`] if `state` already has a node.
    pub fn insert(&mut self, state: S, parent: NodeId, h_cost: f64) -> Result<NodeId, StoreError> {
        let depth = self.node(parent)?.depth.saturating_add(1);
        if let Some(&existing) = self.index.get(&state) {
            return Err(StoreError::DuplicateState { existing });
        }
        let id = NodeId::from_index(self.nodes.len());
        self.index.insert(state.clone(), id);
        self.nodes.push(SearchNode {
            id,
            state,
            parent: Some(parent),
            depth,
            h_cost,
            children: Vec::new(),
            discovered: Vec::new(),
            status: NodeStatus::Open,
        });
        let parent_node = &mut self.nodes[parent.index()];
        parent_node.children.push(id);
        parent_node.discovered.push(id);
        Ok(id)
    }

    /// Note that expanding `from` generated `to`. Repeats are ignored.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownNode`] if either handle is foreign.
    pub fn record_discovered(&mut self, from: NodeId, to: NodeId) -> Result<(), StoreError> {
        self.node(to)?;
        let discovered = &mut self.node_mut(from)?.discovered;
        if !discovered.contains(&to) {
            discovered.push(to);
        }
        Ok(())
    }

    /// Route `id` through `via`: depth becomes `via.depth + 1`.
    ///
    /// When `via` is not already the parent, `id` moves from its old parent's
    /// `children` to `via`'s. The node's status is untouched.
    ///
    /// # Errors
    ///
    /// [`StoreError::CostIncrease`] unless the new depth is strictly smaller,
    /// [`StoreError::WouldCycle`] if `via` is `id` or one of its descendants,
    /// [`StoreError::UnknownNode`] for foreign handles.
    pub fn relax(&mut self, id: NodeId, via: NodeId) -> Result<Relaxed, StoreError> {
        let new_depth = self.node(via)?.depth.saturating_add(1);
        let node = self.node(id)?;
        let old_depth = node.depth;
        let old_parent = node.parent;
        if new_depth >= old_depth {
            return Err(StoreError::CostIncrease {
                id,
                current_depth: old_depth,
                proposed_depth: new_depth,
            });
        }
        if self.is_ancestor_or_self(id, via) {
            return Err(StoreError::WouldCycle { id, parent: via });
        }

        let reparented = old_parent != Some(via);
        if reparented {
            if let Some(old) = old_parent {
                self.nodes[old.index()].children.retain(|&child| child != id);
            }
            let via_node = &mut self.nodes[via.index()];
            via_node.children.push(id);
            if !via_node.discovered.contains(&id) {
                via_node.discovered.push(id);
            }
            self.nodes[id.index()].parent = Some(via);
        }
        self.nodes[id.index()].depth = new_depth;
        Ok(Relaxed {
            old_depth,
            new_depth,
            reparented,
        })
    }

    /// Handles from the root to `id`, following current best parents.
    ///
    /// Empty for a foreign handle.
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = self.get(id).map(|_| id);
        while let Some(current) = cursor {
            // A corrupt chain longer than the arena is cut rather than followed.
            if path.len() > self.nodes.len() {
                break;
            }
            path.push(current);
            cursor = self.nodes[current.index()].parent;
        }
        path.reverse();
        path
    }

    /// Verify every structural invariant by a full scan.
    ///
    /// Checks, for each node: its parent link is valid and agrees with the
    /// parent's `children`; `depth` is the parent's plus one (root: 0); the
    /// children it lists point back at it and are a subset of `discovered`;
    /// `h_cost` is finite and non-negative; the state index maps its state
    /// back to it; and its parent chain reaches the root.
    ///
    /// # Errors
    ///
    /// The first [`InvariantViolation`] found, in creation order.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.index.len() != self.nodes.len() {
            return Err(InvariantViolation {
                node: NodeId::from_index(0),
                detail: format!(
                    "state index holds {} entries for {} nodes",
                    self.index.len(),
                    self.nodes.len()
                ),
            });
        }
        for (position, node) in self.nodes.iter().enumerate() {
            let id = node.id;
            let fail = |detail: String| Err(InvariantViolation { node: id, detail });
            if id.index() != position {
                return fail(format!("stored at position {position}"));
            }
            if self.index.get(&node.state) != Some(&id) {
                return fail("state index does not point back at this node".into());
            }
            if !(node.h_cost.is_finite() && node.h_cost >= 0.0) {
                return fail(format!(
                    "heuristic value {} is not a finite non-negative number",
                    node.h_cost
                ));
            }
            match node.parent {
                None if position != 0 => return fail("only the root may lack a parent".into()),
                None if node.depth != 0 => return fail(format!("root at depth {}", node.depth)),
                None => {}
                Some(parent) => {
                    let Some(parent_node) = self.get(parent) else {
                        return fail(format!("parent {parent} does not exist"));
                    };
                    if !parent_node.children.contains(&id) {
                        return fail(format!("missing from children of parent {parent}"));
                    }
                    if node.depth != parent_node.depth.saturating_add(1) {
                        return fail(format!(
                            "depth {} under parent {parent} at depth {}",
                            node.depth, parent_node.depth
                        ));
                    }
                }
            }
            for &child in &node.children {
                if self.get(child).and_then(|c| c.parent) != Some(id) {
                    return fail(format!("lists {child} as a child but is not its parent"));
                }
                if !node.discovered.contains(&child) {
                    return fail(format!("child {child} missing from discovered"));
                }
            }
            if self.path_to(id).first() != Some(&NodeId::from_index(0)) {
                return fail("parent chain does not reach the root".into());
            }
        }
        Ok(())
    }

    pub(crate) fn set_status(&mut self, id: NodeId, status: NodeStatus) -> Result<(), StoreError> {
        self.node_mut(id)?.status = status;
        Ok(())
    }

    /// Whether `ancestor` appears on the parent chain of `id` (inclusive).
    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        let mut steps = 0;
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return true;
            }
            cursor = self.get(current).and_then(|n| n.parent);
        }
        false
    }

    fn node(&self, id: NodeId) -> Result<&SearchNode<S>, StoreError> {
        self.get(id).ok_or(StoreError::UnknownNode { id })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SearchNode<S>, StoreError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(StoreError::UnknownNode { id })
    }
}

/// Panics on a handle from another store.
impl<S> Index<NodeId> for NodeStore<S> {
    type Output = SearchNode<S>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}
