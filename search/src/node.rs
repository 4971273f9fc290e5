//! Search nodes, node handles and the frontier ordering key.

use std::cmp::Ordering;
use std::fmt;

/// Cost of a single edge. Every successor is one move away from its parent.
pub const EDGE_COST: f64 = 1.0;

/// Stable handle to a node inside one [`NodeStore`](crate::store::NodeStore).
///
/// Handles are dense and assigned in creation order, so the root is always
/// `NodeId(0)`. A handle is meaningless outside the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position in the owning store.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Numeric form used in audit graphs and reports.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn as_u64(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which set a node currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    /// Waiting in the open frontier.
    Open,
    /// Expanded (or popped as the goal).
    Closed,
}

/// One distinct state reached by the search.
///
/// Fields are private: parent links, depth and the child lists only change
/// through [`NodeStore`](crate::store::NodeStore), which keeps them in sync.
/// `g_cost` is derived from `depth` and `f_cost` from `g_cost + h_cost`, so
/// neither can drift. Creation order is the arena index of `id`; the store
/// hands out indices in creation order, so no separate counter is kept.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    pub(crate) id: NodeId,
    pub(crate) state: S,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: u32,
    pub(crate) h_cost: f64,
    /// Nodes whose current best parent is this node.
    pub(crate) children: Vec<NodeId>,
    /// Every node ever generated from this one, without repeats.
    pub(crate) discovered: Vec<NodeId>,
    pub(crate) status: NodeStatus,
}

impl<S> SearchNode<S> {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Current best parent; `None` only for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Moves from the root along the current best path.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Cost of the best known path from the root.
    #[must_use]
    pub fn g_cost(&self) -> f64 {
        f64::from(self.depth) * EDGE_COST
    }

    /// Heuristic estimate, fixed when the node was created.
    #[must_use]
    pub const fn h_cost(&self) -> f64 {
        self.h_cost
    }

    /// `g_cost + h_cost`, the frontier priority.
    #[must_use]
    pub fn f_cost(&self) -> f64 {
        self.g_cost() + self.h_cost
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn discovered(&self) -> &[NodeId] {
        &self.discovered
    }

    #[must_use]
    pub const fn status(&self) -> NodeStatus {
        self.status
    }

    /// Creation order. Identical to the handle index.
    #[must_use]
    pub const fn creation_order(&self) -> u64 {
        self.id.as_u64()
    }
}

/// The frontier ordering key: `(f_cost, rank)`.
///
/// Lower `f_cost` first. Equal costs fall back to `rank`, which the frontier
/// derives from its insertion counter and tie-break policy. Costs compare with
/// [`f64::total_cmp`], so the order is total even for values the search would
/// never admit.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_cost: f64,
    pub rank: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then(self.rank.cmp(&other.rank))
    }
}
