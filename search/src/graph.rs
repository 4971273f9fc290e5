//! `SearchGraph`: expansion-event audit log.
//!
//! The normative decision surface is the ordered list of `ExpandEvent`
//! entries. Node summaries are a derived index for path reconstruction.
//!
//! Costs are serialized as decimal strings (see
//! [`cost_repr`](lodestar_kernel::proof::canon::cost_repr)) because canonical
//! JSON admits integers only.

use lodestar_kernel::proof::canon::{canonical_json_bytes, cost_repr, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_GRAPH};

use crate::policy::TieBreak;

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraph {
    /// Ordered expansion events (normative decision surface).
    pub expansions: Vec<ExpandEvent>,
    /// Derived node index sorted by `node_id` ascending, reflecting the final
    /// parent links.
    pub node_summaries: Vec<NodeSummary>,
    /// Aggregate metadata with policy echo.
    pub metadata: SearchGraphMetadata,
}

/// A single frontier-pop + successor-expansion event.
#[derive(Debug, Clone)]
pub struct ExpandEvent {
    /// Total order of frontier pops, from 0.
    pub expansion_order: u64,
    /// The node being expanded.
    pub node_id: u64,
    /// Hex fingerprint of the expanded node's state.
    pub state_fingerprint: String,
    /// Costs of the node at the time of pop.
    pub pop_key: PopKey,
    /// Ordered successor decision log.
    pub successors: Vec<SuccessorRecord>,
}

/// Node costs recorded at pop time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopKey {
    pub f_cost: f64,
    pub g_cost: f64,
    pub h_cost: f64,
}

/// A successor with its outcome recorded in the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessorRecord {
    /// Position in the world's successor list.
    pub index: u64,
    pub state_fingerprint: String,
    pub outcome: SuccessorOutcome,
}

/// What happened when a successor was processed.
#[derive(Debug, Clone, PartialEq)]
pub enum SuccessorOutcome {
    /// A new state; a node was created.
    Created { to_node: u64 },
    /// Equal to the expanding node's parent and skipped by policy.
    SkippedParent,
    /// Already open; the new route was no shorter.
    DuplicateInOpen { node_id: u64 },
    /// Already closed; the new route was no shorter.
    DuplicateInClosed { node_id: u64 },
    /// Already open; routed through the expanding node.
    ImprovedInOpen { node_id: u64, change: CostChange },
    /// Already closed; routed through the expanding node and re-opened.
    Reopened { node_id: u64, change: CostChange },
    /// Equal to the expanding node itself. Terminates the search.
    SelfLoop,
}

/// Old and new cost of an improved node and the reach of its propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostChange {
    pub old_g: f64,
    pub new_g: f64,
    /// Descendants relaxed by propagation.
    pub propagated: u64,
    /// Descendants that switched parent during propagation.
    pub reparented: u64,
}

/// Derived node summary for path reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSummary {
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub state_fingerprint: String,
    /// Hex of the world's identity bytes.
    pub state_hex: String,
    pub depth: u32,
    pub g_cost: f64,
    pub h_cost: f64,
    pub closed: bool,
    pub is_goal: bool,
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    // Bindings
    pub world_id: String,
    pub heuristic_id: String,
    pub root_state_fingerprint: String,
    pub goal_state_fingerprint: String,

    // Counters
    pub nodes_generated: u64,
    pub nodes_expanded: u64,
    pub max_depth: u32,
    pub cost_improvements: u64,
    pub reopened: u64,
    pub duplicates_seen: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReason,

    // Policy echo
    pub tie_break: TieBreak,
    pub skip_parent_successor: bool,
    pub max_expansions: Option<u64>,
}

/// Why the search terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The goal state was popped from the frontier.
    GoalReached { node_id: u64 },
    /// Frontier emptied without reaching the goal.
    FrontierExhausted,
    /// `max_expansions` budget was hit.
    ExpansionBudgetExceeded,
    /// The world returned the expanding state among its own successors.
    WorldContractViolation { node_id: u64 },
    /// The heuristic returned a negative or non-finite value.
    HeuristicContractViolation { value: String },
    /// A panic was caught in a world or heuristic callback.
    InternalPanic { stage: PanicStage },
    /// The frontier reported non-empty but yielded nothing.
    FrontierInvariantViolation,
    /// A structural check on the node store failed.
    StoreInvariantViolation { detail: String },
}

impl TerminationReason {
    /// Stable snake-case tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::WorldContractViolation { .. } => "world_contract_violation",
            Self::HeuristicContractViolation { .. } => "heuristic_contract_violation",
            Self::InternalPanic { .. } => "internal_panic",
            Self::FrontierInvariantViolation => "frontier_invariant_violation",
            Self::StoreInvariantViolation { .. } => "store_invariant_violation",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalReached { node_id } => write!(f, "goal reached at node {node_id}"),
            Self::WorldContractViolation { node_id } => {
                write!(f, "world returned node {node_id}'s own state as a successor")
            }
            Self::HeuristicContractViolation { value } => {
                write!(f, "heuristic returned {value}")
            }
            Self::InternalPanic { stage } => write!(f, "panic caught in {}", stage.as_str()),
            Self::StoreInvariantViolation { detail } => {
                write!(f, "store invariant violated: {detail}")
            }
            other => f.write_str(&other.as_str().replace('_', " ")),
        }
    }
}

/// Stage at which a panic was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStage {
    /// `SearchWorld::successors()` panicked.
    Successors,
    /// `Heuristic::estimate()` panicked during expansion.
    Heuristic,
}

impl PanicStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Successors => "successors",
            Self::Heuristic => "heuristic",
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraph {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// `canonical_hash(DOMAIN_SEARCH_GRAPH, canonical JSON)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn content_hash(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            DOMAIN_SEARCH_GRAPH,
            &self.to_canonical_json_bytes()?,
        ))
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "expansion_order": e.expansion_order,
        "node_id": e.node_id,
        "pop_key": {
            "f_cost": cost_repr(e.pop_key.f_cost),
            "g_cost": cost_repr(e.pop_key.g_cost),
            "h_cost": cost_repr(e.pop_key.h_cost),
        },
        "state_fingerprint": e.state_fingerprint,
        "successors": e.successors.iter().map(successor_record_to_json).collect::<Vec<_>>(),
    })
}

fn successor_record_to_json(r: &SuccessorRecord) -> serde_json::Value {
    serde_json::json!({
        "index": r.index,
        "outcome": outcome_to_json(&r.outcome),
        "state_fingerprint": r.state_fingerprint,
    })
}

fn outcome_to_json(o: &SuccessorOutcome) -> serde_json::Value {
    match o {
        SuccessorOutcome::Created { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "created"})
        }
        SuccessorOutcome::SkippedParent => serde_json::json!({"type": "skipped_parent"}),
        SuccessorOutcome::DuplicateInOpen { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "duplicate_in_open"})
        }
        SuccessorOutcome::DuplicateInClosed { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "duplicate_in_closed"})
        }
        SuccessorOutcome::ImprovedInOpen { node_id, change } => {
            change_to_json(*node_id, change, "improved_in_open")
        }
        SuccessorOutcome::Reopened { node_id, change } => {
            change_to_json(*node_id, change, "reopened")
        }
        SuccessorOutcome::SelfLoop => serde_json::json!({"type": "self_loop"}),
    }
}

fn change_to_json(node_id: u64, c: &CostChange, kind: &str) -> serde_json::Value {
    serde_json::json!({
        "new_g": cost_repr(c.new_g),
        "node_id": node_id,
        "old_g": cost_repr(c.old_g),
        "propagated": c.propagated,
        "reparented": c.reparented,
        "type": kind,
    })
}

fn node_summary_to_json(n: &NodeSummary) -> serde_json::Value {
    serde_json::json!({
        "closed": n.closed,
        "depth": n.depth,
        "g_cost": cost_repr(n.g_cost),
        "h_cost": cost_repr(n.h_cost),
        "is_goal": n.is_goal,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
        "state_fingerprint": n.state_fingerprint,
        "state_hex": n.state_hex,
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "cost_improvements": m.cost_improvements,
        "duplicates_seen": m.duplicates_seen,
        "frontier_high_water": m.frontier_high_water,
        "goal_state_fingerprint": m.goal_state_fingerprint,
        "heuristic_id": m.heuristic_id,
        "max_depth": m.max_depth,
        "max_expansions": m.max_expansions,
        "nodes_expanded": m.nodes_expanded,
        "nodes_generated": m.nodes_generated,
        "reopened": m.reopened,
        "root_state_fingerprint": m.root_state_fingerprint,
        "skip_parent_successor": m.skip_parent_successor,
        "termination_reason": termination_reason_to_json(&m.termination_reason),
        "tie_break": m.tie_break.as_str(),
        "world_id": m.world_id,
    })
}

/// JSON form of a termination reason, shared with run reports.
#[must_use]
pub fn termination_reason_to_json(r: &TerminationReason) -> serde_json::Value {
    let tag = r.as_str();
    match r {
        TerminationReason::GoalReached { node_id }
        | TerminationReason::WorldContractViolation { node_id } => {
            serde_json::json!({"node_id": node_id, "type": tag})
        }
        TerminationReason::HeuristicContractViolation { value } => {
            serde_json::json!({"type": tag, "value": value})
        }
        TerminationReason::InternalPanic { stage } => {
            serde_json::json!({"stage": stage.as_str(), "type": tag})
        }
        TerminationReason::StoreInvariantViolation { detail } => {
            serde_json::json!({"detail": detail, "type": tag})
        }
        TerminationReason::FrontierExhausted
        | TerminationReason::ExpansionBudgetExceeded
        | TerminationReason::FrontierInvariantViolation => serde_json::json!({"type": tag}),
    }
}
