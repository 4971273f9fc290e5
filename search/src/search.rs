//! Search entry point and the stepwise expansion loop.
//!
//! [`SearchRun`] owns one search: its node store, open frontier and closed
//! set. [`SearchRun::step`] performs exactly one loop iteration so callers
//! (and tests) can observe the state between expansions; [`search`] runs to
//! completion.
//!
//! Runtime failures never surface as `Err`. They end the run with a
//! [`TerminationReason`] and leave the store and audit trail intact.

use std::hash::Hash;
use std::panic::{catch_unwind, AssertUnwindSafe};

use lodestar_kernel::proof::canon::cost_repr;

use crate::closed::ClosedSet;
use crate::contract::{state_fingerprint, SearchWorld};
use crate::error::SearchError;
use crate::frontier::OpenFrontier;
use crate::graph::{
    CostChange, ExpandEvent, NodeSummary, PanicStage, PopKey, SearchGraph, SearchGraphMetadata,
    SuccessorOutcome, SuccessorRecord, TerminationReason,
};
use crate::heuristic::{is_valid_estimate, Heuristic};
use crate::node::{NodeId, NodeStatus};
use crate::policy::SearchPolicy;
use crate::propagate::{propagate_improvement, PropagationReport};
use crate::store::{InvariantViolation, NodeStore, StoreError};

/// Coarse run state. The [`TerminationReason`] carries the detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    Succeeded,
    Failed,
}

/// Counters maintained by the loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Distinct states given a node. The root counts.
    pub nodes_generated: u64,
    /// Nodes popped and expanded. A goal pop is not an expansion.
    pub nodes_expanded: u64,
    /// Largest `depth + 1` over expanded nodes.
    pub max_depth: u32,
    /// Duplicates that arrived by a strictly shorter route.
    pub cost_improvements: u64,
    /// Closed nodes moved back to the frontier.
    pub reopened: u64,
    /// Nodes relaxed by propagation (the improved node itself excluded).
    pub propagated: u64,
    /// Propagation steps that changed a node's parent.
    pub reparented: u64,
    /// Successors whose state already had a node.
    pub duplicates_seen: u64,
    /// Successors dropped because they equal the expanding node's parent.
    pub skipped_parent: u64,
    /// Peak open frontier size.
    pub frontier_high_water: u64,
}

impl SearchStats {
    /// `nodes_generated / max_depth`; `None` before anything was expanded.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn effective_branching_factor(&self) -> Option<f64> {
        if self.max_depth == 0 {
            return None;
        }
        Some(self.nodes_generated as f64 / f64::from(self.max_depth))
    }
}

/// Result of a finished search.
///
/// Always carries the node store, so callers can inspect what was explored
/// regardless of how the search terminated.
#[derive(Debug)]
pub struct SearchResult<S> {
    pub status: SearchStatus,
    pub termination_reason: TerminationReason,
    pub stats: SearchStats,
    pub root: NodeId,
    pub goal_node: Option<NodeId>,
    pub store: NodeStore<S>,
    /// Present when the policy asked for it.
    pub graph: Option<SearchGraph>,
}

impl<S: Clone + Eq + Hash> SearchResult<S> {
    /// Returns `true` if the search terminated because the goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::GoalReached { .. })
    }

    /// Root-first handles of the solution path.
    #[must_use]
    pub fn path_ids(&self) -> Option<Vec<NodeId>> {
        self.goal_node.map(|goal| self.store.path_to(goal))
    }

    /// Root-first states of the solution path.
    #[must_use]
    pub fn path_states(&self) -> Option<Vec<&S>> {
        self.path_ids()
            .map(|ids| ids.into_iter().map(|id| self.store[id].state()).collect())
    }

    /// Moves on the solution path.
    #[must_use]
    pub fn solution_length(&self) -> Option<u32> {
        self.goal_node.map(|goal| self.store[goal].depth())
    }

    /// `g_cost` of the goal node.
    #[must_use]
    pub fn goal_g_cost(&self) -> Option<f64> {
        self.goal_node.map(|goal| self.store[goal].g_cost())
    }

    #[must_use]
    pub fn effective_branching_factor(&self) -> Option<f64> {
        self.stats.effective_branching_factor()
    }
}

/// One A* search in progress.
pub struct SearchRun<'a, W: SearchWorld, H: Heuristic<W::State> + ?Sized> {
    world: &'a W,
    heuristic: &'a H,
    goal: W::State,
    policy: SearchPolicy,
    store: NodeStore<W::State>,
    open: OpenFrontier,
    closed: ClosedSet,
    root: NodeId,
    stats: SearchStats,
    status: SearchStatus,
    termination: Option<TerminationReason>,
    goal_node: Option<NodeId>,
    last_popped: Option<NodeId>,
    expansions: Vec<ExpandEvent>,
}

impl<'a, W, H> SearchRun<'a, W, H>
where
    W: SearchWorld,
    H: Heuristic<W::State> + ?Sized,
{
    /// Validate the policy, score the root and put it on the frontier.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if the policy fails validation,
    /// [`SearchError::HeuristicContractViolation`] or
    /// [`SearchError::HeuristicPanicked`] if the root cannot be scored.
    pub fn new(
        world: &'a W,
        root_state: W::State,
        goal: W::State,
        heuristic: &'a H,
        policy: SearchPolicy,
    ) -> Result<Self, SearchError> {
        policy.validate()?;

        let h_root = catch_unwind(AssertUnwindSafe(|| heuristic.estimate(&root_state)))
            .map_err(|_| SearchError::HeuristicPanicked)?;
        if !is_valid_estimate(h_root) {
            return Err(SearchError::HeuristicContractViolation {
                value: cost_repr(h_root),
            });
        }

        let (store, root) = NodeStore::with_root(root_state, h_root);
        let mut open = OpenFrontier::new(policy.tie_break);
        open.insert(root, store[root].f_cost());

        Ok(Self {
            world,
            heuristic,
            goal,
            policy,
            store,
            open,
            closed: ClosedSet::new(),
            root,
            stats: SearchStats {
                nodes_generated: 1,
                frontier_high_water: 1,
                ..SearchStats::default()
            },
            status: SearchStatus::Running,
            termination: None,
            goal_node: None,
            last_popped: None,
            expansions: Vec::new(),
        })
    }

    /// Perform one loop iteration.
    ///
    /// After termination this is a no-op returning the final status.
    pub fn step(&mut self) -> SearchStatus {
        if self.status != SearchStatus::Running {
            return self.status;
        }
        if self.open.is_empty() {
            return self.terminate(TerminationReason::FrontierExhausted);
        }

        // Frontier was checked non-empty above.
        let Some((best, key)) = self.open.pop_with_key() else {
            return self.terminate(TerminationReason::FrontierInvariantViolation);
        };
        let is_goal = self.store[best].state() == &self.goal;

        // The budget limits expansions, not goal tests: a goal on top of Open
        // is still accepted once the budget is spent.
        if !is_goal {
            if let Some(limit) = self.policy.max_expansions {
                if self.stats.nodes_expanded >= limit {
                    self.open.restore(best, key);
                    return self.terminate(TerminationReason::ExpansionBudgetExceeded);
                }
            }
        }

        if let Err(err) = self.store.set_status(best, NodeStatus::Closed) {
            return self.terminate(err.into());
        }
        self.closed.insert(best);
        self.last_popped = Some(best);

        if is_goal {
            self.goal_node = Some(best);
            return self.terminate(TerminationReason::GoalReached {
                node_id: best.as_u64(),
            });
        }

        if let Err(reason) = self.expand(best) {
            return self.terminate(reason);
        }

        if self.policy.check_invariants {
            if let Err(violation) = self.check_invariants() {
                return self.terminate(TerminationReason::StoreInvariantViolation {
                    detail: violation.to_string(),
                });
            }
        }
        SearchStatus::Running
    }

    /// Step until the run terminates, then package the result.
    #[must_use]
    pub fn finish(mut self) -> SearchResult<W::State> {
        while self.step() == SearchStatus::Running {}

        let termination_reason = self
            .termination
            .take()
            .unwrap_or(TerminationReason::FrontierInvariantViolation);
        let graph = self
            .policy
            .record_graph
            .then(|| self.build_graph(&termination_reason));

        SearchResult {
            status: self.status,
            termination_reason,
            stats: self.stats,
            root: self.root,
            goal_node: self.goal_node,
            store: self.store,
            graph,
        }
    }

    /// Full structural check: the store's own invariants, plus agreement
    /// between each node's status and the frontier / closed set.
    ///
    /// # Errors
    ///
    /// The first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.store.check_invariants()?;
        for node in self.store.iter() {
            let id = node.id();
            let (in_open, in_closed) = (self.open.contains(id), self.closed.contains(id));
            let consistent = match node.status() {
                NodeStatus::Open => in_open && !in_closed,
                NodeStatus::Closed => in_closed && !in_open,
            };
            if !consistent {
                return Err(InvariantViolation {
                    node: id,
                    detail: format!(
                        "status {:?} but open={in_open} closed={in_closed}",
                        node.status()
                    ),
                });
            }
        }
        if self.open.len() + self.closed.len() != self.store.len() {
            return Err(InvariantViolation {
                node: self.root,
                detail: format!(
                    "{} open + {} closed != {} nodes",
                    self.open.len(),
                    self.closed.len(),
                    self.store.len()
                ),
            });
        }
        Ok(())
    }

    /// Run a propagation pass from `id` outside the normal loop.
    ///
    /// After the loop has propagated an improvement, a second pass from the
    /// same node finds nothing to change.
    ///
    /// # Errors
    ///
    /// Any [`StoreError`] from a relaxation.
    pub fn propagate_from(&mut self, id: NodeId) -> Result<PropagationReport, StoreError> {
        propagate_improvement(&mut self.store, &mut self.open, id)
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// `None` while running.
    #[must_use]
    pub fn termination_reason(&self) -> Option<&TerminationReason> {
        self.termination.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn store(&self) -> &NodeStore<W::State> {
        &self.store
    }

    #[must_use]
    pub fn open(&self) -> &OpenFrontier {
        &self.open
    }

    #[must_use]
    pub fn closed(&self) -> &ClosedSet {
        &self.closed
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node taken off the frontier by the most recent step.
    #[must_use]
    pub fn last_popped(&self) -> Option<NodeId> {
        self.last_popped
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    fn terminate(&mut self, reason: TerminationReason) -> SearchStatus {
        self.status = if matches!(reason, TerminationReason::GoalReached { .. }) {
            SearchStatus::Succeeded
        } else {
            SearchStatus::Failed
        };
        self.termination = Some(reason);
        self.status
    }

    /// Expand `best`. The expand event is recorded even when expansion
    /// terminates the run part-way through.
    fn expand(&mut self, best: NodeId) -> Result<(), TerminationReason> {
        let node = &self.store[best];
        let state = node.state().clone();
        let depth = node.depth();
        let pop_key = PopKey {
            f_cost: node.f_cost(),
            g_cost: node.g_cost(),
            h_cost: node.h_cost(),
        };
        let parent_state = node.parent().map(|p| self.store[p].state().clone());

        self.stats.max_depth = self.stats.max_depth.max(depth.saturating_add(1));
        self.stats.nodes_expanded += 1;

        let mut records = Vec::new();
        let result = self.expand_successors(best, &state, parent_state.as_ref(), &mut records);

        if self.policy.record_graph {
            self.expansions.push(ExpandEvent {
                expansion_order: self.stats.nodes_expanded - 1,
                node_id: best.as_u64(),
                state_fingerprint: self.fingerprint(&state),
                pop_key,
                successors: records,
            });
        }
        result
    }

    fn expand_successors(
        &mut self,
        best: NodeId,
        state: &W::State,
        parent_state: Option<&W::State>,
        records: &mut Vec<SuccessorRecord>,
    ) -> Result<(), TerminationReason> {
        let world = self.world;
        let successors = catch_unwind(AssertUnwindSafe(|| world.successors(state))).map_err(|_| {
            TerminationReason::InternalPanic {
                stage: PanicStage::Successors,
            }
        })?;

        let recording = self.policy.record_graph;
        for (index, successor) in successors.into_iter().enumerate() {
            let fingerprint = if recording {
                self.fingerprint(&successor)
            } else {
                String::new()
            };
            let mut record = |outcome: SuccessorOutcome| {
                if recording {
                    records.push(SuccessorRecord {
                        index: index as u64,
                        state_fingerprint: fingerprint.clone(),
                        outcome,
                    });
                }
            };

            if &successor == state {
                record(SuccessorOutcome::SelfLoop);
                return Err(TerminationReason::WorldContractViolation {
                    node_id: best.as_u64(),
                });
            }
            if self.policy.skip_parent_successor && parent_state == Some(&successor) {
                self.stats.skipped_parent += 1;
                record(SuccessorOutcome::SkippedParent);
                continue;
            }
            let outcome = self.consider(best, successor)?;
            record(outcome);
        }
        Ok(())
    }

    /// Steps 7a-7c: classify one successor and update the bookkeeping.
    fn consider(
        &mut self,
        best: NodeId,
        successor: W::State,
    ) -> Result<SuccessorOutcome, TerminationReason> {
        let in_open = self.open.find_by_state(&self.store, &successor);
        let in_closed = self.closed.find_by_state(&self.store, &successor);

        let Some(existing) = in_open.or(in_closed) else {
            let h_cost = self.estimate(&successor)?;
            let id = self.store.insert(successor, best, h_cost)?;
            self.open.insert(id, self.store[id].f_cost());
            self.stats.nodes_generated += 1;
            self.stats.frontier_high_water = self.open.high_water();
            return Ok(SuccessorOutcome::Created {
                to_node: id.as_u64(),
            });
        };

        self.stats.duplicates_seen += 1;
        self.store.record_discovered(best, existing)?;
        let node_id = existing.as_u64();
        let candidate_depth = self.store[best].depth().saturating_add(1);
        if candidate_depth >= self.store[existing].depth() {
            return Ok(if in_open.is_some() {
                SuccessorOutcome::DuplicateInOpen { node_id }
            } else {
                SuccessorOutcome::DuplicateInClosed { node_id }
            });
        }

        let old_g = self.store[existing].g_cost();
        self.store.relax(existing, best)?;
        let f_cost = self.store[existing].f_cost();
        self.stats.cost_improvements += 1;
        let reopened = in_open.is_none();
        if reopened {
            self.closed.remove(existing);
            self.store.set_status(existing, NodeStatus::Open)?;
            self.open.insert(existing, f_cost);
            self.stats.reopened += 1;
            self.stats.frontier_high_water = self.open.high_water();
        } else {
            self.open.reprioritize(existing, f_cost);
        }

        let report = propagate_improvement(&mut self.store, &mut self.open, existing)?;
        let propagated = report.relaxed.len() as u64;
        self.stats.propagated += propagated;
        self.stats.reparented += report.reparented;

        let change = CostChange {
            old_g,
            new_g: self.store[existing].g_cost(),
            propagated,
            reparented: report.reparented,
        };
        Ok(if reopened {
            SuccessorOutcome::Reopened { node_id, change }
        } else {
            SuccessorOutcome::ImprovedInOpen { node_id, change }
        })
    }

    fn estimate(&self, state: &W::State) -> Result<f64, TerminationReason> {
        let heuristic = self.heuristic;
        let value = catch_unwind(AssertUnwindSafe(|| heuristic.estimate(state))).map_err(|_| {
            TerminationReason::InternalPanic {
                stage: PanicStage::Heuristic,
            }
        })?;
        if is_valid_estimate(value) {
            Ok(value)
        } else {
            Err(TerminationReason::HeuristicContractViolation {
                value: cost_repr(value),
            })
        }
    }

    fn fingerprint(&self, state: &W::State) -> String {
        state_fingerprint(self.world, state).hex_digest().to_string()
    }

    fn build_graph(&mut self, termination_reason: &TerminationReason) -> SearchGraph {
        let node_summaries = self
            .store
            .iter()
            .map(|node| NodeSummary {
                node_id: node.id().as_u64(),
                parent_id: node.parent().map(NodeId::as_u64),
                state_fingerprint: self.fingerprint(node.state()),
                state_hex: hex::encode(self.world.identity_bytes(node.state())),
                depth: node.depth(),
                g_cost: node.g_cost(),
                h_cost: node.h_cost(),
                closed: node.status() == NodeStatus::Closed,
                is_goal: node.state() == &self.goal,
            })
            .collect();

        SearchGraph {
            expansions: std::mem::take(&mut self.expansions),
            node_summaries,
            metadata: SearchGraphMetadata {
                world_id: self.world.world_id().to_string(),
                heuristic_id: self.heuristic.heuristic_id().to_string(),
                root_state_fingerprint: self.fingerprint(self.store[self.root].state()),
                goal_state_fingerprint: self.fingerprint(&self.goal),
                nodes_generated: self.stats.nodes_generated,
                nodes_expanded: self.stats.nodes_expanded,
                max_depth: self.stats.max_depth,
                cost_improvements: self.stats.cost_improvements,
                reopened: self.stats.reopened,
                duplicates_seen: self.stats.duplicates_seen,
                frontier_high_water: self.stats.frontier_high_water,
                termination_reason: termination_reason.clone(),
                tie_break: self.policy.tie_break,
                skip_parent_successor: self.policy.skip_parent_successor,
                max_expansions: self.policy.max_expansions,
            },
        }
    }
}

impl From<StoreError> for TerminationReason {
    fn from(err: StoreError) -> Self {
        Self::StoreInvariantViolation {
            detail: err.to_string(),
        }
    }
}

/// Run A* from `root_state` until `goal` is popped or the run terminates.
///
/// All runtime terminations (contract violations, caught panics, budget
/// exhaustion, an exhausted frontier) return `Ok(SearchResult)` with the
/// store preserved. `termination_reason` says why the search stopped.
///
/// # Errors
///
/// Pre-flight failures only; see [`SearchRun::new`].
pub fn search<W, H>(
    world: &W,
    root_state: W::State,
    goal: W::State,
    heuristic: &H,
    policy: &SearchPolicy,
) -> Result<SearchResult<W::State>, SearchError>
where
    W: SearchWorld,
    H: Heuristic<W::State> + ?Sized,
{
    Ok(SearchRun::new(world, root_state, goal, heuristic, policy.clone())?.finish())
}
