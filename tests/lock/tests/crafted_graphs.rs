//! Re-open, re-parent and tie-break behaviour on hand-built graphs.
//!
//! Each graph is small enough that the full expansion order is locked.

use lock_tests::crafted::{CraftedGraph, DIAMOND, IMPROVE_OPEN, REOPEN, REPARENT};
use lodestar_search::graph::SuccessorOutcome;
use lodestar_search::heuristic::ZeroHeuristic;
use lodestar_search::node::{NodeId, NodeStatus};
use lodestar_search::policy::{SearchPolicy, TieBreak};
use lodestar_search::search::{search, SearchResult, SearchRun, SearchStatus};

fn policy(tie_break: TieBreak) -> SearchPolicy {
    SearchPolicy {
        tie_break,
        record_graph: true,
        check_invariants: true,
        ..SearchPolicy::default()
    }
}

/// Labels in pop order, goal pop included.
fn pop_order(graph: &CraftedGraph, tie_break: TieBreak) -> Vec<&'static str> {
    let heuristic = graph.heuristic();
    let mut run = SearchRun::new(graph, "S", "G", &heuristic, policy(tie_break)).unwrap();
    let mut order = Vec::new();
    loop {
        let before = run.last_popped();
        let status = run.step();
        if let Some(id) = run.last_popped().filter(|&id| Some(id) != before) {
            order.push(*run.store()[id].state());
        }
        if status != SearchStatus::Running {
            assert_eq!(status, SearchStatus::Succeeded);
            return order;
        }
    }
}

fn solve(graph: &CraftedGraph, tie_break: TieBreak) -> SearchResult<&'static str> {
    search(graph, "S", "G", &graph.heuristic(), &policy(tie_break)).unwrap()
}

fn labels(result: &SearchResult<&'static str>, ids: &[NodeId]) -> Vec<&'static str> {
    ids.iter().map(|&id| *result.store[id].state()).collect()
}

// ---------------------------------------------------------------------------
// Re-open
// ---------------------------------------------------------------------------

#[test]
fn reopen_expansion_order() {
    assert_eq!(
        pop_order(&REOPEN, TieBreak::Lifo),
        ["S", "L1", "L2", "C", "P", "C", "D", "G"]
    );
}

#[test]
fn reopen_relaxes_closed_descendants() {
    let result = solve(&REOPEN, TieBreak::Lifo);
    assert!(result.is_goal_reached());
    assert_eq!(result.stats.nodes_generated, 7);
    assert_eq!(result.stats.nodes_expanded, 7);
    assert_eq!(result.stats.reopened, 1);
    assert_eq!(result.stats.cost_improvements, 1);
    assert_eq!(result.stats.propagated, 1);
    assert_eq!(result.stats.reparented, 0);
    assert_eq!(result.solution_length(), Some(4));
    assert_eq!(
        labels(&result, &result.path_ids().unwrap()),
        ["S", "P", "C", "D", "G"]
    );

    let c = result.store.lookup(&"C").unwrap();
    let p = result.store.lookup(&"P").unwrap();
    let l2 = result.store.lookup(&"L2").unwrap();
    assert_eq!(result.store[c].depth(), 2);
    assert_eq!(result.store[c].parent(), Some(p));
    assert_eq!(result.store[c].status(), NodeStatus::Closed);
    assert!(result.store[l2].children().is_empty());
    assert_eq!(result.store[l2].discovered(), &[c]);
    assert_eq!(result.store[result.store.lookup(&"D").unwrap()].depth(), 3);
    result.store.check_invariants().unwrap();
}

#[test]
fn reopen_is_recorded_in_the_audit_graph() {
    let result = solve(&REOPEN, TieBreak::Lifo);
    let graph = result.graph.unwrap();
    let p_event = &graph.expansions[4];
    assert_eq!(p_event.node_id, 2);
    match &p_event.successors[0].outcome {
        SuccessorOutcome::Reopened { node_id, change } => {
            assert_eq!(*node_id, 4);
            assert!((change.old_g - 3.0).abs() < f64::EPSILON);
            assert!((change.new_g - 2.0).abs() < f64::EPSILON);
            assert_eq!(change.propagated, 1);
        }
        other => panic!("expected reopened, got {other:?}"),
    }
    assert_eq!(graph.metadata.reopened, 1);
}

// ---------------------------------------------------------------------------
// Cheaper route to an open node
// ---------------------------------------------------------------------------

#[test]
fn improve_open_expansion_order() {
    assert_eq!(
        pop_order(&IMPROVE_OPEN, TieBreak::Lifo),
        ["S", "L1", "L2", "P", "X", "Y", "G"]
    );
}

#[test]
fn cheaper_route_to_open_node_is_not_a_reopen() {
    let result = solve(&IMPROVE_OPEN, TieBreak::Lifo);
    assert!(result.is_goal_reached());
    assert_eq!(result.stats.nodes_generated, 7);
    assert_eq!(result.stats.nodes_expanded, 6);
    assert_eq!(result.stats.cost_improvements, 1);
    assert_eq!(result.stats.reopened, 0);
    assert_eq!(result.solution_length(), Some(4));
    assert_eq!(
        labels(&result, &result.path_ids().unwrap()),
        ["S", "P", "X", "Y", "G"]
    );

    let x = result.store.lookup(&"X").unwrap();
    let l2 = result.store.lookup(&"L2").unwrap();
    assert_eq!(result.store[x].depth(), 2);
    assert!(result.store[l2].children().is_empty());
    assert_eq!(result.store[l2].discovered(), &[x]);
    result.store.check_invariants().unwrap();

    let graph = result.graph.unwrap();
    let p_event = &graph.expansions[3];
    assert_eq!(p_event.node_id, 2);
    match &p_event.successors[0].outcome {
        SuccessorOutcome::ImprovedInOpen { node_id, change } => {
            assert_eq!(*node_id, 4);
            assert!((change.old_g - 3.0).abs() < f64::EPSILON);
            assert!((change.new_g - 2.0).abs() < f64::EPSILON);
            assert_eq!(change.propagated, 0);
        }
        other => panic!("expected improved-in-open, got {other:?}"),
    }
    assert_eq!(graph.metadata.reopened, 0);
}

#[test]
fn cheaper_route_lowers_the_open_key() {
    let heuristic = IMPROVE_OPEN.heuristic();
    let mut run =
        SearchRun::new(&IMPROVE_OPEN, "S", "G", &heuristic, policy(TieBreak::Lifo)).unwrap();
    for _ in 0..3 {
        assert_eq!(run.step(), SearchStatus::Running);
    }
    let x = run.store().lookup(&"X").unwrap();
    let before = run.open().key_of(x).unwrap();
    assert!((before.f_cost - 13.0).abs() < f64::EPSILON);

    assert_eq!(run.step(), SearchStatus::Running);
    assert_eq!(run.last_popped(), run.store().lookup(&"P"));
    let after = run.open().key_of(x).unwrap();
    assert!((after.f_cost - 12.0).abs() < f64::EPSILON);
    assert_eq!(run.store()[x].status(), NodeStatus::Open);
    assert!(!run.closed().contains(x));
}

// ---------------------------------------------------------------------------
// Re-parent through propagation
// ---------------------------------------------------------------------------

#[test]
fn reparent_expansion_order() {
    assert_eq!(
        pop_order(&REPARENT, TieBreak::Lifo),
        ["S", "L1", "L2", "Z", "X", "P", "X", "Y", "G"]
    );
}

#[test]
fn propagation_moves_child_to_cheaper_parent() {
    let result = solve(&REPARENT, TieBreak::Lifo);
    assert_eq!(result.stats.nodes_generated, 8);
    assert_eq!(result.stats.nodes_expanded, 8);
    assert_eq!(result.stats.reopened, 1);
    assert_eq!(result.stats.propagated, 1);
    assert_eq!(result.stats.reparented, 1);
    assert_eq!(result.solution_length(), Some(4));

    let x = result.store.lookup(&"X").unwrap();
    let y = result.store.lookup(&"Y").unwrap();
    let z = result.store.lookup(&"Z").unwrap();
    assert_eq!(result.store[y].parent(), Some(x));
    assert_eq!(result.store[y].depth(), 3);
    assert_eq!(result.store[x].children(), &[y]);
    assert!(result.store[z].children().is_empty());
    assert_eq!(result.store[z].discovered(), &[y]);
    assert_eq!(
        labels(&result, &result.path_ids().unwrap()),
        ["S", "P", "X", "Y", "G"]
    );
    result.store.check_invariants().unwrap();
}

// ---------------------------------------------------------------------------
// Tie-break contract
// ---------------------------------------------------------------------------

#[test]
fn lifo_expands_the_newest_of_equal_f() {
    assert_eq!(pop_order(&DIAMOND, TieBreak::Lifo), ["S", "B", "A", "G"]);
    let result = solve(&DIAMOND, TieBreak::Lifo);
    assert_eq!(labels(&result, &result.path_ids().unwrap()), ["S", "B", "G"]);
}

#[test]
fn fifo_expands_the_oldest_of_equal_f() {
    assert_eq!(pop_order(&DIAMOND, TieBreak::Fifo), ["S", "A", "B", "G"]);
    let result = solve(&DIAMOND, TieBreak::Fifo);
    assert_eq!(labels(&result, &result.path_ids().unwrap()), ["S", "A", "G"]);
}

#[test]
fn tie_break_never_changes_cost() {
    for graph in [&REOPEN, &REPARENT, &DIAMOND] {
        let lifo = solve(graph, TieBreak::Lifo);
        let fifo = solve(graph, TieBreak::Fifo);
        assert_eq!(lifo.solution_length(), fifo.solution_length(), "{}", graph.name);
    }
}

#[test]
fn zero_heuristic_on_reopen_graph_needs_no_reopen() {
    let result = search(&REOPEN, "S", "G", &ZeroHeuristic, &policy(TieBreak::Lifo)).unwrap();
    assert_eq!(result.solution_length(), Some(4));
    assert_eq!(result.stats.reopened, 0);
}
