//! Structural invariants checked after every loop step.
//!
//! Proves, on real puzzle searches:
//! 1. `f == g + h` for every node
//! 2. No node's `g` ever increases
//! 3. One node per state; the store, frontier and closed set partition it
//! 4. Popped `f` values never decrease under a consistent heuristic
//! 5. Propagating again from an improved node changes nothing

use std::collections::HashMap;

use lodestar_harness::scenario;
use lodestar_harness::worlds::sliding_puzzle::{PuzzleHeuristic, SlidingPuzzle};
use lodestar_kernel::carrier::tile_grid::TileGrid;
use lodestar_kernel::heuristic::HeuristicKind;
use lodestar_search::node::NodeId;
use lodestar_search::policy::{SearchPolicy, TieBreak};
use lodestar_search::search::{SearchRun, SearchStatus};

fn grids(name: &str) -> (TileGrid, TileGrid) {
    let s = scenario::find(name).unwrap();
    (s.start_grid().unwrap(), s.goal_grid().unwrap())
}

/// Step `name` to completion, calling `check` after every step.
fn step_through(
    name: &str,
    kind: HeuristicKind,
    tie_break: TieBreak,
    mut check: impl FnMut(&SearchRun<'_, SlidingPuzzle, PuzzleHeuristic>),
) -> SearchStatus {
    let (start, goal) = grids(name);
    let heuristic = PuzzleHeuristic::new(kind, goal);
    let policy = SearchPolicy {
        tie_break,
        ..SearchPolicy::default()
    };
    let mut run = SearchRun::new(&SlidingPuzzle, start, goal, &heuristic, policy).unwrap();
    loop {
        let status = run.step();
        check(&run);
        if status != SearchStatus::Running {
            return status;
        }
    }
}

// ---------------------------------------------------------------------------
// 1 + 3. Cost identity and structural agreement
// ---------------------------------------------------------------------------

#[test]
fn every_step_keeps_structure_and_cost_identity() {
    for kind in [
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::Nilsson,
    ] {
        for tie_break in [TieBreak::Lifo, TieBreak::Fifo] {
            let status = step_through("textbook_hard", kind, tie_break, |run| {
                run.check_invariants().unwrap();
                for node in run.store().iter() {
                    let sum = node.g_cost() + node.h_cost();
                    assert!((node.f_cost() - sum).abs() < 1e-9, "{kind}: f != g + h");
                    assert_eq!(run.store().lookup(node.state()), Some(node.id()));
                }
            });
            assert_eq!(status, SearchStatus::Succeeded, "{kind} {tie_break}");
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Monotone g
// ---------------------------------------------------------------------------

#[test]
fn g_never_increases() {
    // The sequence score is inconsistent; on this start duplicates arrive
    // by shorter routes.
    let mut improvements = 0;
    for kind in [HeuristicKind::Sequence, HeuristicKind::Nilsson] {
        let mut last: HashMap<NodeId, u32> = HashMap::new();
        step_through("textbook_hard", kind, TieBreak::Lifo, |run| {
            for node in run.store().iter() {
                if let Some(&previous) = last.get(&node.id()) {
                    assert!(node.depth() <= previous, "{kind}: g rose at {}", node.id());
                    if node.depth() < previous {
                        improvements += 1;
                    }
                }
                last.insert(node.id(), node.depth());
            }
        });
    }
    assert!(improvements > 0, "no improvement exercised");
}

// ---------------------------------------------------------------------------
// 4. Monotone pops under a consistent heuristic
// ---------------------------------------------------------------------------

#[test]
fn consistent_heuristics_pop_in_nondecreasing_f() {
    for kind in HeuristicKind::ALL.into_iter().filter(|k| k.is_consistent()) {
        if kind == HeuristicKind::Zero {
            continue;
        }
        let mut previous = f64::NEG_INFINITY;
        let mut last_popped = None;
        step_through("textbook_hard", kind, TieBreak::Lifo, |run| {
            if run.last_popped() == last_popped {
                return;
            }
            last_popped = run.last_popped();
            if let Some(id) = last_popped {
                let f = run.store()[id].f_cost();
                assert!(f + 1e-9 >= previous, "{kind}: popped f {f} after {previous}");
                previous = f;
            }
        });
    }
}

#[test]
fn consistent_heuristics_never_reopen() {
    for kind in [HeuristicKind::Manhattan, HeuristicKind::MisplacedTiles] {
        let (start, goal) = grids("textbook_hard");
        let heuristic = PuzzleHeuristic::new(kind, goal);
        let result = SearchRun::new(
            &SlidingPuzzle,
            start,
            goal,
            &heuristic,
            SearchPolicy::default(),
        )
        .unwrap()
        .finish();
        assert_eq!(result.stats.reopened, 0, "{kind}");
        assert_eq!(result.stats.cost_improvements, 0, "{kind}");
    }
}

// ---------------------------------------------------------------------------
// 5. Propagation idempotence
// ---------------------------------------------------------------------------

#[test]
fn second_propagation_pass_is_a_no_op() {
    let (start, goal) = grids("textbook_hard");
    let heuristic = PuzzleHeuristic::new(HeuristicKind::Sequence, goal);
    let mut run =
        SearchRun::new(&SlidingPuzzle, start, goal, &heuristic, SearchPolicy::default()).unwrap();

    let mut checked = 0;
    while run.step() == SearchStatus::Running {
        if run.stats().cost_improvements == 0 {
            continue;
        }
        let ids: Vec<NodeId> = run.store().iter().map(|n| n.id()).collect();
        for id in ids {
            let report = run.propagate_from(id).unwrap();
            assert!(report.is_empty(), "propagation from {id} changed {report:?}");
        }
        checked += 1;
        if checked == 5 {
            break;
        }
    }
    assert!(checked > 0, "no improvement exercised");
    run.check_invariants().unwrap();
}
