//! Locked search counts for the built-in 8-puzzle scenarios.
//!
//! Counts depend on the successor order (Up, Down, Left, Right), the LIFO
//! tie-break and parent skipping. Any change to those shows up here first.

use lodestar_harness::reference::{bfs_distance, reachable_count};
use lodestar_harness::runner::{run_scenario, RunConfig};
use lodestar_harness::scenario::{self, SCENARIOS};
use lodestar_harness::worlds::sliding_puzzle::SlidingPuzzle;
use lodestar_kernel::heuristic::HeuristicKind;
use lodestar_search::graph::TerminationReason;
use lodestar_search::policy::{SearchPolicy, TieBreak};
use lodestar_search::search::SearchStatus;

fn config(heuristic: HeuristicKind, tie_break: TieBreak) -> RunConfig {
    RunConfig {
        heuristic,
        policy: SearchPolicy {
            tie_break,
            ..SearchPolicy::default()
        },
        verify_optimality: false,
    }
}

fn counts(name: &str, heuristic: HeuristicKind, tie_break: TieBreak) -> (u64, u64, Option<u32>) {
    let run = run_scenario(name, &config(heuristic, tie_break)).unwrap();
    let stats = &run.result.stats;
    (
        stats.nodes_generated,
        stats.nodes_expanded,
        run.result.solution_length(),
    )
}

// ---------------------------------------------------------------------------
// Textbook starts
// ---------------------------------------------------------------------------

#[test]
fn textbook_easy_counts() {
    use HeuristicKind::{Manhattan, MisplacedTiles, Zero};
    assert_eq!(counts("textbook_easy", Manhattan, TieBreak::Lifo), (13, 6, Some(6)));
    assert_eq!(counts("textbook_easy", MisplacedTiles, TieBreak::Lifo), (15, 7, Some(6)));
    assert_eq!(counts("textbook_easy", Zero, TieBreak::Lifo), (134, 80, Some(6)));
    assert_eq!(counts("textbook_easy", MisplacedTiles, TieBreak::Fifo), (17, 8, Some(6)));
}

#[test]
fn textbook_hard_counts() {
    use HeuristicKind::{Manhattan, MisplacedTiles, Sequence, Zero};
    assert_eq!(counts("textbook_hard", Manhattan, TieBreak::Lifo), (237, 136, Some(18)));
    assert_eq!(counts("textbook_hard", Sequence, TieBreak::Lifo), (842, 493, Some(18)));
    assert_eq!(counts("textbook_hard", Manhattan, TieBreak::Fifo), (378, 226, Some(18)));
    assert_eq!(
        counts("textbook_hard", MisplacedTiles, TieBreak::Lifo),
        (2173, 1288, Some(18))
    );
    assert_eq!(counts("textbook_hard", Zero, TieBreak::Lifo), (44641, 32439, Some(18)));
}

// ---------------------------------------------------------------------------
// Boundary scenarios
// ---------------------------------------------------------------------------

#[test]
fn solved_start_is_trivial_success() {
    let run = run_scenario("solved", &RunConfig::default()).unwrap();
    assert_eq!(run.result.status, SearchStatus::Succeeded);
    assert_eq!(run.result.solution_length(), Some(0));
    assert_eq!(run.result.stats.nodes_generated, 1);
    assert_eq!(run.result.stats.nodes_expanded, 0);
    assert_eq!(run.moves, Some(Vec::new()));
}

#[test]
fn one_move_start_succeeds_with_unit_cost() {
    for kind in HeuristicKind::ALL {
        let run = run_scenario("one_move", &config(kind, TieBreak::Lifo)).unwrap();
        assert!(run.result.is_goal_reached(), "{kind}");
        assert_eq!(run.result.goal_g_cost(), Some(1.0), "{kind}");
    }
}

#[test]
fn one_move_start_succeeds_on_a_single_expansion_budget() {
    for kind in HeuristicKind::ALL {
        let mut cfg = config(kind, TieBreak::Lifo);
        cfg.policy.max_expansions = Some(1);
        let run = run_scenario("one_move", &cfg).unwrap();
        assert_eq!(run.result.status, SearchStatus::Succeeded, "{kind}");
        assert_eq!(run.result.stats.nodes_expanded, 1, "{kind}");
        assert_eq!(run.result.solution_length(), Some(1), "{kind}");
    }
}

#[test]
fn unsolvable_start_exhausts_its_parity_class() {
    let run = run_scenario("unsolvable", &RunConfig::default()).unwrap();
    assert_eq!(run.result.status, SearchStatus::Failed);
    assert_eq!(
        run.result.termination_reason,
        TerminationReason::FrontierExhausted
    );
    assert_eq!(run.result.stats.nodes_generated, 181_440);
    assert_eq!(run.result.stats.nodes_expanded, 181_440);
    assert!(run.moves.is_none());

    let start = scenario::find("unsolvable").unwrap().start_grid().unwrap();
    assert_eq!(reachable_count(&SlidingPuzzle, &start), 181_440);
}

// ---------------------------------------------------------------------------
// Optimality
// ---------------------------------------------------------------------------

#[test]
fn admissible_heuristics_match_breadth_first_lengths() {
    for s in SCENARIOS.iter().filter(|s| s.optimal_length.is_some()) {
        let (start, goal) = (s.start_grid().unwrap(), s.goal_grid().unwrap());
        assert_eq!(bfs_distance(&SlidingPuzzle, &start, &goal), s.optimal_length);
        for kind in HeuristicKind::ALL.into_iter().filter(|k| k.is_admissible()) {
            if kind == HeuristicKind::Zero && s.name == "textbook_hard" {
                continue;
            }
            let run = run_scenario(s.name, &config(kind, TieBreak::Lifo)).unwrap();
            assert_eq!(
                run.result.solution_length(),
                s.optimal_length,
                "{} with {kind}",
                s.name
            );
        }
    }
}

#[test]
fn every_heuristic_solves_the_textbook_starts() {
    for kind in HeuristicKind::ALL {
        if kind == HeuristicKind::Zero {
            continue;
        }
        for name in ["textbook_easy", "textbook_hard"] {
            let run = run_scenario(name, &config(kind, TieBreak::Lifo)).unwrap();
            assert!(run.result.is_goal_reached(), "{name} with {kind}");
            let length = run.result.solution_length().unwrap();
            let optimal = scenario::find(name).unwrap().optimal_length.unwrap();
            assert!(length >= optimal, "{name} with {kind}: {length} < {optimal}");
            assert_eq!(length % 2, optimal % 2, "{name} with {kind}");
        }
    }
}
