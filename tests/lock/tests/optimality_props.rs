//! Randomized properties over puzzles scrambled by random walks from the goal.
//!
//! A walk from the goal always stays in the goal's parity class, so every
//! generated start is solvable.

use lodestar_harness::reference::bfs_distance;
use lodestar_harness::worlds::sliding_puzzle::{PuzzleHeuristic, SlidingPuzzle};
use lodestar_kernel::carrier::tile_grid::TileGrid;
use lodestar_kernel::heuristic::HeuristicKind;
use lodestar_kernel::operators::slide::{apply_moves, successors, Direction};
use lodestar_search::policy::{SearchPolicy, TieBreak};
use lodestar_search::search::search;
use proptest::prelude::*;

fn goal() -> TileGrid {
    TileGrid::parse("123/804/765").unwrap()
}

/// Follow `picks` as indices into each state's successor list.
fn scramble(picks: &[usize]) -> TileGrid {
    picks.iter().fold(goal(), |grid, &pick| {
        let next = successors(&grid);
        next[pick % next.len()]
    })
}

fn arb_tie_break() -> impl Strategy<Value = TieBreak> {
    prop_oneof![Just(TieBreak::Lifo), Just(TieBreak::Fifo)]
}

fn arb_admissible() -> impl Strategy<Value = HeuristicKind> {
    prop_oneof![
        Just(HeuristicKind::MisplacedTiles),
        Just(HeuristicKind::Manhattan),
        Just(HeuristicKind::RowColumn),
        Just(HeuristicKind::Euclidean),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn admissible_search_matches_bfs(
        picks in prop::collection::vec(0usize..4, 0..24),
        kind in arb_admissible(),
        tie_break in arb_tie_break(),
    ) {
        let start = scramble(&picks);
        let goal = goal();
        let heuristic = PuzzleHeuristic::new(kind, goal);
        let policy = SearchPolicy { tie_break, ..SearchPolicy::default() };
        let result = search(&SlidingPuzzle, start, goal, &heuristic, &policy).unwrap();

        let expected = bfs_distance(&SlidingPuzzle, &start, &goal);
        prop_assert!(expected.is_some());
        prop_assert_eq!(result.solution_length(), expected);
    }

    #[test]
    fn returned_path_is_a_legal_walk(
        picks in prop::collection::vec(0usize..4, 0..30),
        tie_break in arb_tie_break(),
    ) {
        let start = scramble(&picks);
        let goal = goal();
        let heuristic = PuzzleHeuristic::new(HeuristicKind::Nilsson, goal);
        let policy = SearchPolicy {
            tie_break,
            check_invariants: true,
            ..SearchPolicy::default()
        };
        let result = search(&SlidingPuzzle, start, goal, &heuristic, &policy).unwrap();
        prop_assert!(result.is_goal_reached());

        let states = result.path_states().unwrap();
        prop_assert_eq!(*states[0], start);
        let moves: Option<Vec<Direction>> = states
            .windows(2)
            .map(|pair| Direction::between(pair[0], pair[1]))
            .collect();
        let moves = moves.unwrap();
        prop_assert_eq!(apply_moves(&start, &moves), Some(goal));
        prop_assert_eq!(result.goal_g_cost(), Some(f64::from(result.solution_length().unwrap())));
    }

    #[test]
    fn generated_counts_every_node_once(
        picks in prop::collection::vec(0usize..4, 0..20),
    ) {
        let start = scramble(&picks);
        let goal = goal();
        let heuristic = PuzzleHeuristic::new(HeuristicKind::Manhattan, goal);
        let result = search(&SlidingPuzzle, start, goal, &heuristic, &SearchPolicy::default()).unwrap();
        prop_assert_eq!(result.stats.nodes_generated, result.store.len() as u64);
        prop_assert!(result.stats.nodes_expanded < result.stats.nodes_generated);
    }
}
