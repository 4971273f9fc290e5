//! Shared helpers for lodestar benchmark suites.

use lodestar_harness::report::RunReport;
use lodestar_harness::runner::{run_puzzle, RunConfig};
use lodestar_harness::scenario;
use lodestar_harness::worlds::sliding_puzzle::{PuzzleHeuristic, SlidingPuzzle};
use lodestar_kernel::carrier::tile_grid::TileGrid;
use lodestar_kernel::heuristic::HeuristicKind;
use lodestar_kernel::proof::hash::ContentHash;
use lodestar_search::policy::SearchPolicy;
use lodestar_search::search::{search, SearchResult};

/// One scenario searched with one heuristic.
#[derive(Debug, Clone)]
pub struct BenchCase {
    /// `scenario/heuristic`, used as the benchmark id.
    pub name: String,
    pub start: TileGrid,
    pub goal: TileGrid,
    pub heuristic: PuzzleHeuristic,
    pub policy: SearchPolicy,
}

impl BenchCase {
    /// Build a case for a built-in scenario.
    ///
    /// # Panics
    ///
    /// Panics if the scenario is unknown. Benchmark setup failures are fatal.
    #[must_use]
    pub fn new(scenario_name: &str, kind: HeuristicKind, policy: SearchPolicy) -> Self {
        let s = scenario::find(scenario_name).expect("known scenario");
        let goal = s.goal_grid().expect("valid goal");
        Self {
            name: format!("{}/{}", s.name, kind.name()),
            start: s.start_grid().expect("valid start"),
            goal,
            heuristic: PuzzleHeuristic::new(kind, goal),
            policy,
        }
    }
}

/// The regimes every macro suite measures.
///
/// Covers a short informed search, a long informed search, an inadmissible
/// heuristic with re-opens, a weak heuristic under a budget, and the
/// exhaustive unsolvable sweep (budgeted so a sample stays affordable).
#[must_use]
pub fn bench_cases() -> Vec<BenchCase> {
    let budget = |n| SearchPolicy {
        max_expansions: Some(n),
        ..SearchPolicy::default()
    };
    vec![
        BenchCase::new("textbook_easy", HeuristicKind::Manhattan, SearchPolicy::default()),
        BenchCase::new("textbook_hard", HeuristicKind::Manhattan, SearchPolicy::default()),
        BenchCase::new("textbook_hard", HeuristicKind::Sequence, SearchPolicy::default()),
        BenchCase::new("textbook_hard", HeuristicKind::MisplacedTiles, budget(2_000)),
        BenchCase::new("unsolvable", HeuristicKind::Manhattan, budget(20_000)),
    ]
}

/// Run `search()` only: no reports, no graph.
///
/// # Panics
///
/// Panics if the search refuses to start.
#[must_use]
pub fn run_engine(case: &BenchCase) -> SearchResult<TileGrid> {
    search(
        &SlidingPuzzle,
        case.start,
        case.goal,
        &case.heuristic,
        &case.policy,
    )
    .expect("search starts")
}

/// Run the full pipeline: search with graph recording, build the report and
/// hash it. Returns the report digest.
///
/// # Panics
///
/// Panics if any pipeline step fails.
#[must_use]
pub fn run_artifact(case: &BenchCase) -> ContentHash {
    let config = RunConfig {
        heuristic: case.heuristic.kind(),
        policy: SearchPolicy {
            record_graph: true,
            ..case.policy.clone()
        },
        verify_optimality: false,
    };
    let run = run_puzzle(&case.name, case.start, case.goal, &config).expect("run_puzzle");
    RunReport::from_run(&run)
        .and_then(|report| report.digest())
        .expect("report digest")
}
