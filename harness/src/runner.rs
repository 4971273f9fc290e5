//! Harness runner: binds a start/goal pair to the search engine.
//!
//! # Pipeline
//!
//! ```text
//! parse grids → PuzzleHeuristic::new(kind, goal)
//!   → SearchRun::new → [step × N, observer sees each pop] → finish
//!   → path moves → optional BFS cross-check → PuzzleRun
//! ```
//!
//! Timing covers the search only; the BFS cross-check is excluded.

use std::time::{Duration, Instant};

use lodestar_kernel::carrier::tile_grid::{GridError, TileGrid};
use lodestar_kernel::heuristic::HeuristicKind;
use lodestar_kernel::operators::slide::Direction;
use lodestar_kernel::proof::canon::CanonError;

use lodestar_search::error::SearchError;
use lodestar_search::node::SearchNode;
use lodestar_search::policy::SearchPolicy;
use lodestar_search::search::{SearchResult, SearchRun, SearchStatus};

use crate::reference::bfs_distance;
use crate::scenario;
use crate::worlds::sliding_puzzle::{PuzzleHeuristic, SlidingPuzzle};

/// Label used for runs that did not come from a named scenario.
pub const CUSTOM_LABEL: &str = "custom";

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// No built-in scenario has this name.
    UnknownScenario { name: String },
    /// A start or goal grid was rejected.
    Grid(GridError),
    /// The search refused to start.
    Search(SearchError),
    /// A report or audit graph could not be serialized.
    Canon(CanonError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownScenario { name } => write!(f, "unknown scenario: {name}"),
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Canon(e) => write!(f, "canonical JSON error: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<GridError> for RunError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// How to run one puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub heuristic: HeuristicKind,
    pub policy: SearchPolicy,
    /// Also solve with breadth-first search and compare lengths.
    pub verify_optimality: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicKind::Manhattan,
            policy: SearchPolicy::default(),
            verify_optimality: false,
        }
    }
}

/// Everything one run produced.
#[derive(Debug)]
pub struct PuzzleRun {
    /// Scenario name, or [`CUSTOM_LABEL`].
    pub label: String,
    pub start: TileGrid,
    pub goal: TileGrid,
    pub heuristic: HeuristicKind,
    pub policy: SearchPolicy,
    pub result: SearchResult<TileGrid>,
    /// Blank moves along the solution path, when one was found.
    pub moves: Option<Vec<Direction>>,
    /// BFS distance, when verification was requested. The inner `None`
    /// means BFS proved the goal unreachable.
    pub reference_length: Option<Option<u32>>,
    /// Wall-clock time of the search.
    pub elapsed: Duration,
}

impl PuzzleRun {
    /// Whether A* matched the BFS optimum (both lengths, or both "no path").
    /// `None` if verification was not requested.
    #[must_use]
    pub fn is_optimal(&self) -> Option<bool> {
        self.reference_length
            .map(|reference| reference == self.result.solution_length())
    }

    /// Solution path states, root first.
    #[must_use]
    pub fn path(&self) -> Option<Vec<&TileGrid>> {
        self.result.path_states()
    }
}

/// Run a built-in scenario by name.
///
/// # Errors
///
/// [`RunError::UnknownScenario`], or any error of [`run_puzzle`].
pub fn run_scenario(name: &str, config: &RunConfig) -> Result<PuzzleRun, RunError> {
    let scenario = scenario::find(name).ok_or_else(|| RunError::UnknownScenario {
        name: name.to_string(),
    })?;
    run_puzzle(
        scenario.name,
        scenario.start_grid()?,
        scenario.goal_grid()?,
        config,
    )
}

/// Solve `start` → `goal`.
///
/// # Errors
///
/// [`RunError::Search`] if the search refuses to start.
pub fn run_puzzle(
    label: &str,
    start: TileGrid,
    goal: TileGrid,
    config: &RunConfig,
) -> Result<PuzzleRun, RunError> {
    run_puzzle_observed(label, start, goal, config, &mut |_| {})
}

/// [`run_puzzle`], calling `on_pop` with every node taken off the frontier
/// (including the goal), in pop order.
///
/// # Errors
///
/// [`RunError::Search`] if the search refuses to start.
pub fn run_puzzle_observed(
    label: &str,
    start: TileGrid,
    goal: TileGrid,
    config: &RunConfig,
    on_pop: &mut dyn FnMut(&SearchNode<TileGrid>),
) -> Result<PuzzleRun, RunError> {
    let heuristic = PuzzleHeuristic::new(config.heuristic, goal);
    let world = SlidingPuzzle;

    let started = Instant::now();
    let mut run = SearchRun::new(&world, start, goal, &heuristic, config.policy.clone())?;
    loop {
        let before = run.last_popped();
        let status = run.step();
        if let Some(popped) = run.last_popped().filter(|&id| Some(id) != before) {
            on_pop(&run.store()[popped]);
        }
        if status != SearchStatus::Running {
            break;
        }
    }
    let result = run.finish();
    let elapsed = started.elapsed();

    let moves = result.path_states().and_then(|states| path_moves(&states));
    let reference_length = config
        .verify_optimality
        .then(|| bfs_distance(&world, &start, &goal));

    Ok(PuzzleRun {
        label: label.to_string(),
        start,
        goal,
        heuristic: config.heuristic,
        policy: config.policy.clone(),
        result,
        moves,
        reference_length,
        elapsed,
    })
}

/// The blank move between each consecutive pair of grids.
///
/// `None` if some pair is not one slide apart.
#[must_use]
pub fn path_moves(states: &[&TileGrid]) -> Option<Vec<Direction>> {
    states
        .windows(2)
        .map(|pair| Direction::between(pair[0], pair[1]))
        .collect()
}
