//! `SlidingPuzzle`: the 8-puzzle as a search world.
//!
//! States are kernel [`TileGrid`]s. Successors come from the kernel's blank
//! slides in Up, Down, Left, Right order; identity bytes are the nine cells.

use lodestar_kernel::carrier::tile_grid::TileGrid;
use lodestar_kernel::heuristic::{GoalTable, HeuristicKind};
use lodestar_kernel::operators::slide::successors;

use lodestar_search::contract::SearchWorld;
use lodestar_search::heuristic::Heuristic;

/// The 3x3 sliding-tile puzzle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingPuzzle;

impl SearchWorld for SlidingPuzzle {
    type State = TileGrid;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "sliding_puzzle_3x3"
    }

    fn successors(&self, state: &TileGrid) -> Vec<TileGrid> {
        successors(state)
    }

    fn identity_bytes(&self, state: &TileGrid) -> Vec<u8> {
        state.identity_bytes().to_vec()
    }
}

/// A named kernel heuristic measured against a fixed goal.
#[derive(Debug, Clone)]
pub struct PuzzleHeuristic {
    kind: HeuristicKind,
    table: GoalTable,
}

impl PuzzleHeuristic {
    #[must_use]
    pub fn new(kind: HeuristicKind, goal: TileGrid) -> Self {
        Self {
            kind,
            table: GoalTable::new(goal),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> HeuristicKind {
        self.kind
    }

    #[must_use]
    pub const fn goal(&self) -> &TileGrid {
        self.table.goal()
    }
}

impl Heuristic<TileGrid> for PuzzleHeuristic {
    fn estimate(&self, state: &TileGrid) -> f64 {
        self.table.estimate(self.kind, state)
    }

    fn heuristic_id(&self) -> &str {
        self.kind.name()
    }
}
