//! Named start/goal pairs.
//!
//! The two textbook starts are the classic 8-puzzle exercises measured
//! against the spiral goal `123/804/765`. Their optimal solution lengths
//! are 6 and 18 moves.

use lodestar_kernel::carrier::tile_grid::{GridError, TileGrid};

/// The spiral goal used by every built-in scenario.
pub const CLASSIC_GOAL: &str = "123/804/765";

/// A named start/goal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub start: &'static str,
    pub goal: &'static str,
    /// Optimal number of moves; `None` when the goal is unreachable.
    pub optimal_length: Option<u32>,
    pub description: &'static str,
}

impl Scenario {
    /// # Errors
    ///
    /// [`GridError`] if the built-in text is malformed.
    pub fn start_grid(&self) -> Result<TileGrid, GridError> {
        TileGrid::parse(self.start)
    }

    /// # Errors
    ///
    /// [`GridError`] if the built-in text is malformed.
    pub fn goal_grid(&self) -> Result<TileGrid, GridError> {
        TileGrid::parse(self.goal)
    }
}

/// Every built-in scenario.
pub const SCENARIOS: [Scenario; 5] = [
    Scenario {
        name: "textbook_easy",
        start: "283/164/075",
        goal: CLASSIC_GOAL,
        optimal_length: Some(6),
        description: "first textbook start, six moves out",
    },
    Scenario {
        name: "textbook_hard",
        start: "216/408/753",
        goal: CLASSIC_GOAL,
        optimal_length: Some(18),
        description: "second textbook start, eighteen moves out",
    },
    Scenario {
        name: "solved",
        start: CLASSIC_GOAL,
        goal: CLASSIC_GOAL,
        optimal_length: Some(0),
        description: "start is already the goal",
    },
    Scenario {
        name: "one_move",
        start: "123/084/765",
        goal: CLASSIC_GOAL,
        optimal_length: Some(1),
        description: "a single slide from the goal",
    },
    Scenario {
        name: "unsolvable",
        start: "213/804/765",
        goal: CLASSIC_GOAL,
        optimal_length: None,
        description: "tiles 1 and 2 swapped; opposite parity class",
    },
];

/// Look up a built-in scenario by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.name == name)
}
