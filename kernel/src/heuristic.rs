//! Goal-relative heuristic estimates for the 8-puzzle.
//!
//! Every estimate is measured against a goal grid supplied by the caller via
//! [`GoalTable::new`]; nothing here assumes a particular goal. The blank is
//! never scored.
//!
//! | Kind                  | Admissible | Consistent |
//! |-----------------------|------------|------------|
//! | `Zero`                | yes        | yes        |
//! | `MisplacedTiles`      | yes        | yes        |
//! | `Manhattan`           | yes        | yes        |
//! | `RowColumn`           | yes        | yes        |
//! | `Euclidean`           | yes        | yes        |
//! | `Sequence`            | no         | no         |
//! | `Nilsson`             | no         | no         |
//! | `WeightedRowColumn`   | no         | no         |

use std::fmt;

use crate::carrier::tile_grid::{TileGrid, BLANK, CELL_COUNT, SIDE};

/// Clockwise walk around the border, starting top-left.
const RING: [usize; 8] = [0, 1, 2, 5, 8, 7, 6, 3];

/// Row-major index of the centre cell.
const CENTRE: usize = 4;

/// Named heuristic functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeuristicKind {
    /// Always 0; turns A* into uniform-cost search.
    Zero,
    /// Number of tiles not on their goal cell.
    MisplacedTiles,
    /// Sum of city-block distances to goal cells.
    Manhattan,
    /// Tiles in the wrong row plus tiles in the wrong column.
    RowColumn,
    /// Sum of straight-line distances to goal cells.
    Euclidean,
    /// Sequence score `S(n)`: 2 per border tile not followed clockwise by its
    /// goal successor, 1 for a stray tile in the centre.
    Sequence,
    /// `Manhattan + 3 * Sequence`. Overestimates; expands few nodes.
    Nilsson,
    /// `Sequence + 1.5 * RowColumn`.
    WeightedRowColumn,
}

impl HeuristicKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Zero,
        Self::MisplacedTiles,
        Self::Manhattan,
        Self::RowColumn,
        Self::Euclidean,
        Self::Sequence,
        Self::Nilsson,
        Self::WeightedRowColumn,
    ];

    /// Stable identifier used in reports, audit graphs and the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::MisplacedTiles => "misplaced_tiles",
            Self::Manhattan => "manhattan",
            Self::RowColumn => "row_column",
            Self::Euclidean => "euclidean",
            Self::Sequence => "sequence",
            Self::Nilsson => "nilsson",
            Self::WeightedRowColumn => "weighted_row_column",
        }
    }

    /// Inverse of [`HeuristicKind::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Never overestimates the remaining number of moves.
    #[must_use]
    pub const fn is_admissible(self) -> bool {
        matches!(
            self,
            Self::Zero | Self::MisplacedTiles | Self::Manhattan | Self::RowColumn | Self::Euclidean
        )
    }

    /// Changes by at most 1 across a single move.
    ///
    /// Each kind marked here scores tiles independently and a move relocates
    /// one tile by one cell.
    #[must_use]
    pub const fn is_consistent(self) -> bool {
        self.is_admissible()
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Precomputed goal geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalTable {
    goal: TileGrid,
    /// Goal `(row, col)` per tile label.
    home: [(usize, usize); CELL_COUNT],
    /// Tile expected clockwise after each label on the goal border.
    ring_next: [Option<u8>; CELL_COUNT],
}

impl GoalTable {
    /// Build the lookup tables for `goal`.
    #[must_use]
    pub fn new(goal: TileGrid) -> Self {
        let mut home = [(0, 0); CELL_COUNT];
        for (index, &tile) in goal.cells().iter().enumerate() {
            home[usize::from(tile)] = (index / SIDE, index % SIDE);
        }

        let ring_tiles: Vec<u8> = RING
            .iter()
            .map(|&index| goal.cells()[index])
            .filter(|&tile| tile != BLANK)
            .collect();
        let mut ring_next = [None; CELL_COUNT];
        for (i, &tile) in ring_tiles.iter().enumerate() {
            ring_next[usize::from(tile)] = Some(ring_tiles[(i + 1) % ring_tiles.len()]);
        }

        Self {
            goal,
            home,
            ring_next,
        }
    }

    /// The goal this table measures against.
    #[must_use]
    pub const fn goal(&self) -> &TileGrid {
        &self.goal
    }

    /// Estimate the remaining cost of `grid` under `kind`.
    #[must_use]
    pub fn estimate(&self, kind: HeuristicKind, grid: &TileGrid) -> f64 {
        match kind {
            HeuristicKind::Zero => 0.0,
            HeuristicKind::MisplacedTiles => f64::from(self.misplaced_tiles(grid)),
            HeuristicKind::Manhattan => f64::from(self.manhattan(grid)),
            HeuristicKind::RowColumn => f64::from(self.row_column(grid)),
            HeuristicKind::Euclidean => self.euclidean(grid),
            HeuristicKind::Sequence => f64::from(self.sequence(grid)),
            HeuristicKind::Nilsson => {
                f64::from(self.manhattan(grid)) + 3.0 * f64::from(self.sequence(grid))
            }
            HeuristicKind::WeightedRowColumn => {
                f64::from(self.sequence(grid)) + 1.5 * f64::from(self.row_column(grid))
            }
        }
    }

    /// Tiles (blank excluded) not on their goal cell.
    #[must_use]
    pub fn misplaced_tiles(&self, grid: &TileGrid) -> u32 {
        let mut count = 0;
        for (index, &tile) in grid.cells().iter().enumerate() {
            if tile != BLANK && tile != self.goal.cells()[index] {
                count += 1;
            }
        }
        count
    }

    /// Sum of city-block distances from each tile to its goal cell.
    #[must_use]
    pub fn manhattan(&self, grid: &TileGrid) -> u32 {
        self.tile_offsets(grid)
            .map(|(dr, dc)| dr.unsigned_abs() + dc.unsigned_abs())
            .sum()
    }

    /// Tiles outside their goal row plus tiles outside their goal column.
    #[must_use]
    pub fn row_column(&self, grid: &TileGrid) -> u32 {
        self.tile_offsets(grid)
            .map(|(dr, dc)| u32::from(dr != 0) + u32::from(dc != 0))
            .sum()
    }

    /// Sum of straight-line distances from each tile to its goal cell.
    #[must_use]
    pub fn euclidean(&self, grid: &TileGrid) -> f64 {
        self.tile_offsets(grid)
            .map(|(dr, dc)| f64::from(dr * dr + dc * dc).sqrt())
            .sum()
    }

    /// The sequence score `S(n)`.
    #[must_use]
    pub fn sequence(&self, grid: &TileGrid) -> u32 {
        let cells = grid.cells();
        let mut score = 0;
        for (i, &index) in RING.iter().enumerate() {
            let tile = cells[index];
            if tile == BLANK {
                continue;
            }
            let follower = cells[RING[(i + 1) % RING.len()]];
            if self.ring_next[usize::from(tile)] != Some(follower) {
                score += 2;
            }
        }
        let centre = cells[CENTRE];
        if centre != BLANK && centre != self.goal.cells()[CENTRE] {
            score += 1;
        }
        score
    }

    /// `(row delta, col delta)` from each tile's cell to its goal cell.
    fn tile_offsets<'a>(&'a self, grid: &'a TileGrid) -> impl Iterator<Item = (i32, i32)> + 'a {
        grid.cells()
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(move |(index, &tile)| {
                let (home_row, home_col) = self.home[usize::from(tile)];
                (
                    signed(index / SIDE) - signed(home_row),
                    signed(index % SIDE) - signed(home_col),
                )
            })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn signed(coord: usize) -> i32 {
    coord as i32
}
