//! Blank slides: the 8-puzzle successor generator.
//!
//! A move names the direction the **blank** travels. Successors are always
//! produced in [`Direction::ALL`] order (Up, Down, Left, Right); the search
//! layer relies on that order for reproducible tie-breaking among siblings.

use std::fmt;

use crate::carrier::tile_grid::{TileGrid, SIDE};

/// Direction the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Generation order for successors.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The move that undoes this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase name used in rendered paths and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// The single move that turns `from` into `to`, if they are adjacent.
    #[must_use]
    pub fn between(from: &TileGrid, to: &TileGrid) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|&dir| slide(from, dir).as_ref() == Some(to))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slide the blank one cell in `dir`. `None` if that would leave the board.
#[must_use]
pub fn slide(grid: &TileGrid, dir: Direction) -> Option<TileGrid> {
    let (row, col) = grid.blank_position();
    let (row, col) = match dir {
        Direction::Up if row > 0 => (row - 1, col),
        Direction::Down if row + 1 < SIDE => (row + 1, col),
        Direction::Left if col > 0 => (row, col - 1),
        Direction::Right if col + 1 < SIDE => (row, col + 1),
        _ => return None,
    };
    Some(grid.with_blank_moved_to(row * SIDE + col))
}

/// All neighbouring grids, in [`Direction::ALL`] order.
#[must_use]
pub fn successors(grid: &TileGrid) -> Vec<TileGrid> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| slide(grid, dir))
        .collect()
}

/// Neighbouring grids paired with the move that reaches each.
#[must_use]
pub fn successors_with_moves(grid: &TileGrid) -> Vec<(Direction, TileGrid)> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| slide(grid, dir).map(|next| (dir, next)))
        .collect()
}

/// Apply a move sequence; `None` as soon as a move is illegal.
#[must_use]
pub fn apply_moves(grid: &TileGrid, moves: &[Direction]) -> Option<TileGrid> {
    moves
        .iter()
        .try_fold(*grid, |current, &dir| slide(&current, dir))
}
