//! `TileGrid`: a validated 3x3 sliding-tile arrangement.
//!
//! # Layout
//!
//! Nine cells in row-major order. Tiles are labelled `1..=8`; the empty cell
//! is [`BLANK`] (`0`). Every label appears exactly once.
//!
//! # Validity
//!
//! A `TileGrid` can only be built through [`TileGrid::new`],
//! [`TileGrid::from_cells`] or [`TileGrid::parse`], all of which reject
//! malformed input with a [`GridError`]. Code that holds a `TileGrid` may
//! therefore assume exactly one blank and distinct in-range tiles; the search
//! layer never re-checks this.

use std::fmt;
use std::str::FromStr;

/// Side length of the grid.
pub const SIDE: usize = 3;

/// Number of cells (`SIDE * SIDE`).
pub const CELL_COUNT: usize = SIDE * SIDE;

/// The empty-cell marker.
pub const BLANK: u8 = 0;

/// Largest tile label.
#[allow(clippy::cast_possible_truncation)]
pub const MAX_TILE: u8 = (CELL_COUNT - 1) as u8;

/// Typed failure for grid construction. Fail-closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A cell holds a label outside `0..=8`.
    TileOutOfRange { index: usize, tile: u8 },
    /// No cell holds the blank marker.
    MissingBlank,
    /// A label appears in more than one cell.
    DuplicateTile { tile: u8 },
    /// Text input could not be read as nine cells.
    Malformed { detail: String },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileOutOfRange { index, tile } => {
                write!(f, "tile {tile} at cell {index} is outside 0..={MAX_TILE}")
            }
            Self::MissingBlank => write!(f, "grid has no blank cell"),
            Self::DuplicateTile { tile } => write!(f, "tile {tile} appears more than once"),
            Self::Malformed { detail } => write!(f, "malformed grid: {detail}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Permutation parity of a grid, ignoring the blank.
///
/// On a 3-wide board a blank slide never changes the inversion parity, so the
/// state space splits into two classes that cannot reach each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

/// A validated 3x3 tile arrangement.
///
/// Equality and hashing cover the cells only; `blank` is derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileGrid {
    cells: [u8; CELL_COUNT],
    blank: u8,
}

impl TileGrid {
    /// Build a grid from three rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if a tile is out of range, the blank is missing,
    /// or a tile is repeated.
    pub fn new(rows: [[u8; SIDE]; SIDE]) -> Result<Self, GridError> {
        let mut cells = [BLANK; CELL_COUNT];
        for (row, values) in rows.iter().enumerate() {
            cells[row * SIDE..(row + 1) * SIDE].copy_from_slice(values);
        }
        Self::from_cells(cells)
    }

    /// Build a grid from nine row-major cells.
    ///
    /// # Errors
    ///
    /// Same as [`TileGrid::new`].
    pub fn from_cells(cells: [u8; CELL_COUNT]) -> Result<Self, GridError> {
        if let Some((index, &tile)) = cells.iter().enumerate().find(|&(_, &t)| t > MAX_TILE) {
            return Err(GridError::TileOutOfRange { index, tile });
        }
        let Some(blank) = cells.iter().position(|&t| t == BLANK) else {
            return Err(GridError::MissingBlank);
        };
        let mut seen = [false; CELL_COUNT];
        for &tile in &cells {
            let slot = &mut seen[usize::from(tile)];
            if *slot {
                return Err(GridError::DuplicateTile { tile });
            }
            *slot = true;
        }
        #[allow(clippy::cast_possible_truncation)]
        let blank = blank as u8;
        Ok(Self { cells, blank })
    }

    /// Parse nine digits, optionally separated by whitespace, `/` or `,`.
    ///
    /// `"283/164/075"`, `"2 8 3 1 6 4 0 7 5"` and `"283164075"` are the same grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Malformed`] for unexpected characters or a cell
    /// count other than nine, otherwise the errors of [`TileGrid::from_cells`].
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut cells = [BLANK; CELL_COUNT];
        let mut count = 0usize;
        for ch in text.chars() {
            if ch.is_whitespace() || ch == '/' || ch == ',' {
                continue;
            }
            let Some(digit) = ch.to_digit(10).and_then(|d| u8::try_from(d).ok()) else {
                return Err(GridError::Malformed {
                    detail: format!("unexpected character {ch:?}"),
                });
            };
            if count == CELL_COUNT {
                return Err(GridError::Malformed {
                    detail: format!("more than {CELL_COUNT} cells"),
                });
            }
            cells[count] = digit;
            count += 1;
        }
        if count != CELL_COUNT {
            return Err(GridError::Malformed {
                detail: format!("expected {CELL_COUNT} cells, found {count}"),
            });
        }
        Self::from_cells(cells)
    }

    /// Row-major cells.
    #[must_use]
    pub const fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    /// Tile at `(row, col)`. Both must be `< SIDE`.
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIDE + col]
    }

    /// Row-major index of the blank.
    #[must_use]
    pub const fn blank_index(&self) -> usize {
        self.blank as usize
    }

    /// `(row, col)` of the blank.
    #[must_use]
    pub const fn blank_position(&self) -> (usize, usize) {
        let index = self.blank_index();
        (index / SIDE, index % SIDE)
    }

    /// `(row, col)` of `tile`, or `None` if the label is not on the board.
    #[must_use]
    pub fn position_of(&self, tile: u8) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&t| t == tile)
            .map(|index| (index / SIDE, index % SIDE))
    }

    /// Move the blank onto the neighbouring cell `target`.
    ///
    /// The caller guarantees `target` is orthogonally adjacent to the blank.
    #[must_use]
    pub(crate) fn with_blank_moved_to(&self, target: usize) -> Self {
        let mut cells = self.cells;
        cells.swap(self.blank_index(), target);
        #[allow(clippy::cast_possible_truncation)]
        let blank = target as u8;
        Self { cells, blank }
    }

    /// Canonical encoding for fingerprinting: the nine cells, row-major.
    #[must_use]
    pub const fn identity_bytes(&self) -> [u8; CELL_COUNT] {
        self.cells
    }

    /// Number of tile pairs (blank excluded) that appear in reverse order.
    #[must_use]
    pub fn inversion_count(&self) -> u32 {
        let tiles: Vec<u8> = self.cells.iter().copied().filter(|&t| t != BLANK).collect();
        let mut inversions = 0u32;
        for (i, &a) in tiles.iter().enumerate() {
            for &b in &tiles[i + 1..] {
                if a > b {
                    inversions += 1;
                }
            }
        }
        inversions
    }

    /// Parity class of this arrangement.
    #[must_use]
    pub fn inversion_parity(&self) -> Parity {
        if self.inversion_count() % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    /// Whether `other` lies in the same parity class (and is therefore reachable).
    #[must_use]
    pub fn same_parity_class(&self, other: &Self) -> bool {
        self.inversion_parity() == other.inversion_parity()
    }
}

impl FromStr for TileGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Three lines of space-separated labels, the blank printed as `0`.
impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            for col in 0..SIDE {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.get(row, col))?;
            }
            if row + 1 < SIDE {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
