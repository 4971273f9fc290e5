//! Operators module: legal moves over a [`TileGrid`](crate::carrier::tile_grid::TileGrid).
//!
//! Depends on `carrier`. Does not import from `proof`.

pub mod slide;
