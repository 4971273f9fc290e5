//! Carrier module: the state representation.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod tile_grid;
