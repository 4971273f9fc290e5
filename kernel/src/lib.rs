//! Lodestar Kernel: the 8-puzzle domain, free of any search machinery.
//!
//! # API Surface
//!
//! - [`carrier::tile_grid::TileGrid`] -- a validated 3x3 tile arrangement
//! - [`operators::slide::successors`] -- the successor generator (blank slides)
//! - [`heuristic::GoalTable`] -- goal-relative heuristic estimates
//! - [`proof::hash::canonical_hash`] / [`proof::canon::canonical_json_bytes`] --
//!   fingerprints and deterministic serialization for audit artifacts
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `operators` ← `heuristic`; `proof` depends on nothing internal.
//!
//! One-way only. The kernel never imports `lodestar_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod heuristic;
pub mod operators;
pub mod proof;
