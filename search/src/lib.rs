//! Lodestar Search: deterministic A* over an implicit state graph.
//!
//! This crate is domain-agnostic. It depends only on `lodestar_kernel` for
//! hashing and canonical JSON; it never sees a tile grid.
//!
//! # Crate dependency graph
//!
//! ```text
//! lodestar_kernel  ←  lodestar_search  ←  lodestar_harness
//! (grid, hashing)     (store, frontier,    (puzzle world, runner,
//!                      loop, propagation)   reports, rendering)
//! ```
//!
//! # Key types
//!
//! - [`SearchWorld`](contract::SearchWorld) -- successor generator contract
//! - [`Heuristic`](heuristic::Heuristic) -- remaining-cost estimate contract
//! - [`NodeStore`](store::NodeStore) -- arena owning every node of one search
//! - [`OpenFrontier`](frontier::OpenFrontier) / [`ClosedSet`](closed::ClosedSet)
//! - [`SearchRun`](search::SearchRun) -- the stepwise search state machine
//! - [`SearchGraph`](graph::SearchGraph) -- expansion audit log

#![forbid(unsafe_code)]

pub mod closed;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod propagate;
pub mod search;
pub mod store;
