//! Lodestar Harness: the 8-puzzle wired to the search engine.
//!
//! The harness binds the kernel's tile grid and heuristics to the search
//! crate's contracts, runs named scenarios, and packages each run as a
//! canonical report that can be written to and verified from disk.
//!
//! The harness does NOT implement search logic; it delegates to
//! `lodestar_search`. Presentation (boards, paths, summaries) lives here.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod reference;
pub mod render;
pub mod report;
pub mod report_dir;
pub mod runner;
pub mod scenario;
pub mod worlds;
