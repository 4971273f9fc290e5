//! Shared fixtures for the lock tests and the `search_fixture` binary.

pub mod canonical_run;
pub mod crafted;
