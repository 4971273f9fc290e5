//! Proof module: canonical hashing and canonical JSON for audit artifacts.
//!
//! Depends on nothing internal.

pub mod canon;
pub mod hash;
