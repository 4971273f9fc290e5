//! Search world contract trait.

use std::fmt::Debug;
use std::hash::Hash;

use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_STATE};

/// Trait for state spaces that support search.
///
/// # Contract
///
/// - `successors` must be deterministic: the same state yields the same
///   successors in the same order. Sibling order feeds tie-breaking.
/// - `successors` must never return the input state.
/// - Every edge costs one move.
/// - `identity_bytes` must be injective over reachable states; it feeds
///   audit fingerprints, not deduplication (which uses `Eq + Hash`).
pub trait SearchWorld {
    type State: Clone + Eq + Hash + Debug;

    /// Stable world identifier recorded in audit graphs.
    fn world_id(&self) -> &str;

    /// States one move away from `state`, in a fixed order.
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Canonical byte encoding of `state`.
    fn identity_bytes(&self, state: &Self::State) -> Vec<u8>;
}

/// `canonical_hash(DOMAIN_SEARCH_STATE, identity_bytes(state))`.
#[must_use]
pub fn state_fingerprint<W: SearchWorld + ?Sized>(world: &W, state: &W::State) -> ContentHash {
    canonical_hash(DOMAIN_SEARCH_STATE, &world.identity_bytes(state))
}
