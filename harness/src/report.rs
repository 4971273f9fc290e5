//! `RunReport`: the canonical record of one puzzle run.
//!
//! # Surfaces
//!
//! ```text
//! report.json        full report, canonical JSON (includes "timing")
//! digest basis       report.json minus "timing"
//! report digest      canonical_hash(DOMAIN_RUN_REPORT, digest basis)
//! ```
//!
//! Timing is observational: two runs of the same scenario produce different
//! `report.json` bytes but the same digest.

use lodestar_kernel::carrier::tile_grid::{TileGrid, SIDE};
use lodestar_kernel::proof::canon::{canonical_json_bytes, cost_repr, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_RUN_REPORT};

use lodestar_search::graph::termination_reason_to_json;
use lodestar_search::search::{SearchStats, SearchStatus};

use crate::runner::PuzzleRun;

/// Schema tag carried by every report.
pub const REPORT_SCHEMA_VERSION: &str = "run_report.v1";

/// Key of the observational section stripped from the digest basis.
pub const TIMING_KEY: &str = "timing";

/// A finished run, flattened for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub scenario: String,
    /// Start grid as `"283/164/075"`.
    pub start: String,
    pub goal: String,
    pub heuristic: String,
    pub admissible: bool,
    pub tie_break: String,
    pub max_expansions: Option<u64>,
    pub skip_parent_successor: bool,
    /// `"succeeded"` or `"failed"`.
    pub outcome: String,
    pub termination_reason: serde_json::Value,
    pub solution_length: Option<u32>,
    /// Blank moves along the solution, e.g. `["up", "left"]`.
    pub moves: Option<Vec<String>>,
    pub stats: SearchStats,
    /// Rendered via [`cost_repr`].
    pub effective_branching_factor: Option<String>,
    /// BFS distance; `None` when verification was not requested.
    pub reference_length: Option<Option<u32>>,
    pub optimal: Option<bool>,
    /// Whether start and goal share an inversion-parity class.
    pub same_parity_class: bool,
    /// Content hash of the recorded audit graph, if one was recorded.
    pub graph_digest: Option<ContentHash>,
    pub elapsed_micros: u64,
}

impl RunReport {
    /// Flatten a run.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the audit graph cannot be hashed.
    pub fn from_run(run: &PuzzleRun) -> Result<Self, CanonError> {
        let result = &run.result;
        let graph_digest = result
            .graph
            .as_ref()
            .map(lodestar_search::graph::SearchGraph::content_hash)
            .transpose()?;
        let outcome = match result.status {
            SearchStatus::Succeeded => "succeeded",
            SearchStatus::Failed | SearchStatus::Running => "failed",
        };
        Ok(Self {
            scenario: run.label.clone(),
            start: grid_text(&run.start),
            goal: grid_text(&run.goal),
            heuristic: run.heuristic.name().to_string(),
            admissible: run.heuristic.is_admissible(),
            tie_break: run.policy.tie_break.as_str().to_string(),
            max_expansions: run.policy.max_expansions,
            skip_parent_successor: run.policy.skip_parent_successor,
            outcome: outcome.to_string(),
            termination_reason: termination_reason_to_json(&result.termination_reason),
            solution_length: result.solution_length(),
            moves: run
                .moves
                .as_ref()
                .map(|moves| moves.iter().map(|m| m.as_str().to_string()).collect()),
            stats: result.stats.clone(),
            effective_branching_factor: result.effective_branching_factor().map(cost_repr),
            reference_length: run.reference_length,
            optimal: run.is_optimal(),
            same_parity_class: run.start.same_parity_class(&run.goal),
            graph_digest,
            elapsed_micros: u64::try_from(run.elapsed.as_micros()).unwrap_or(u64::MAX),
        })
    }

    /// Full report as a JSON value, timing included.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let stats = &self.stats;
        serde_json::json!({
            "admissible": self.admissible,
            "effective_branching_factor": self.effective_branching_factor,
            "goal": self.goal,
            "graph_digest": self.graph_digest.as_ref().map(ContentHash::as_str),
            "heuristic": self.heuristic,
            "max_expansions": self.max_expansions,
            "moves": self.moves,
            "optimal": self.optimal,
            "outcome": self.outcome,
            "reference_length": self.reference_length.map(|r| serde_json::json!({
                "length": r,
            })),
            "same_parity_class": self.same_parity_class,
            "scenario": self.scenario,
            "schema_version": REPORT_SCHEMA_VERSION,
            "skip_parent_successor": self.skip_parent_successor,
            "solution_length": self.solution_length,
            "start": self.start,
            "stats": {
                "cost_improvements": stats.cost_improvements,
                "duplicates_seen": stats.duplicates_seen,
                "frontier_high_water": stats.frontier_high_water,
                "max_depth": stats.max_depth,
                "nodes_expanded": stats.nodes_expanded,
                "nodes_generated": stats.nodes_generated,
                "propagated": stats.propagated,
                "reopened": stats.reopened,
                "reparented": stats.reparented,
                "skipped_parent": stats.skipped_parent,
            },
            "termination_reason": self.termination_reason,
            "tie_break": self.tie_break,
            TIMING_KEY: {
                "elapsed_micros": self.elapsed_micros,
            },
        })
    }

    /// Canonical bytes of the full report.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Canonical bytes of the report without its timing section.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest_basis_bytes(&self) -> Result<Vec<u8>, CanonError> {
        digest_basis_of(&self.to_json_value())
    }

    /// `canonical_hash(DOMAIN_RUN_REPORT, digest basis)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &self.digest_basis_bytes()?))
    }
}

/// Digest basis of an already-parsed report value.
///
/// # Errors
///
/// Returns [`CanonError`] if serialization fails.
pub fn digest_basis_of(report: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut basis = report.clone();
    if let Some(map) = basis.as_object_mut() {
        map.remove(TIMING_KEY);
    }
    canonical_json_bytes(&basis)
}

/// `"123/804/765"` form of a grid.
#[must_use]
pub fn grid_text(grid: &TileGrid) -> String {
    grid.cells()
        .chunks(SIDE)
        .map(|row| row.iter().map(u8::to_string).collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}
