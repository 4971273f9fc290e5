//! Single source of truth for the cross-process determinism run.
//!
//! Used by both the `search_fixture` binary and the determinism tests, so
//! the child process and the in-process expectation cannot drift apart.
//!
//! Run: `textbook_hard` with every heuristic the kernel knows, graph
//! recording on, LIFO tie-break.

use lodestar_harness::report::RunReport;
use lodestar_harness::runner::{run_scenario, RunConfig};
use lodestar_kernel::heuristic::HeuristicKind;
use lodestar_search::policy::SearchPolicy;

/// Scenario exercised by the canonical run.
pub const CANONICAL_SCENARIO: &str = "textbook_hard";

/// Expansion cap keeping the uninformed heuristics affordable.
pub const CANONICAL_BUDGET: u64 = 5_000;

/// Config for one heuristic of the canonical run.
#[must_use]
pub fn canonical_config(heuristic: HeuristicKind) -> RunConfig {
    RunConfig {
        heuristic,
        policy: SearchPolicy {
            max_expansions: Some(CANONICAL_BUDGET),
            record_graph: true,
            ..SearchPolicy::default()
        },
        verify_optimality: false,
    }
}

/// The `key=value` lines the fixture prints, one block per heuristic.
///
/// # Panics
///
/// Panics if the built-in scenario fails to run. Test-only invariant.
#[must_use]
pub fn canonical_lines() -> Vec<String> {
    let mut lines = Vec::new();
    for kind in HeuristicKind::ALL {
        let run = run_scenario(CANONICAL_SCENARIO, &canonical_config(kind))
            .expect("canonical scenario runs");
        let graph = run.result.graph.as_ref().expect("graph recorded");
        let graph_digest = graph.content_hash().expect("graph hashes");
        let report = RunReport::from_run(&run).expect("report builds");
        let name = kind.name();

        lines.push(format!("{name}.graph_digest={graph_digest}"));
        lines.push(format!(
            "{name}.report_digest={}",
            report.digest().expect("report hashes")
        ));
        lines.push(format!(
            "{name}.termination_reason={}",
            run.result.termination_reason.as_str()
        ));
        lines.push(format!(
            "{name}.nodes_generated={}",
            run.result.stats.nodes_generated
        ));
        lines.push(format!(
            "{name}.nodes_expanded={}",
            run.result.stats.nodes_expanded
        ));
        lines.push(format!(
            "{name}.solution_length={}",
            run.result
                .solution_length()
                .map_or_else(|| "none".to_string(), |n| n.to_string())
        ));
    }
    lines
}
