//! Human-readable output: boards, solution paths, run summaries.
//!
//! Everything here returns a `String`; the `solve` binary decides where it
//! goes. Nothing rendered here is hashed.

use std::fmt::Write as _;

use lodestar_kernel::carrier::tile_grid::TileGrid;
use lodestar_kernel::operators::slide::Direction;
use lodestar_kernel::proof::canon::cost_repr;

use lodestar_search::node::SearchNode;

use crate::runner::PuzzleRun;

/// The board as three rows, e.g. `"2 8 3\n1 6 4\n0 7 5\n"`.
#[must_use]
pub fn render_board(grid: &TileGrid) -> String {
    format!("{grid}\n")
}

/// Every board on the path, root first, each labelled with the move of the
/// blank that produced it.
#[must_use]
pub fn render_path(states: &[&TileGrid], moves: &[Direction]) -> String {
    let mut out = String::new();
    for (step, state) in states.iter().enumerate() {
        match step.checked_sub(1).and_then(|i| moves.get(i)) {
            Some(dir) => {
                let _ = writeln!(out, "step {step}: blank {dir}");
            }
            None => out.push_str("start:\n"),
        }
        out.push_str(&render_board(state));
        out.push('\n');
    }
    out
}

/// One popped node, the way `--trace` prints it.
#[must_use]
pub fn render_trace_step(node: &SearchNode<TileGrid>) -> String {
    format!(
        "bestNode:\n{}g:  {}\nh': {}\nf': {}\n",
        render_board(node.state()),
        cost_repr(node.g_cost()),
        cost_repr(node.h_cost()),
        cost_repr(node.f_cost()),
    )
}

/// Outcome, counters, path and timing for one run.
#[must_use]
pub fn render_summary(run: &PuzzleRun) -> String {
    let result = &run.result;
    let stats = &result.stats;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Scenario: {} (heuristic {}, tie-break {})",
        run.label, run.heuristic, run.policy.tie_break
    );
    out.push_str(if result.is_goal_reached() {
        "Found it!\n"
    } else {
        "Failure.\n"
    });
    let _ = writeln!(out, "Generated {} nodes.", stats.nodes_generated);
    let _ = writeln!(out, "{} nodes expanded.", stats.nodes_expanded);
    let _ = writeln!(out, "Max depth: {}", stats.max_depth);
    match result.effective_branching_factor() {
        Some(ebf) => {
            let _ = writeln!(out, "Effective branching factor: {ebf:.4}");
        }
        None => out.push_str("Effective branching factor: n/a\n"),
    }
    let _ = writeln!(out, "Termination: {}", result.termination_reason);

    if let (Some(states), Some(moves)) = (result.path_states(), run.moves.as_ref()) {
        let _ = writeln!(out, "Solution length: {} moves", moves.len());
        out.push_str("Trace to root node:\n");
        out.push_str(&render_path(&states, moves));
    }

    if let Some(reference) = run.reference_length {
        match reference {
            Some(length) => {
                let _ = writeln!(out, "Breadth-first distance: {length}");
            }
            None => out.push_str("Breadth-first search: goal unreachable\n"),
        }
        if let Some(optimal) = run.is_optimal() {
            let _ = writeln!(out, "Optimal: {}", if optimal { "yes" } else { "no" });
        }
    }
    if !run.start.same_parity_class(&run.goal) {
        out.push_str("Note: start and goal are in different parity classes.\n");
    }

    let _ = writeln!(out, "Execution time: {} microseconds", run.elapsed.as_micros());
    out
}
