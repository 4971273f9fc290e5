//! Solve an 8-puzzle with A* and print the run summary.
//!
//! Usage:
//!
//! ```text
//! solve [--scenario NAME | --grid DIGITS] [--goal DIGITS]
//!       [--heuristic NAME] [--max-expansions N] [--fifo]
//!       [--trace] [--verify] [--out DIR]
//! solve --list
//! ```
//!
//! Exit codes: 0 goal found, 1 search failed, 2 usage or I/O error.

use std::path::PathBuf;
use std::process::ExitCode;

use lodestar_harness::render::{render_summary, render_trace_step};
use lodestar_harness::report::RunReport;
use lodestar_harness::report_dir::write_report_dir;
use lodestar_harness::runner::{run_puzzle_observed, RunConfig, CUSTOM_LABEL};
use lodestar_harness::scenario::{self, CLASSIC_GOAL, SCENARIOS};
use lodestar_kernel::carrier::tile_grid::TileGrid;
use lodestar_kernel::heuristic::HeuristicKind;
use lodestar_search::policy::TieBreak;

const USAGE: &str = "\
usage: solve [--scenario NAME | --grid DIGITS] [--goal DIGITS]
             [--heuristic NAME] [--max-expansions N] [--fifo]
             [--trace] [--verify] [--out DIR]
       solve --list";

/// Run when neither `--scenario` nor `--grid` is given.
const DEFAULT_SCENARIO: &str = "textbook_easy";

#[derive(Debug, Default)]
struct Args {
    scenario: Option<String>,
    grid: Option<String>,
    goal: Option<String>,
    config: RunConfig,
    trace: bool,
    out: Option<PathBuf>,
    list: bool,
    help: bool,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    let mut raw = raw.into_iter();
    while let Some(flag) = raw.next() {
        let mut value = |name: &str| raw.next().ok_or_else(|| format!("{name} needs a value"));
        match flag.as_str() {
            "--scenario" => args.scenario = Some(value("--scenario")?),
            "--grid" => args.grid = Some(value("--grid")?),
            "--goal" => args.goal = Some(value("--goal")?),
            "--heuristic" => {
                let name = value("--heuristic")?;
                args.config.heuristic = HeuristicKind::from_name(&name)
                    .ok_or_else(|| format!("unknown heuristic: {name}"))?;
            }
            "--max-expansions" => {
                let n = value("--max-expansions")?;
                let n = n
                    .parse::<u64>()
                    .map_err(|e| format!("--max-expansions {n}: {e}"))?;
                args.config.policy.max_expansions = Some(n);
            }
            "--fifo" => args.config.policy.tie_break = TieBreak::Fifo,
            "--trace" => args.trace = true,
            "--verify" => args.config.verify_optimality = true,
            "--out" => {
                args.out = Some(PathBuf::from(value("--out")?));
                args.config.policy.record_graph = true;
            }
            "--list" => args.list = true,
            "--help" | "-h" => args.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    if args.scenario.is_some() && args.grid.is_some() {
        return Err("--scenario and --grid are mutually exclusive".into());
    }
    Ok(args)
}

fn list_scenarios() {
    for s in &SCENARIOS {
        let optimal = s
            .optimal_length
            .map_or_else(|| "unsolvable".to_string(), |n| format!("{n} moves"));
        println!("{:<14} {} -> {}  ({optimal}) {}", s.name, s.start, s.goal, s.description);
    }
    println!();
    let names: Vec<&str> = HeuristicKind::ALL.into_iter().map(HeuristicKind::name).collect();
    println!("heuristics: {}", names.join(", "));
}

fn run(args: &Args) -> Result<bool, String> {
    let (label, start, goal) = match &args.grid {
        Some(grid) => (
            CUSTOM_LABEL,
            grid.as_str(),
            args.goal.as_deref().unwrap_or(CLASSIC_GOAL),
        ),
        None => {
            let name = args.scenario.as_deref().unwrap_or(DEFAULT_SCENARIO);
            let s = scenario::find(name).ok_or_else(|| format!("unknown scenario: {name}"))?;
            (s.name, s.start, args.goal.as_deref().unwrap_or(s.goal))
        }
    };
    let start = TileGrid::parse(start).map_err(|e| format!("start grid: {e}"))?;
    let goal = TileGrid::parse(goal).map_err(|e| format!("goal grid: {e}"))?;

    let trace = args.trace;
    let run = run_puzzle_observed(label, start, goal, &args.config, &mut |node| {
        if trace {
            println!("{}", render_trace_step(node));
        }
    })
    .map_err(|e| e.to_string())?;

    print!("{}", render_summary(&run));

    if let Some(dir) = &args.out {
        let report = RunReport::from_run(&run).map_err(|e| e.to_string())?;
        let digest = write_report_dir(&report, run.result.graph.as_ref(), dir)
            .map_err(|e| e.to_string())?;
        println!("Report written to {} ({digest})", dir.display());
    }

    Ok(run.result.is_goal_reached())
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    if args.list {
        list_scenarios();
        return ExitCode::SUCCESS;
    }
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(2)
        }
    }
}
