//! Binary that runs a puzzle fixture through the harness and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture [FIXTURE.json] [--out DIR] [--report]`
//!
//! Without a fixture path the built-in demo runs. `--out` also writes the
//! bundle directory; `--report` prints the rendered trace after the
//! key=value lines. Logs go to stderr (`RUST_LOG`, default `warn`).

use std::path::PathBuf;
use std::process::ExitCode;

use octile_harness::bundle_dir::write_bundle_dir;
use octile_harness::fixture::{demo_fixture, load_fixture};
use octile_harness::report::render_trace;
use octile_harness::runner::{run_fixture_with_result, TRACE_ARTIFACT};
use tracing_subscriber::EnvFilter;

struct Args {
    fixture: Option<PathBuf>,
    out: Option<PathBuf>,
    report: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        fixture: None,
        out: None,
        report: false,
    };
    let mut it = std::env::args_os().skip(1);
    while let Some(arg) = it.next() {
        let text = arg.to_str().map(str::to_owned);
        match text.as_deref() {
            Some("--out") => {
                let dir = it.next().ok_or("--out needs a directory")?;
                args.out = Some(PathBuf::from(dir));
            }
            Some("--report") => args.report = true,
            Some(flag) if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            _ if args.fixture.is_none() => args.fixture = Some(PathBuf::from(arg)),
            _ => return Err("only one fixture path is accepted".into()),
        }
    }
    Ok(args)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = match &args.fixture {
        Some(path) => load_fixture(path)?,
        None => demo_fixture()?,
    };
    tracing::info!(fixture = ?args.fixture, "loaded fixture");

    let outcome = run_fixture_with_result(&fixture)?;
    let (result, bundle) = (&outcome.result, &outcome.bundle);
    let meta = &result.trace.metadata;
    let trace = bundle
        .artifact(TRACE_ARTIFACT)
        .ok_or("bundle is missing the trace artifact")?;

    println!("bundle_digest={}", bundle.digest.as_str());
    println!("trace_digest={}", result.trace.digest()?.as_str());
    println!("trace_artifact_hash={}", trace.content_hash.as_str());
    println!("termination_reason={}", meta.termination_reason.as_str());
    println!("total_expansions={}", meta.total_expansions);
    println!("total_children_generated={}", meta.total_children_generated);
    println!("frontier_high_water={}", meta.frontier_high_water);
    println!("goal_reached={}", result.is_goal_reached());
    match &result.goal_node {
        Some(goal) => println!("solution_cost_tenths={}", goal.g.tenths()),
        None => println!("solution_cost_tenths=none"),
    }
    println!("artifact_count={}", bundle.artifacts.len());

    if let Some(dir) = &args.out {
        write_bundle_dir(bundle, dir)?;
    }
    if args.report {
        print!("{}", render_trace(result));
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("search_fixture: {msg}");
            return ExitCode::from(2);
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("search_fixture: {e}");
            ExitCode::FAILURE
        }
    }
}
