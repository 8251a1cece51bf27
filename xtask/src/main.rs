//! Developer tasks for the LexIntake workspace (domain, core, infra, app).
//!
//! Run with: `cargo xtask <task>`
//!
//! Output is for a developer at a terminal, so it goes through `println!`
//! rather than tracing.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::{Command, ExitCode};

use anyhow::{bail, Context};

mod features;

type TaskFn = fn() -> anyhow::Result<()>;

/// Every task `cargo xtask` knows, in help order.
const TASKS: &[(&str, &str, TaskFn)] = &[
    ("ci", "Everything below except `help`, in pipeline order", run_ci),
    ("fmt", "Check rustfmt across all four crates and xtask", run_fmt),
    ("clippy", "Lint every target with the `email` notifier compiled in", run_clippy),
    (
        "test-features",
        "Check lexintake-infra and lexintake-app with and without `email`",
        features::test_feature_matrix,
    ),
    ("test", "Run unit tests plus the wiremock and in-memory calendar suites", run_test),
    ("deny", "License and source policy for reqwest, lettre and friends", run_deny),
    ("audit", "RustSec advisories for the lockfile", run_audit),
];

/// Tasks `ci` runs, cheapest first so formatting slips fail fast.
const CI_PIPELINE: &[&str] = &["fmt", "clippy", "test-features", "test", "deny", "audit"];

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        None | Some("help" | "--help" | "-h") => {
            print_help();
            Ok(())
        }
        Some(name) => match find_task(name) {
            Some(run) => run(),
            None => {
                eprintln!("Unknown task: {name}");
                eprintln!();
                print_help();
                Err(anyhow::anyhow!("unknown task `{name}`"))
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn find_task(name: &str) -> Option<TaskFn> {
    TASKS.iter().find(|(task, _, _)| *task == name).map(|(_, _, run)| *run)
}

fn print_help() {
    println!("LexIntake developer tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    for (name, description, _) in TASKS {
        println!("    {name:<14} {description}");
    }
    println!("    {:<14} Show this message", "help");
    println!();
    println!("Scheduling tests run against a frozen clock; no Google, Telegram,");
    println!("OpenAI or SMTP credentials are needed.");
}

fn run_ci() -> anyhow::Result<()> {
    let total = CI_PIPELINE.len();
    for (index, name) in CI_PIPELINE.iter().enumerate() {
        println!("\n==> [{}/{total}] {name}", index + 1);
        let run = find_task(name).with_context(|| format!("ci step `{name}` is not a task"))?;
        run().with_context(|| format!("ci step `{name}`"))?;
    }

    println!("\n✓ LexIntake CI passed");
    Ok(())
}

fn run_fmt() -> anyhow::Result<()> {
    cargo(&["fmt", "--all", "--", "--check"], "formatting drift; run `cargo fmt --all`")
}

fn run_clippy() -> anyhow::Result<()> {
    cargo(&["clippy", "--workspace", "--all-targets", "--all-features"], "clippy reported problems")
}

fn run_test() -> anyhow::Result<()> {
    cargo(&["test", "--workspace", "--all-features"], "test suite failed")
}

fn run_deny() -> anyhow::Result<()> {
    ensure_cargo_tool("deny", "cargo-deny")?;
    cargo(&["deny", "check"], "cargo-deny rejected the dependency graph")
}

fn run_audit() -> anyhow::Result<()> {
    ensure_cargo_tool("audit", "cargo-audit")?;
    cargo(&["audit"], "cargo-audit found advisories")
}

/// Run `cargo <args>`, failing with `failure` on a non-zero exit.
fn cargo(args: &[&str], failure: &str) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("could not spawn `cargo {}`", args.join(" ")))?;

    if !status.success() {
        bail!("{failure}");
    }
    Ok(())
}

fn ensure_cargo_tool(subcommand: &str, package: &str) -> anyhow::Result<()> {
    let installed = Command::new("cargo")
        .args([subcommand, "--version"])
        .output()
        .is_ok_and(|output| output.status.success());

    if !installed {
        eprintln!("{package} is not installed.");
        eprintln!("Install it with: cargo install {package}");
        bail!("{package} not found");
    }
    Ok(())
}
