use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for the city core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Save a city with the CLI and load it back
    Smoke,
}

/// One cargo invocation.
struct Step {
    label: &'static str,
    args: &'static [&'static str],
}

const FMT: Step = Step {
    label: "cargo fmt --check",
    args: &["fmt", "--all", "--", "--check"],
};
const CLIPPY: Step = Step {
    label: "cargo clippy",
    args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
};
const TEST: Step = Step {
    label: "cargo test",
    args: &["test", "--workspace"],
};
const DOC: Step = Step {
    label: "cargo doc",
    args: &["doc", "--workspace", "--no-deps"],
};
const BUILD: Step = Step {
    label: "cargo build",
    args: &["build", "--workspace"],
};
const SMOKE_SAVE: Step = Step {
    label: "lincity-cli new",
    args: &[
        "run", "-q", "-p", "lincity-cli", "--", "new", "--out", "target/smoke/city.sav",
        "--ticks", "5",
    ],
};
const SMOKE_LOAD: Step = Step {
    label: "lincity-cli load",
    args: &["run", "-q", "-p", "lincity-cli", "--", "load", "target/smoke/city.sav"],
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let steps: &[Step] = match cli.command {
        Commands::Check => &[FMT, CLIPPY, TEST, DOC],
        Commands::Fmt => &[FMT],
        Commands::Clippy => &[CLIPPY],
        Commands::Test => &[TEST],
        Commands::Doc => &[DOC],
        Commands::Build => &[BUILD],
        Commands::Smoke => &[SMOKE_SAVE, SMOKE_LOAD],
    };
    steps.iter().try_for_each(run)
}

fn run(step: &Step) -> Result<()> {
    println!("==> Running {}", step.label);
    let status = Command::new("cargo").args(step.args).status()?;
    if !status.success() {
        anyhow::bail!("{} failed", step.label);
    }
    Ok(())
}
