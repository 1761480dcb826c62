//! # prlabel
//!
//! Applies labels to pull requests from declarative rules over changed files,
//! branch names, and the pull request title.
//!
//! - `prlabel run` — label pull requests on GitHub (via the `gh` CLI)
//! - `prlabel check` — evaluate rules against a snapshot given on the command line
//! - `prlabel validate` — parse and compile a configuration file

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Label pull requests from path, branch, and title rules.
#[derive(Parser)]
#[command(name = "prlabel", version, about)]
struct Cli {
    /// Log every rule decision (debug level).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label one or more pull requests on GitHub.
    Run(commands::run::RunArgs),
    /// Evaluate rules against a pull request described by flags.
    Check(commands::check::CheckArgs),
    /// Validate a label configuration file.
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match &cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Check(args) => commands::check::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    // Logs go to stderr so stdout carries only results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("prlabel={level}").parse()?)
                .add_directive(format!("prlabel_rules={level}").parse()?)
                .add_directive(format!("prlabel_github={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    Ok(())
}
