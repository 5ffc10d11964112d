//! CLI command definitions and dispatch.

pub mod keys;
pub mod replay;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// scope-ui — keyboard-driven topology viewer.
#[derive(Parser, Debug)]
#[command(name = "scope-ui", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON configuration file.
    #[arg(long, global = true, env = "SCOPE_UI_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive terminal UI.
    Run(run::RunArgs),
    /// Classify a JSON-lines key event trace and print the actions.
    Replay(replay::ReplayArgs),
    /// List the key bindings.
    Keys(keys::KeysArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = scope_common::config::ScopeConfig::resolve(cli.config.as_deref())?;
    match cli.command {
        Command::Run(args) => run::execute(args, config),
        Command::Replay(args) => replay::execute(&args, &config),
        Command::Keys(args) => keys::execute(&args),
    }
}
