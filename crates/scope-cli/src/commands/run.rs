//! `scope-ui run` — Launch the interactive terminal UI.

use std::path::PathBuf;

use clap::Args;
use scope_common::config::ScopeConfig;
use scope_tui::runner::{self, RunOptions};

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Route fragment to start from (e.g. `#!/topology/hosts`).
    #[arg(long)]
    pub route: Option<String>,

    /// Open a terminal pipe with this name at startup.
    #[arg(long)]
    pub terminal: Option<String>,

    /// Write logs to this file (the UI owns stdout and stderr).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Executes the `run` command.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven.
pub fn execute(args: RunArgs, mut config: ScopeConfig) -> anyhow::Result<()> {
    if args.route.is_some() {
        config.initial_route = args.route;
    }
    tracing::info!(route = ?config.initial_route, key_up = ?config.key_up, "starting UI");
    runner::run(
        &config,
        &RunOptions {
            terminal: args.terminal,
        },
    )?;
    Ok(())
}
