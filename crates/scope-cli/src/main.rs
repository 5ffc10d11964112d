//! # scope-ui
//!
//! Keyboard-driven topology viewer for the terminal, plus tools for
//! inspecting and replaying its key bindings.

mod commands;
mod output;

use std::fs::File;
use std::sync::Mutex;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    commands::execute(cli)
}

/// The interactive UI owns the terminal, so `run` logs to a file or not at
/// all. Every other command logs to stderr.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Run(args) => {
            let Some(path) = &args.log_file else {
                return Ok(());
            };
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
