//! `scope-ui keys` — List the key bindings.

use clap::Args;
use scope_keys::classifier::bindings;

use crate::output::format_binding;

/// Arguments for the `keys` command.
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Print the table as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `keys` command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &KeysArgs) -> anyhow::Result<()> {
    if args.json {
        let rows: Vec<serde_json::Value> = bindings()
            .iter()
            .map(|b| {
                serde_json::json!({
                    "channel": b.channel,
                    "key": b.key,
                    "description": b.description,
                    "blocked_by_search": b.blocked_by_search,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:<8} {:<12} {}", "CHANNEL", "KEY", "ACTION");
    for binding in bindings() {
        println!("{}", format_binding(binding));
    }
    Ok(())
}
