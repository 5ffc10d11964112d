//! Formatted output helpers for CLI commands.

use scope_common::types::Action;
use scope_keys::classifier::Binding;

/// Formats one binding as a table row.
#[must_use]
pub fn format_binding(binding: &Binding) -> String {
    let suffix = if binding.blocked_by_search {
        ""
    } else {
        " (also while searching)"
    };
    format!(
        "{:<8} {:<12} {}{suffix}",
        binding.channel.to_string(),
        binding.key,
        binding.description
    )
}

/// Formats the result of one replayed event as a single line.
#[must_use]
pub fn format_replay_line(line: usize, actions: &[Action], prevent_default: bool) -> String {
    let mut rendered = if actions.is_empty() {
        "none".to_string()
    } else {
        actions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" → ")
    };
    if prevent_default {
        rendered.push_str(" [prevent-default]");
    }
    format!("{line:>4}  {rendered}")
}
