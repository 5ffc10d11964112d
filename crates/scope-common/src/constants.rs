//! System-wide constants and default paths.

use std::path::PathBuf;

/// Application name used in logs and the config directory.
pub const APP_NAME: &str = "scope-ui";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "scope-ui";

/// File name of the user configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default interval between UI ticks, in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Topology requested when no route names one.
pub const DEFAULT_TOPOLOGY: &str = "containers";

/// Prefix of hashbang-style route fragments.
pub const HASHBANG_PREFIX: &str = "#!/";

/// Metrics offered for pinning when the configuration lists none.
pub const DEFAULT_METRICS: &[&str] = &[
    "host_cpu_usage_percent",
    "host_mem_usage_bytes",
    "load1",
    "process_cpu_usage_percent",
];

/// Tracing target for key-event diagnostics.
pub const KEY_PRESS_TARGET: &str = "scope::key_press";

/// Returns `$HOME/.scope-ui/config.json`, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .map(|home| {
            PathBuf::from(home)
                .join(format!(".{APP_NAME}"))
                .join(CONFIG_FILE_NAME)
        })
}
