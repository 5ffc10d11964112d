//! Configuration model for the scope-ui host.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_METRICS, DEFAULT_TICK_RATE_MS};
use crate::error::{Result, ScopeError};

/// How the router addresses application state in the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressingMode {
    /// State lives in a `#!/...` fragment.
    #[default]
    Hashbang,
    /// State lives in the path.
    Path,
}

/// Configuration handed to the router when it starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// URL addressing mode.
    pub addressing_mode: AddressingMode,
}

/// Where Up-channel events come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyUpMode {
    /// Native release events when the terminal reports them, otherwise
    /// synthesized.
    #[default]
    Auto,
    /// Always request native release events.
    Native,
    /// Emit an Up event right after every Press.
    Synthesized,
}

/// Root configuration for the scope-ui host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Router settings.
    pub router: RouterConfig,
    /// Source of Up-channel events.
    pub key_up: KeyUpMode,
    /// Interval between UI ticks, in milliseconds.
    pub tick_rate_ms: u64,
    /// Metrics available for pinning, in cycling order.
    pub metrics: Vec<String>,
    /// Route fragment applied before startup (e.g. `#!/topology/hosts`).
    pub initial_route: Option<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            router: RouterConfig::default(),
            key_up: KeyUpMode::default(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            metrics: DEFAULT_METRICS.iter().map(ToString::to_string).collect(),
            initial_route: None,
        }
    }
}

impl ScopeConfig {
    /// Loads a configuration file, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ScopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads `path` when given, else the default location when it exists,
    /// else the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be loaded.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match crate::constants::default_config_path() {
            Some(default) if default.is_file() => Self::load(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Config`] on a zero tick rate or a blank metric.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(ScopeError::Config {
                message: "tick_rate_ms must be greater than zero".to_string(),
            });
        }
        if self.metrics.iter().any(|m| m.trim().is_empty()) {
            return Err(ScopeError::Config {
                message: "metric ids must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_use_hashbang_routing() {
        let config = ScopeConfig::default();
        assert_eq!(config.router.addressing_mode, AddressingMode::Hashbang);
        assert_eq!(config.key_up, KeyUpMode::Auto);
        assert_eq!(config.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert!(!config.metrics.is_empty());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"key_up":"synthesized","metrics":["cpu"]}}"#).expect("write");

        let config = ScopeConfig::load(file.path()).expect("load");
        assert_eq!(config.key_up, KeyUpMode::Synthesized);
        assert_eq!(config.metrics, vec!["cpu"]);
        assert_eq!(config.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert_eq!(config.router, RouterConfig::default());
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"tick_rate_ms":0}}"#).expect("write");

        let err = ScopeConfig::load(file.path()).expect_err("should fail");
        assert!(err.to_string().contains("tick_rate_ms"), "got: {err}");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        let err = ScopeConfig::load(&path).expect_err("should fail");
        assert!(matches!(err, ScopeError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn malformed_file_is_a_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{{not json").expect("write");
        let err = ScopeConfig::load(file.path()).expect_err("should fail");
        assert!(matches!(err, ScopeError::Serialization { .. }));
    }
}
