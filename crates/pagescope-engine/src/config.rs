//! Engine configuration
//!
//! Loaded from `.pagescope/config.toml` under a caller-provided base
//! directory; a missing file falls back to defaults so embedding the engine
//! requires no setup. Every field has a serde default, so partial files
//! only override what they name.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use pagescope_core::environment::DEFAULT_MEMORY_CAPACITY;
use pagescope_core::failure::DEFAULT_FAILURE_CAPACITY;
use pagescope_core::log::{DEFAULT_LOG_CAPACITY, DEFAULT_MAX_MESSAGE_LEN};
use pagescope_core::network::DEFAULT_NETWORK_CAPACITY;
use pagescope_core::prelude::*;

/// Default sampling period in milliseconds.
pub const DEFAULT_SAMPLE_PERIOD_MS: u64 = 2000;

/// Minimum sampling period. Each tick walks the whole document tree, so
/// faster periods are clamped here rather than honored.
pub const MIN_SAMPLE_PERIOD_MS: u64 = 250;

/// Config directory name, relative to the caller-provided base directory.
pub const CONFIG_DIR: &str = ".pagescope";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

// ── BufferCapacities ──────────────────────────────────────────────────────────

/// Capacities of the four record buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BufferCapacities {
    #[serde(default = "default_log_capacity")]
    pub log: usize,
    #[serde(default = "default_network_capacity")]
    pub network: usize,
    #[serde(default = "default_failure_capacity")]
    pub failure: usize,
    #[serde(default = "default_memory_capacity")]
    pub memory: usize,
}

impl Default for BufferCapacities {
    fn default() -> Self {
        Self {
            log: default_log_capacity(),
            network: default_network_capacity(),
            failure: default_failure_capacity(),
            memory: default_memory_capacity(),
        }
    }
}

fn default_log_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

fn default_network_capacity() -> usize {
    DEFAULT_NETWORK_CAPACITY
}

fn default_failure_capacity() -> usize {
    DEFAULT_FAILURE_CAPACITY
}

fn default_memory_capacity() -> usize {
    DEFAULT_MEMORY_CAPACITY
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Engine settings (`.pagescope/config.toml`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Sampling period in milliseconds. Clamped to
    /// [`MIN_SAMPLE_PERIOD_MS`] at use.
    #[serde(default = "default_sample_period_ms")]
    pub sample_period_ms: u64,

    /// Record buffer capacities.
    #[serde(default)]
    pub buffers: BufferCapacities,

    /// Upper bound on a captured log message, in bytes.
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_period_ms: default_sample_period_ms(),
            buffers: BufferCapacities::default(),
            max_message_len: default_max_message_len(),
        }
    }
}

fn default_sample_period_ms() -> u64 {
    DEFAULT_SAMPLE_PERIOD_MS
}

fn default_max_message_len() -> usize {
    DEFAULT_MAX_MESSAGE_LEN
}

impl EngineConfig {
    /// The effective sampling period, with the minimum clamp applied.
    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(self.sample_period_ms.max(MIN_SAMPLE_PERIOD_MS))
    }

    /// Load configuration from `<base_dir>/.pagescope/config.toml`.
    ///
    /// A missing file is not an error: defaults are returned so the engine
    /// can always start.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read, or
    /// [`Error::ConfigInvalid`] if it is not valid TOML.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_DIR).join(CONFIG_FILE);
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Load configuration from the user's home directory
    /// (`~/.pagescope/config.toml`), with the same missing-file fallback as
    /// [`EngineConfig::load`].
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::load`].
    pub fn load_default() -> Result<Self> {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::load(&base)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if the text is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config_invalid(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.sample_period_ms, 2000);
        assert_eq!(config.buffers.log, 100);
        assert_eq!(config.buffers.network, 50);
        assert_eq!(config.buffers.failure, 50);
        assert_eq!(config.buffers.memory, 60);
        assert_eq!(config.max_message_len, 2000);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_named_fields_only() {
        let config = EngineConfig::from_toml_str(
            r#"
            sample_period_ms = 5000

            [buffers]
            log = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.sample_period_ms, 5000);
        assert_eq!(config.buffers.log, 200);
        // Unnamed fields keep their defaults.
        assert_eq!(config.buffers.network, 50);
        assert_eq!(config.max_message_len, 2000);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = EngineConfig::from_toml_str("sample_period_ms = \"fast\"");
        assert!(matches!(
            result,
            Err(Error::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_sample_period_clamps_to_minimum() {
        let config = EngineConfig {
            sample_period_ms: 10,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.sample_period(),
            Duration::from_millis(MIN_SAMPLE_PERIOD_MS)
        );

        let config = EngineConfig::default();
        assert_eq!(config.sample_period(), Duration::from_millis(2000));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(dir.path()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join(CONFIG_FILE), "sample_period_ms = 3000").unwrap();

        let config = EngineConfig::load(dir.path()).unwrap();
        assert_eq!(config.sample_period_ms, 3000);
    }
}
