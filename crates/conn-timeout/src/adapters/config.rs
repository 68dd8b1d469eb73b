//! # Configuration Adapters
//!
//! [`ConfigProvider`] implementations. The in-memory provider is always
//! available; TOML file loading sits behind the `config` feature.

use crate::domain::TimeoutConfig;
use crate::ports::ConfigProvider;

// =============================================================================
// STATIC PROVIDER
// =============================================================================

/// [`ConfigProvider`] returning a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: TimeoutConfig,
}

impl StaticConfigProvider {
    /// Wrap a configuration value.
    pub fn new(config: TimeoutConfig) -> Self {
        Self { config }
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn timeout_config(&self) -> TimeoutConfig {
        self.config.clone()
    }
}

// =============================================================================
// TOML PROVIDER
// =============================================================================

/// Configuration loading failure.
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents are not valid TOML for [`TimeoutConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// [`ConfigProvider`] loading a [`TimeoutConfig`] from a TOML file.
///
/// The file is read once at construction; missing keys fall back to their
/// defaults.
///
/// ```toml
/// idle_timeout_secs = 30
/// sweep_interval_secs = 5
/// max_connections = 10000
/// ```
#[cfg(feature = "config")]
#[derive(Debug, Clone)]
pub struct TomlConfigProvider {
    config: TimeoutConfig,
}

#[cfg(feature = "config")]
impl TomlConfigProvider {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(raw)?;
        Ok(Self { config })
    }
}

#[cfg(feature = "config")]
impl ConfigProvider for TomlConfigProvider {
    fn timeout_config(&self) -> TimeoutConfig {
        self.config.clone()
    }
}
