//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::DEFAULT_CONFIG_FILE;
use crate::error::{KvLockError, Result};
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(KvLockError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            KvLockError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist. Without one, `kvlock.yaml` in the current
    /// directory is used if present, otherwise defaults apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document parses as null, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| KvLockError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            KvLockError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `poll_interval_ms` must be positive
    /// - `stale_minutes` must be positive
    /// - `lock_dir` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(KvLockError::ConfigError(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.stale_minutes == 0 {
            return Err(KvLockError::ConfigError(
                "stale_minutes must be greater than 0".to_string(),
            ));
        }

        if self.lock_dir.as_os_str().is_empty() {
            return Err(KvLockError::ConfigError(
                "lock_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
