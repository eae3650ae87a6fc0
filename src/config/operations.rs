//! Config loading and validation.

use super::model::Config;
use crate::archive::is_valid_key;
use crate::error::{Result, ShellError};
use std::collections::BTreeSet;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ShellError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, or defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ShellError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// - archive keys must be valid and unique
    /// - archive paths must be non-empty
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();

        for archive in &self.archives {
            if !is_valid_key(&archive.key) {
                return Err(ShellError::UserError(format!(
                    "config validation failed: invalid archive key '{}'. \
                     Keys may contain letters, digits, '.', '_' and '-', and must start with a letter or digit.",
                    archive.key
                )));
            }
            if !seen.insert(archive.key.as_str()) {
                return Err(ShellError::UserError(format!(
                    "config validation failed: archive key '{}' is declared more than once",
                    archive.key
                )));
            }
            if archive.path.as_os_str().is_empty() {
                return Err(ShellError::UserError(format!(
                    "config validation failed: archive '{}' has an empty path",
                    archive.key
                )));
            }
        }

        Ok(())
    }
}
