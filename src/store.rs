//! Installed command storage.
//!
//! A small persistent key-value store mapping command names to the archive
//! url of their script, kept in `<home>/commands.json`.

use crate::error::{Result, ShellError};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A command installed from an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledCommand {
    pub url: String,
    pub installed_at: DateTime<Utc>,
}

impl InstalledCommand {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            installed_at: Utc::now(),
        }
    }
}

/// All installed commands, keyed by name.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CommandStore {
    #[serde(default)]
    commands: BTreeMap<String, InstalledCommand>,
}

impl CommandStore {
    /// Load the store; a missing file is an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ShellError::UserError(format!(
                "failed to read command store '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ShellError::UserError(format!(
                "failed to parse command store '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            ShellError::UserError(format!("failed to serialize command store: {}", e))
        })?;
        atomic_write_file(path, &json).map_err(|e| {
            ShellError::UserError(format!(
                "failed to write command store '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn get(&self, name: &str) -> Option<&InstalledCommand> {
        self.commands.get(name)
    }

    /// Install or replace a command.
    pub fn insert(&mut self, name: impl Into<String>, command: InstalledCommand) {
        self.commands.insert(name.into(), command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
