//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the shell.
///
/// This struct represents the contents of `<home>/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Print the new directory listing after `cd`.
    #[serde(default = "default_true")]
    pub ls_after_cd: bool,

    /// Show dot entries in `ls` without `-a`.
    #[serde(default)]
    pub show_hidden: bool,

    /// Archives known to the shell, in the order they were declared.
    #[serde(default)]
    pub archives: Vec<ArchiveConfig>,
}

/// One archive entry in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Key used in `dat://<key>` urls and as the first path segment at home.
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Directory holding the archive tree, relative to the datsh home
    /// unless absolute.
    pub path: PathBuf,
}

impl ArchiveConfig {
    /// Title to display, falling back to the key.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }

    /// Absolute root directory of the archive.
    pub fn root(&self, home: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            home.join(&self.path)
        }
    }
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ls_after_cd: default_true(),
            show_hidden: false,
            archives: Vec::new(),
        }
    }
}
