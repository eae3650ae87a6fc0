//! The set of archives the shell knows about.

use super::{ArchiveHandle, LocalArchive};
use crate::config::Config;
use crate::error::ResolutionError;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use std::sync::LazyLock;

static ARCHIVE_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("Invalid archive key regex")
});

/// Check whether a string can be used as an archive key.
pub fn is_valid_key(key: &str) -> bool {
    ARCHIVE_KEY_REGEX.is_match(key)
}

/// Summary of an archive for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveInfo {
    pub key: String,
    pub title: String,
    pub url: String,
}

/// Archives addressable by key.
#[derive(Default)]
pub struct Library {
    archives: BTreeMap<String, ArchiveHandle>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the library from the archives declared in config.
    ///
    /// Relative archive paths are resolved against `home`. Roots are not
    /// checked here; a missing root surfaces as `NotFound` on first use.
    pub fn from_config(config: &Config, home: &Path) -> Self {
        let mut library = Self::new();
        for entry in &config.archives {
            library.insert(Rc::new(LocalArchive::new(
                entry.key.clone(),
                entry.display_title(),
                entry.root(home),
            )));
        }
        library
    }

    /// Add an archive, replacing any archive with the same key.
    pub fn insert(&mut self, archive: ArchiveHandle) {
        self.archives.insert(archive.key().to_string(), archive);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.archives.contains_key(key)
    }

    /// Look up an archive by key.
    pub fn open(&self, key: &str) -> Result<ArchiveHandle, ResolutionError> {
        self.archives
            .get(key)
            .cloned()
            .ok_or_else(|| ResolutionError::UnknownArchive(key.to_string()))
    }

    /// All archives, ordered by key.
    pub fn list(&self) -> Vec<ArchiveInfo> {
        self.archives
            .values()
            .map(|archive| ArchiveInfo {
                key: archive.key().to_string(),
                title: archive.title().to_string(),
                url: archive.url(),
            })
            .collect()
    }
}
