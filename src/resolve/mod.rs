//! Location resolution.
//!
//! Maps the strings users type (`dat://blog/posts`, `~/blog`, `/posts`,
//! `../drafts/*`) plus an explicit [`Cwd`] onto an archive and a normalized
//! absolute path inside it.
//!
//! Every location is first lifted into one virtual tree where home is `/`
//! and each archive is mounted at `/<key>`. Normalizing in that tree makes
//! `..` from an archive root land back at home, which is what `cd ..` does.


use crate::archive::{ARCHIVE_SCHEME, ArchiveHandle, Library, is_valid_key, path as archive_path};
use crate::error::ResolutionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The current working directory: home, or a path inside one archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cwd {
    /// Archive key, `None` at home.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,

    /// Absolute path inside the archive (`/` at home).
    #[serde(default = "root_path")]
    pub path: String,
}

fn root_path() -> String {
    "/".to_string()
}

impl Cwd {
    pub fn home() -> Self {
        Self {
            archive: None,
            path: root_path(),
        }
    }

    pub fn in_archive(key: impl Into<String>, path: &str) -> Self {
        Self {
            archive: Some(key.into()),
            path: archive_path::normalize(path),
        }
    }

    pub fn is_home(&self) -> bool {
        self.archive.is_none()
    }

    /// Path in the virtual tree where archives are mounted under `/<key>`.
    fn virtual_path(&self) -> String {
        match &self.archive {
            None => "/".to_string(),
            Some(key) => archive_path::normalize(&format!("/{}{}", key, self.path)),
        }
    }
}

impl Default for Cwd {
    fn default() -> Self {
        Self::home()
    }
}

impl From<Location> for Cwd {
    fn from(location: Location) -> Self {
        Self {
            archive: location.archive,
            path: location.path,
        }
    }
}

impl fmt::Display for Cwd {
    /// `~` at home, `~/<key>/<path>` inside an archive.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.archive {
            None => write!(f, "~"),
            Some(key) if archive_path::is_root(&self.path) => write!(f, "~/{}", key),
            Some(key) => write!(f, "~/{}{}", key, self.path),
        }
    }
}

/// A parsed location: an optional archive key and a normalized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub archive: Option<String>,
    pub path: String,
}

impl Location {
    fn from_virtual(virtual_path: &str) -> Self {
        let normalized = archive_path::normalize(virtual_path);
        let mut segments = archive_path::segments(&normalized);
        match segments.next() {
            None => Self {
                archive: None,
                path: "/".to_string(),
            },
            Some(key) => {
                let rest: Vec<&str> = segments.collect();
                Self {
                    archive: Some(key.to_string()),
                    path: format!("/{}", rest.join("/")),
                }
            }
        }
    }

    /// A path inside a named archive; `..` stops at the archive root.
    fn inside(key: &str, path: &str) -> Self {
        Self {
            archive: Some(key.to_string()),
            path: archive_path::normalize(path),
        }
    }

    pub fn is_home(&self) -> bool {
        self.archive.is_none()
    }
}

/// Parse a location string relative to `cwd`.
///
/// - `dat://<key>[/path]` names an archive directly
/// - `~` is home and `~/<key>/path` is a path inside `<key>`
/// - `/path` is absolute inside the cwd archive (at home, the first segment is the key)
/// - anything else is relative to `cwd`; `..` above an archive root reaches home
pub fn resolve_location(input: &str, cwd: &Cwd) -> Result<Location, ResolutionError> {
    let input = input.trim();

    let location = if let Some(rest) = input.strip_prefix(ARCHIVE_SCHEME) {
        let (key, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };
        if key.is_empty() {
            return Err(ResolutionError::malformed(input, "missing archive key"));
        }
        if !is_valid_key(key) {
            return Err(ResolutionError::malformed(
                input,
                format!("invalid archive key '{}'", key),
            ));
        }
        Location::inside(key, path)
    } else if input.contains("://") {
        return Err(ResolutionError::malformed(input, "unsupported protocol"));
    } else if input == "~" {
        Location::from_virtual("/")
    } else if let Some(rest) = input.strip_prefix("~/") {
        Location::from_virtual(&format!("/{}", rest))
    } else if input.starts_with('/') {
        match &cwd.archive {
            Some(key) => Location::inside(key, input),
            None => Location::from_virtual(input),
        }
    } else {
        Location::from_virtual(&archive_path::join(&cwd.virtual_path(), input))
    };

    log::debug!("resolved '{}' from {} to {:?}", input, cwd, location);
    Ok(location)
}

/// A pattern resolved to a concrete archive.
///
/// `path` is normalized but may still contain glob syntax.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub archive: ArchiveHandle,
    pub path: String,
}

impl ResolvedTarget {
    pub fn url(&self) -> String {
        self.archive.url_for(&self.path)
    }
}

/// Resolves locations against a library and an explicit cwd.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    library: &'a Library,
    cwd: &'a Cwd,
}

impl<'a> Resolver<'a> {
    pub fn new(library: &'a Library, cwd: &'a Cwd) -> Self {
        Self { library, cwd }
    }

    /// Parse a location that may be home.
    pub fn locate(&self, input: &str) -> Result<Location, ResolutionError> {
        resolve_location(input, self.cwd)
    }

    /// Resolve a pattern to an archive and a path inside it.
    ///
    /// Fails when the pattern is empty, names home, or names an archive the
    /// library does not know.
    pub fn resolve(&self, pattern: &str) -> Result<ResolvedTarget, ResolutionError> {
        if pattern.trim().is_empty() {
            return Err(ResolutionError::malformed(pattern, "empty location"));
        }

        let location = self.locate(pattern)?;
        let key = location
            .archive
            .ok_or_else(|| ResolutionError::NoArchive(pattern.to_string()))?;
        let archive = self.library.open(&key)?;

        Ok(ResolvedTarget {
            archive,
            path: location.path,
        })
    }

    /// Resolve the cwd itself, failing at home.
    pub fn resolve_cwd(&self) -> Result<ResolvedTarget, ResolutionError> {
        let key = self
            .cwd
            .archive
            .as_deref()
            .ok_or_else(|| ResolutionError::NoArchive("~".to_string()))?;
        Ok(ResolvedTarget {
            archive: self.library.open(key)?,
            path: self.cwd.path.clone(),
        })
    }
}
