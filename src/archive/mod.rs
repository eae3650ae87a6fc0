//! Archive API consumed by the shell commands.
//!
//! An archive is a versioned, possibly remotely synchronized directory tree.
//! Storage, versioning and sync belong to the provider behind the [`Archive`]
//! trait; the shell only needs the directory and file operations below.
//! [`LocalArchive`] is the provider that ships with datsh.

mod library;
mod local;
pub mod path;

#[cfg(test)]
pub(crate) mod memory;

pub use library::{ArchiveInfo, Library, is_valid_key};
pub use local::LocalArchive;

use crate::error::ArchiveResult;
use chrono::{DateTime, Utc};
use std::fmt;
use std::rc::Rc;

/// URL scheme for archive locations.
pub const ARCHIVE_SCHEME: &str = "dat://";

/// Shared handle to an archive.
///
/// The shell is single-threaded; handles are cloned per resolved target and
/// dropped once the command is done with it.
pub type ArchiveHandle = Rc<dyn Archive>;

/// Kind of an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Metadata for a single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub kind: EntryKind,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

impl Stat {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A directory listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub stat: Stat,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.stat.is_dir()
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Options for [`Archive::rmdir`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RmdirOptions {
    /// Remove the directory and everything below it.
    pub recursive: bool,
}

impl RmdirOptions {
    /// Resolve the `-r` / `--recursive` aliases into one flag.
    pub fn from_flags(short: bool, long: bool) -> Self {
        Self {
            recursive: short || long,
        }
    }
}

/// Directory and file operations on one archive.
///
/// All paths are absolute archive paths (see [`path`]). Every operation may
/// fail independently; callers decide whether a failure is fatal.
pub trait Archive {
    /// Key the archive is addressed by in `dat://<key>` urls.
    fn key(&self) -> &str;

    /// Human readable title.
    fn title(&self) -> &str;

    fn url(&self) -> String {
        format!("{}{}", ARCHIVE_SCHEME, self.key())
    }

    /// URL of a path inside this archive.
    fn url_for(&self, path: &str) -> String {
        if path::is_root(path) {
            self.url()
        } else {
            format!("{}{}", self.url(), path)
        }
    }

    fn stat(&self, path: &str) -> ArchiveResult<Stat>;

    /// List a directory, sorted by name.
    fn readdir(&self, path: &str) -> ArchiveResult<Vec<DirEntry>>;

    /// Create a directory. The parent must exist.
    fn mkdir(&self, path: &str) -> ArchiveResult<()>;

    /// Remove a directory.
    ///
    /// Without `recursive` a non-empty directory is rejected with
    /// [`ArchiveError::NotEmpty`](crate::error::ArchiveError::NotEmpty).
    fn rmdir(&self, path: &str, options: RmdirOptions) -> ArchiveResult<()>;

    /// Remove a file.
    fn unlink(&self, path: &str) -> ArchiveResult<()>;

    /// Move a file or directory. The destination must not exist.
    fn rename(&self, src: &str, dst: &str) -> ArchiveResult<()>;

    /// Copy a file or directory tree. The destination must not exist.
    fn copy(&self, src: &str, dst: &str) -> ArchiveResult<()>;

    fn read_file(&self, path: &str) -> ArchiveResult<String>;

    /// Create or replace a file. The parent directory must exist.
    fn write_file(&self, path: &str, content: &str) -> ArchiveResult<()>;
}

impl fmt::Debug for dyn Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archive").field("key", &self.key()).finish()
    }
}
