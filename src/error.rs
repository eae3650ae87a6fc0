//! Error types for the datsh CLI.
//!
//! Uses thiserror for derive macros. There are three layers:
//! [`ArchiveError`] for operations the archive rejected, [`ResolutionError`]
//! for locations that cannot be mapped onto an archive, and [`ShellError`]
//! which every command returns.

use crate::exit_codes;
use std::io;
use thiserror::Error;

/// An archive rejected an operation on a specific path.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("no such file or directory: {0}")]
    NotFound(String),

    #[error("directory not empty: {0}")]
    NotEmpty(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("is a directory: {0}")]
    IsADirectory(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    /// Classify an I/O error raised while operating on `path`.
    pub fn from_io(path: &str, err: io::Error) -> Self {
        let path = path.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => ArchiveError::NotFound(path),
            io::ErrorKind::DirectoryNotEmpty => ArchiveError::NotEmpty(path),
            io::ErrorKind::NotADirectory => ArchiveError::NotADirectory(path),
            io::ErrorKind::IsADirectory => ArchiveError::IsADirectory(path),
            io::ErrorKind::AlreadyExists => ArchiveError::AlreadyExists(path),
            io::ErrorKind::PermissionDenied => ArchiveError::PermissionDenied(path),
            _ => ArchiveError::Io { path, source: err },
        }
    }
}

/// A location or pattern could not be mapped to an (archive, path) pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("malformed location '{location}': {reason}")]
    Malformed { location: String, reason: String },

    #[error("unknown archive '{0}'")]
    UnknownArchive(String),

    #[error("'{0}' does not name an archive; cd into one or use a dat:// url")]
    NoArchive(String),

    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ResolutionError {
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolutionError::Malformed {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for datsh commands.
#[derive(Error, Debug)]
pub enum ShellError {
    /// User provided invalid arguments or the shell is in an invalid state.
    #[error("{0}")]
    UserError(String),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// The interactive shell was left with `exit <status>`.
    #[error("exited with status {0}")]
    Exit(u8),
}

impl ShellError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::UserError(_) => exit_codes::USER_ERROR,
            ShellError::Resolution(_) => exit_codes::RESOLUTION_FAILURE,
            ShellError::Archive(_) => exit_codes::ARCHIVE_FAILURE,
            ShellError::CommandNotFound(_) => exit_codes::COMMAND_NOT_FOUND,
            ShellError::Exit(status) => i32::from(*status),
        }
    }
}

/// Result type alias for datsh operations.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Result type alias for archive operations.
pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;
