//! Exit code constants for the datsh CLI.
//!
//! - 0: Success (including `rmdir` runs whose individual removals failed)
//! - 1: User error (bad args, invalid state)
//! - 2: Resolution failure (malformed location, unknown archive)
//! - 3: Archive operation failure
//! - 127: Command not found

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid state.
pub const USER_ERROR: i32 = 1;

/// A location or pattern could not be mapped to an archive and path.
pub const RESOLUTION_FAILURE: i32 = 2;

/// The archive rejected an operation.
pub const ARCHIVE_FAILURE: i32 = 3;

/// `which` (or the shell) could not find the named command.
pub const COMMAND_NOT_FOUND: i32 = 127;
