//! Filesystem utilities for datsh.
//!
//! Atomic writes for state files and local archive content.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file};
