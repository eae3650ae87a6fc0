//! Glob expansion over an archive tree.
//!
//! [`DirMatches`] walks an archive lazily, depth first with entries in name
//! order, and yields directories whose absolute path matches the pattern.
//! Each directory is listed only when the walk actually needs its children,
//! so a consumer that removes a match before asking for the next one never
//! sees the walk descend into it.


use crate::archive::{ArchiveHandle, DirEntry, path as archive_path};
use crate::error::{ArchiveError, ResolutionError};
use globset::{GlobBuilder, GlobMatcher};

const GLOB_CHARS: [char; 4] = ['*', '?', '[', '{'];

/// Check whether a path contains glob syntax.
pub fn is_glob(path: &str) -> bool {
    path.contains(GLOB_CHARS)
}

/// Compile a glob pattern. `*` and `?` never match `/`.
pub fn compile(pattern: &str) -> Result<GlobMatcher, ResolutionError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| ResolutionError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })
}

/// Leading directory of a pattern that contains no glob syntax.
///
/// The walk starts here instead of at the archive root.
fn literal_base(pattern: &str) -> String {
    let literal: Vec<&str> = archive_path::segments(pattern)
        .take_while(|seg| !is_glob(seg))
        .collect();
    format!("/{}", literal.join("/"))
}

/// Deepest directory the pattern can match, or `None` when `**` allows any depth.
fn max_depth(pattern: &str) -> Option<usize> {
    if pattern.contains("**") {
        None
    } else {
        Some(archive_path::depth(pattern))
    }
}

struct Frame {
    dir: String,
    depth: usize,
    entries: std::vec::IntoIter<DirEntry>,
}

/// Lazy iterator over directories in an archive matching a glob.
///
/// Yields `Err` once and stops if listing a directory fails for any reason
/// other than the directory having disappeared.
pub struct DirMatches {
    archive: ArchiveHandle,
    matcher: GlobMatcher,
    max_depth: Option<usize>,
    stack: Vec<Frame>,
    pending: Option<(String, usize)>,
    failed: bool,
}

impl DirMatches {
    pub fn new(archive: ArchiveHandle, pattern: &str) -> Result<Self, ResolutionError> {
        let pattern = archive_path::normalize(pattern);
        let matcher = compile(&pattern)?;
        let base = literal_base(&pattern);
        let base_depth = archive_path::depth(&base);

        log::debug!(
            "expanding {} in {} from {}",
            pattern,
            archive.url(),
            base
        );

        Ok(Self {
            archive,
            max_depth: max_depth(&pattern),
            matcher,
            stack: Vec::new(),
            pending: Some((base, base_depth)),
            failed: false,
        })
    }

    pub fn archive(&self) -> &ArchiveHandle {
        &self.archive
    }

    /// List a directory the walk decided to enter.
    fn descend(&mut self, dir: String, depth: usize) -> Result<(), ArchiveError> {
        match self.archive.readdir(&dir) {
            Ok(entries) => {
                self.stack.push(Frame {
                    dir,
                    depth,
                    entries: entries.into_iter(),
                });
                Ok(())
            }
            // Removed by the consumer, or never there.
            Err(ArchiveError::NotFound(_)) | Err(ArchiveError::NotADirectory(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Iterator for DirMatches {
    type Item = Result<String, ArchiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some((dir, depth)) = self.pending.take()
                && let Err(e) = self.descend(dir, depth)
            {
                self.failed = true;
                return Some(Err(e));
            }

            let frame = self.stack.last_mut()?;
            let Some(entry) = frame.entries.next() else {
                self.stack.pop();
                continue;
            };
            if !entry.is_dir() {
                continue;
            }

            let path = archive_path::join(&frame.dir, &entry.name);
            let depth = frame.depth + 1;

            if self.max_depth.is_none_or(|max| depth < max) {
                self.pending = Some((path.clone(), depth));
            }
            if self.matcher.is_match(&path) {
                return Some(Ok(path));
            }
        }
    }
}
