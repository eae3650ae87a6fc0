//! Archive provider backed by a directory on the local filesystem.
//!
//! Symbolic links inside the tree are never followed. A link is listed as a
//! plain entry, and a path that passes through one is rejected, so every
//! operation stays under `root`.

use super::path as archive_path;
use super::{Archive, DirEntry, EntryKind, RmdirOptions, Stat};
use crate::error::{ArchiveError, ArchiveResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An archive whose tree lives under `root` on disk.
#[derive(Debug, Clone)]
pub struct LocalArchive {
    key: String,
    title: String,
    root: PathBuf,
}

impl LocalArchive {
    pub fn new(key: impl Into<String>, title: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            root: root.into(),
        }
    }

    /// Map an archive path onto the host filesystem.
    ///
    /// `..` is rejected, and so is a symlink anywhere before the final
    /// component.
    fn fs_path(&self, path: &str) -> ArchiveResult<PathBuf> {
        let mut out = self.root.clone();
        let mut below_root = false;
        for seg in archive_path::segments(path) {
            match seg {
                "." => continue,
                ".." => return Err(ArchiveError::InvalidPath(path.to_string())),
                _ => {}
            }
            if below_root && is_symlink(&out) {
                return Err(ArchiveError::InvalidPath(format!(
                    "{} (crosses a symbolic link)",
                    path
                )));
            }
            out.push(seg);
            below_root = true;
        }
        Ok(out)
    }

    /// Metadata of the entry itself; a symlink is reported as a symlink.
    fn metadata(&self, path: &str) -> ArchiveResult<(PathBuf, fs::Metadata)> {
        let fs_path = self.fs_path(path)?;
        let meta = fs::symlink_metadata(&fs_path).map_err(|e| ArchiveError::from_io(path, e))?;
        Ok((fs_path, meta))
    }

    fn ensure_absent(&self, path: &str) -> ArchiveResult<PathBuf> {
        let fs_path = self.fs_path(path)?;
        if fs::symlink_metadata(&fs_path).is_ok() {
            return Err(ArchiveError::AlreadyExists(path.to_string()));
        }
        Ok(fs_path)
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}

fn symlink_error(path: &str) -> ArchiveError {
    ArchiveError::InvalidPath(format!("{} (is a symbolic link)", path))
}

/// Build a `Stat` without following links; a symlink is never a directory.
fn stat_from(meta: &fs::Metadata) -> Stat {
    Stat {
        kind: if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        },
        size: if meta.is_dir() { 0 } else { meta.len() },
        modified: meta.modified().ok().map(DateTime::<Utc>::from),
    }
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(src)?.file_type();
    if file_type.is_symlink() {
        log::warn!("not copying symbolic link {}", src.display());
        Ok(())
    } else if file_type.is_dir() {
        fs::create_dir(dst)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            copy_tree(&entry.path(), &dst.join(entry.file_name()))?;
        }
        Ok(())
    } else {
        fs::copy(src, dst).map(|_| ())
    }
}

fn is_inside(path: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    path.strip_prefix(dir)
        .is_some_and(|rest| rest.starts_with('/'))
}

impl Archive for LocalArchive {
    fn key(&self) -> &str {
        &self.key
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn stat(&self, path: &str) -> ArchiveResult<Stat> {
        let (_, meta) = self.metadata(path)?;
        Ok(stat_from(&meta))
    }

    fn readdir(&self, path: &str) -> ArchiveResult<Vec<DirEntry>> {
        let (fs_path, meta) = self.metadata(path)?;
        if !meta.is_dir() {
            return Err(ArchiveError::NotADirectory(path.to_string()));
        }

        let read = fs::read_dir(&fs_path).map_err(|e| ArchiveError::from_io(path, e))?;
        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| ArchiveError::from_io(path, e))?;
            let name = entry.file_name().to_string_lossy().to_string();
            // Entries can disappear between listing and stat.
            let meta = match fs::symlink_metadata(entry.path()) {
                Ok(meta) => meta,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(ArchiveError::from_io(&archive_path::join(path, &name), e)),
            };
            entries.push(DirEntry {
                name,
                stat: stat_from(&meta),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn mkdir(&self, path: &str) -> ArchiveResult<()> {
        let fs_path = self.ensure_absent(path)?;
        fs::create_dir(&fs_path).map_err(|e| ArchiveError::from_io(path, e))
    }

    fn rmdir(&self, path: &str, options: RmdirOptions) -> ArchiveResult<()> {
        if archive_path::is_root(path) {
            return Err(ArchiveError::InvalidPath(format!(
                "{} (refusing to remove the archive root)",
                path
            )));
        }

        let (fs_path, meta) = self.metadata(path)?;
        if !meta.is_dir() {
            return Err(ArchiveError::NotADirectory(path.to_string()));
        }

        if options.recursive {
            fs::remove_dir_all(&fs_path).map_err(|e| ArchiveError::from_io(path, e))
        } else {
            let mut children = fs::read_dir(&fs_path).map_err(|e| ArchiveError::from_io(path, e))?;
            if children.next().is_some() {
                return Err(ArchiveError::NotEmpty(path.to_string()));
            }
            fs::remove_dir(&fs_path).map_err(|e| ArchiveError::from_io(path, e))
        }
    }

    /// Remove a file. A symlink is removed itself, never its target.
    fn unlink(&self, path: &str) -> ArchiveResult<()> {
        let (fs_path, meta) = self.metadata(path)?;
        if meta.is_dir() {
            return Err(ArchiveError::IsADirectory(path.to_string()));
        }
        fs::remove_file(&fs_path).map_err(|e| ArchiveError::from_io(path, e))
    }

    fn rename(&self, src: &str, dst: &str) -> ArchiveResult<()> {
        if archive_path::is_root(src) {
            return Err(ArchiveError::InvalidPath(src.to_string()));
        }
        if is_inside(dst, src) {
            return Err(ArchiveError::InvalidPath(format!(
                "{} (cannot move a directory into itself)",
                dst
            )));
        }
        let (src_fs, _) = self.metadata(src)?;
        let dst_fs = self.ensure_absent(dst)?;
        fs::rename(&src_fs, &dst_fs).map_err(|e| ArchiveError::from_io(dst, e))
    }

    fn copy(&self, src: &str, dst: &str) -> ArchiveResult<()> {
        if is_inside(dst, src) {
            return Err(ArchiveError::InvalidPath(format!(
                "{} (cannot copy a directory into itself)",
                dst
            )));
        }
        let (src_fs, _) = self.metadata(src)?;
        let dst_fs = self.ensure_absent(dst)?;
        copy_tree(&src_fs, &dst_fs).map_err(|e| ArchiveError::from_io(dst, e))
    }

    fn read_file(&self, path: &str) -> ArchiveResult<String> {
        let (fs_path, meta) = self.metadata(path)?;
        if meta.file_type().is_symlink() {
            return Err(symlink_error(path));
        }
        if meta.is_dir() {
            return Err(ArchiveError::IsADirectory(path.to_string()));
        }
        fs::read_to_string(&fs_path).map_err(|e| ArchiveError::from_io(path, e))
    }

    fn write_file(&self, path: &str, content: &str) -> ArchiveResult<()> {
        if archive_path::is_root(path) {
            return Err(ArchiveError::IsADirectory(path.to_string()));
        }
        let fs_path = self.fs_path(path)?;
        if let Ok(meta) = fs::symlink_metadata(&fs_path) {
            if meta.file_type().is_symlink() {
                return Err(symlink_error(path));
            }
            if meta.is_dir() {
                return Err(ArchiveError::IsADirectory(path.to_string()));
            }
        }

        let parent = archive_path::parent(path).unwrap_or("/");
        let (_, parent_meta) = self.metadata(parent)?;
        if !parent_meta.is_dir() {
            return Err(ArchiveError::NotADirectory(parent.to_string()));
        }

        crate::fs::atomic_write_file(&fs_path, content).map_err(|e| ArchiveError::from_io(path, e))
    }
}
