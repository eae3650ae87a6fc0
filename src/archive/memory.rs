//! In-memory archive for tests.
//!
//! Records every `rmdir` call (including rejected ones) and can be told to
//! deny specific paths.

use super::path as archive_path;
use super::{Archive, DirEntry, EntryKind, RmdirOptions, Stat};
use crate::error::{ArchiveError, ArchiveResult};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RmdirCall {
    pub path: String,
    pub recursive: bool,
}

pub struct MemoryArchive {
    key: String,
    nodes: RefCell<BTreeMap<String, Node>>,
    denied: RefCell<BTreeSet<String>>,
    rmdir_calls: RefCell<Vec<RmdirCall>>,
}

impl MemoryArchive {
    pub fn new(key: &str) -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self {
            key: key.to_string(),
            nodes: RefCell::new(nodes),
            denied: RefCell::new(BTreeSet::new()),
            rmdir_calls: RefCell::new(Vec::new()),
        }
    }

    /// Add directories, creating missing parents.
    pub fn with_dirs(self, dirs: &[&str]) -> Self {
        for dir in dirs {
            self.add_dir_all(&archive_path::normalize(dir));
        }
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        let path = archive_path::normalize(path);
        if let Some(parent) = archive_path::parent(&path) {
            self.add_dir_all(parent);
        }
        self.nodes
            .borrow_mut()
            .insert(path, Node::File(content.to_string()));
        self
    }

    /// Make `rmdir` on `path` fail with `PermissionDenied`.
    pub fn deny(&self, path: &str) {
        self.denied.borrow_mut().insert(path.to_string());
    }

    pub fn rmdir_calls(&self) -> Vec<RmdirCall> {
        self.rmdir_calls.borrow().clone()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn add_dir_all(&self, path: &str) {
        let mut current = String::from("/");
        let mut nodes = self.nodes.borrow_mut();
        for seg in archive_path::segments(path) {
            current = archive_path::join(&current, seg);
            nodes.entry(current.clone()).or_insert(Node::Dir);
        }
    }

    fn node(&self, path: &str) -> ArchiveResult<Node> {
        self.nodes
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| ArchiveError::NotFound(path.to_string()))
    }

    fn children(&self, path: &str) -> Vec<String> {
        self.nodes
            .borrow()
            .keys()
            .filter(|k| k.as_str() != "/" && archive_path::parent(k) == Some(path))
            .cloned()
            .collect()
    }

    fn subtree(&self, path: &str) -> Vec<String> {
        let prefix = archive_path::join(path, "");
        self.nodes
            .borrow()
            .keys()
            .filter(|k| k.as_str() == path || k.starts_with(&prefix))
            .cloned()
            .collect()
    }

    fn stat_node(node: &Node) -> Stat {
        match node {
            Node::Dir => Stat {
                kind: EntryKind::Directory,
                size: 0,
                modified: None,
            },
            Node::File(content) => Stat {
                kind: EntryKind::File,
                size: content.len() as u64,
                modified: None,
            },
        }
    }

    fn ensure_parent_dir(&self, path: &str) -> ArchiveResult<()> {
        let parent = archive_path::parent(path).unwrap_or("/");
        match self.node(parent)? {
            Node::Dir => Ok(()),
            Node::File(_) => Err(ArchiveError::NotADirectory(parent.to_string())),
        }
    }
}

impl Archive for MemoryArchive {
    fn key(&self) -> &str {
        &self.key
    }

    fn title(&self) -> &str {
        &self.key
    }

    fn stat(&self, path: &str) -> ArchiveResult<Stat> {
        Ok(Self::stat_node(&self.node(path)?))
    }

    fn readdir(&self, path: &str) -> ArchiveResult<Vec<DirEntry>> {
        if let Node::File(_) = self.node(path)? {
            return Err(ArchiveError::NotADirectory(path.to_string()));
        }
        let nodes = self.nodes.borrow();
        Ok(self
            .children(path)
            .into_iter()
            .filter_map(|child| {
                let node = nodes.get(&child)?;
                Some(DirEntry {
                    name: archive_path::file_name(&child)?.to_string(),
                    stat: Self::stat_node(node),
                })
            })
            .collect())
    }

    fn mkdir(&self, path: &str) -> ArchiveResult<()> {
        if self.exists(path) {
            return Err(ArchiveError::AlreadyExists(path.to_string()));
        }
        self.ensure_parent_dir(path)?;
        self.nodes.borrow_mut().insert(path.to_string(), Node::Dir);
        Ok(())
    }

    fn rmdir(&self, path: &str, options: RmdirOptions) -> ArchiveResult<()> {
        self.rmdir_calls.borrow_mut().push(RmdirCall {
            path: path.to_string(),
            recursive: options.recursive,
        });

        if self.denied.borrow().contains(path) {
            return Err(ArchiveError::PermissionDenied(path.to_string()));
        }
        if archive_path::is_root(path) {
            return Err(ArchiveError::InvalidPath(path.to_string()));
        }
        if let Node::File(_) = self.node(path)? {
            return Err(ArchiveError::NotADirectory(path.to_string()));
        }
        if !options.recursive && !self.children(path).is_empty() {
            return Err(ArchiveError::NotEmpty(path.to_string()));
        }

        let doomed = self.subtree(path);
        let mut nodes = self.nodes.borrow_mut();
        for key in doomed {
            nodes.remove(&key);
        }
        Ok(())
    }

    fn unlink(&self, path: &str) -> ArchiveResult<()> {
        match self.node(path)? {
            Node::Dir => Err(ArchiveError::IsADirectory(path.to_string())),
            Node::File(_) => {
                self.nodes.borrow_mut().remove(path);
                Ok(())
            }
        }
    }

    fn rename(&self, src: &str, dst: &str) -> ArchiveResult<()> {
        self.copy(src, dst)?;
        let moved = self.subtree(src);
        let mut nodes = self.nodes.borrow_mut();
        for key in moved {
            nodes.remove(&key);
        }
        Ok(())
    }

    fn copy(&self, src: &str, dst: &str) -> ArchiveResult<()> {
        self.node(src)?;
        if self.exists(dst) {
            return Err(ArchiveError::AlreadyExists(dst.to_string()));
        }
        self.ensure_parent_dir(dst)?;

        let copied: Vec<(String, Node)> = {
            let nodes = self.nodes.borrow();
            self.subtree(src)
                .into_iter()
                .filter_map(|key| {
                    let node = nodes.get(&key)?.clone();
                    Some((format!("{}{}", dst, &key[src.len()..]), node))
                })
                .collect()
        };
        self.nodes.borrow_mut().extend(copied);
        Ok(())
    }

    fn read_file(&self, path: &str) -> ArchiveResult<String> {
        match self.node(path)? {
            Node::Dir => Err(ArchiveError::IsADirectory(path.to_string())),
            Node::File(content) => Ok(content),
        }
    }

    fn write_file(&self, path: &str, content: &str) -> ArchiveResult<()> {
        if let Ok(Node::Dir) = self.node(path) {
            return Err(ArchiveError::IsADirectory(path.to_string()));
        }
        self.ensure_parent_dir(path)?;
        self.nodes
            .borrow_mut()
            .insert(path.to_string(), Node::File(content.to_string()));
        Ok(())
    }
}
