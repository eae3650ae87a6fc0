//! Archive path helpers.
//!
//! Archive paths are `/`-separated and absolute (`/` is the archive root).
//! They are plain strings rather than `PathBuf`s because they never touch
//! the host filesystem directly and always use forward slashes.

/// Iterate over the non-empty components of a path.
pub fn segments(path: &str) -> impl DoubleEndedIterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Normalize a path to absolute form, collapsing `.` and `..`.
///
/// `..` at the root stays at the root.
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for seg in segments(path) {
        match seg {
            "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Join a child name onto a directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Parent directory of a path, or `None` for the root.
pub fn parent(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.rfind('/') {
        Some(0) => Some("/"),
        Some(idx) => Some(&trimmed[..idx]),
        None => Some("/"),
    }
}

/// Final component of a path, or `None` for the root.
pub fn file_name(path: &str) -> Option<&str> {
    segments(path).next_back()
}

/// True for the archive root.
pub fn is_root(path: &str) -> bool {
    segments(path).next().is_none()
}

/// Number of components below the root.
pub fn depth(path: &str) -> usize {
    segments(path).count()
}
