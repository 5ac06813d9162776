//! Core data structures for the scanned-tree model.
//!
//! Mirrors the specification's "File record" / "Directory record" / "Entry
//! (polymorphic view)" data model. [`Entry`] is a two-case tagged enum
//! rather than a trait object, per the design note against "heterogeneous
//! collections of pointers with runtime type queries".
//!
//! Nodes never hold parent back-references: the walker builds the tree
//! pre-order, the digest engine reads it post-order, and the digest index
//! only ever holds `Arc` handles into nodes the tree already owns.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::DupError;

/// A single file discovered during the walk.
///
/// `digest` is written exactly once, by the hashing worker that processes
/// this file, and is only read after the worker pool has fully drained.
pub struct FileRecord {
    name: String,
    path: PathBuf,
    depth: usize,
    digest: OnceLock<Result<String, DupError>>,
}

impl FileRecord {
    pub(crate) fn new(name: String, path: PathBuf, depth: usize) -> Arc<Self> {
        Arc::new(FileRecord {
            name,
            path,
            depth,
            digest: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Records the outcome of hashing this file. Called exactly once, by
    /// the worker that owns this file.
    pub fn set_digest(&self, result: Result<String, DupError>) {
        self.digest
            .set(result)
            .unwrap_or_else(|_| panic!("file digest set more than once: {}", self.path.display()));
    }

    /// The hashing outcome, or `None` if hashing hasn't completed yet.
    pub fn digest_result(&self) -> Option<&Result<String, DupError>> {
        self.digest.get()
    }
}

/// A directory discovered during the walk (or the root, created by the
/// Analyzer before the walk begins).
///
/// `files` and `subdirs` are populated only by the single walker thread;
/// they are guarded by a mutex purely so the node can be shared via `Arc`
/// across threads (the hashing workers hold `Arc<FileRecord>` clones, and
/// `Entry::Dir` handles cross into the digest index), not because of any
/// real contention — each is written during the single-threaded walk phase
/// and only ever read afterward.
pub struct DirRecord {
    name: String,
    path: PathBuf,
    depth: usize,
    digest: OnceLock<String>,
    files: Mutex<Vec<Arc<FileRecord>>>,
    subdirs: Mutex<HashMap<String, Arc<DirRecord>>>,
}

impl DirRecord {
    /// Creates the root directory record for one scanned path. Root depth
    /// is always 1.
    pub fn new_root(path: PathBuf) -> Arc<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Arc::new(DirRecord {
            name,
            path,
            depth: 1,
            digest: OnceLock::new(),
            files: Mutex::new(Vec::new()),
            subdirs: Mutex::new(HashMap::new()),
        })
    }

    fn new_child(name: String, path: PathBuf, depth: usize) -> Arc<Self> {
        Arc::new(DirRecord {
            name,
            path,
            depth,
            digest: OnceLock::new(),
            files: Mutex::new(Vec::new()),
            subdirs: Mutex::new(HashMap::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn files(&self) -> Vec<Arc<FileRecord>> {
        self.files.lock().unwrap().clone()
    }

    pub fn subdirs(&self) -> Vec<Arc<DirRecord>> {
        self.subdirs.lock().unwrap().values().cloned().collect()
    }

    pub fn set_digest(&self, digest: String) {
        self.digest
            .set(digest)
            .unwrap_or_else(|_| panic!("directory digest set more than once: {}", self.path.display()));
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.get().map(String::as_str)
    }

    /// Ensures a directory exists at `segments` (relative to `dir`),
    /// creating intermediate directories as needed, and returns it.
    ///
    /// Takes `dir` as an explicit `&Arc<DirRecord>` (rather than as a
    /// method receiver) so the base case can hand back a cheap clone of
    /// the same `Arc` the caller already holds.
    ///
    /// The walker delivers directories in pre-order, so the "create a
    /// directory and still have more than one remaining segment" branch can
    /// never legitimately fire; if it does, the walk violated that
    /// ordering guarantee and this is treated as an invariant failure
    /// rather than silently dropped.
    pub fn add_directory(
        dir: &Arc<DirRecord>,
        segments: &[String],
    ) -> Result<Arc<DirRecord>, DupError> {
        if segments.is_empty() {
            return Ok(dir.clone());
        }

        let existing = dir.subdirs.lock().unwrap().get(&segments[0]).cloned();
        if let Some(child) = existing {
            return DirRecord::add_directory(&child, &segments[1..]);
        }

        let child_path = dir.path.join(&segments[0]);
        let child = DirRecord::new_child(segments[0].clone(), child_path, dir.depth + 1);
        dir.subdirs
            .lock()
            .unwrap()
            .insert(segments[0].clone(), child.clone());

        if segments.len() == 1 {
            Ok(child)
        } else {
            Err(DupError::TreeInvariant(format!(
                "walker delivered {:?} before its parent directory",
                dir.path.join(segments.join(std::path::MAIN_SEPARATOR_STR))
            )))
        }
    }

    /// Places a file at `segments` (relative to `self`), descending into
    /// already-created subdirectories as needed.
    pub fn add_file(&self, segments: &[String]) -> Result<Arc<FileRecord>, DupError> {
        if segments.is_empty() {
            return Err(DupError::TreeInvariant(
                "add_file called with no segments".to_string(),
            ));
        }

        if segments.len() == 1 {
            let file_path = self.path.join(&segments[0]);
            let file = FileRecord::new(segments[0].clone(), file_path, self.depth + 1);
            self.files.lock().unwrap().push(file.clone());
            return Ok(file);
        }

        let child = self.subdirs.lock().unwrap().get(&segments[0]).cloned();
        match child {
            Some(child) => child.add_file(&segments[1..]),
            None => Err(DupError::MissingSubdirForFile(
                self.path.join(segments.join(std::path::MAIN_SEPARATOR_STR)),
            )),
        }
    }
}

/// A polymorphic view over a tree node, used uniformly by the reporter.
#[derive(Clone)]
pub enum Entry {
    File(Arc<FileRecord>),
    Dir(Arc<DirRecord>),
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::File(f) => f.path(),
            Entry::Dir(d) => d.path(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Dir(_))
    }

    pub fn depth(&self) -> usize {
        match self {
            Entry::File(f) => f.depth(),
            Entry::Dir(d) => d.depth(),
        }
    }

    /// The entry's digest. Only ever called on entries already stored in
    /// the digest index, whose digest is guaranteed to be set by
    /// construction.
    pub fn digest(&self) -> String {
        match self {
            Entry::File(f) => match f.digest_result() {
                Some(Ok(d)) => d.clone(),
                _ => panic!("digest() called on a file with no successful digest"),
            },
            Entry::Dir(d) => d
                .digest()
                .unwrap_or_else(|| panic!("digest() called on a directory with no digest"))
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_directory_creates_nested() {
        let root = DirRecord::new_root(PathBuf::from("root"));
        let sub =
            DirRecord::add_directory(&root, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(sub.path(), Path::new("root/a/b"));
        assert_eq!(sub.depth(), 3);
    }

    #[test]
    fn test_add_directory_idempotent_for_existing_parent() {
        let root = DirRecord::new_root(PathBuf::from("root"));
        DirRecord::add_directory(&root, &["a".to_string()]).unwrap();
        let a_again = DirRecord::add_directory(&root, &["a".to_string()]).unwrap();
        assert_eq!(a_again.path(), Path::new("root/a"));
        assert_eq!(root.subdirs().len(), 1);
    }

    #[test]
    fn test_add_file_at_root() {
        let root = DirRecord::new_root(PathBuf::from("root"));
        let file = root.add_file(&["leaf.txt".to_string()]).unwrap();
        assert_eq!(file.path(), Path::new("root/leaf.txt"));
        assert_eq!(file.depth(), 2);
    }

    #[test]
    fn test_add_file_in_subdir() {
        let root = DirRecord::new_root(PathBuf::from("root"));
        DirRecord::add_directory(&root, &["sub".to_string()]).unwrap();
        let file = root
            .add_file(&["sub".to_string(), "leaf.txt".to_string()])
            .unwrap();
        assert_eq!(file.path(), Path::new("root/sub/leaf.txt"));
        assert_eq!(file.depth(), 3);
    }

    #[test]
    fn test_add_file_missing_subdir_fails() {
        let root = DirRecord::new_root(PathBuf::from("root"));
        let result = root.add_file(&["missing".to_string(), "leaf.txt".to_string()]);
        assert!(matches!(result, Err(DupError::MissingSubdirForFile(_))));
    }

    #[test]
    fn test_depth_invariant_root_is_one() {
        let root = DirRecord::new_root(PathBuf::from("root"));
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn test_entry_digest_for_file() {
        let root = DirRecord::new_root(PathBuf::from("root"));
        let file = root.add_file(&["leaf.txt".to_string()]).unwrap();
        file.set_digest(Ok("abc123".to_string()));
        let entry = Entry::File(file);
        assert_eq!(entry.digest(), "abc123");
        assert!(!entry.is_directory());
    }

    #[test]
    fn test_entry_digest_for_directory() {
        let root = DirRecord::new_root(PathBuf::from("root"));
        root.set_digest("dirdigest".to_string());
        let entry = Entry::Dir(root);
        assert_eq!(entry.digest(), "dirdigest");
        assert!(entry.is_directory());
    }
}
