//! Filesystem walker: the boundary between on-disk state and the
//! in-memory tree model.
//!
//! `walkdir::WalkDir` is treated as trusted input, exactly as the design
//! frames it: every yielded entry is assumed to describe the filesystem
//! accurately, and the only judgment this module exercises is classifying
//! file types and enforcing the root-prefix invariant. Reading file bytes
//! is the Hasher's job, not this one.

use std::path::{Path, MAIN_SEPARATOR};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::error::DupError;
use crate::hasher::HashingPool;
use crate::tree::DirRecord;

/// Walks `canonical_root` and populates `root`'s tree, enqueueing every
/// regular file onto `pool` for hashing.
///
/// `canonical_root` must already have passed through
/// [`crate::path_canon::canonicalize_path`] and been turned back into a
/// `Path` by the caller; this function performs no further string cleanup.
///
/// The first entry `walkdir` yields is the root itself, which was already
/// created by the caller before the walk began, so it's skipped here.
/// Every subsequent per-entry walk error aborts the scan for this root
/// immediately — there is no retry.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use dupdigest::hasher::HashingPool;
/// use dupdigest::tree::DirRecord;
/// use dupdigest::walker::walk_root;
///
/// let root_path = Path::new("/tmp/data");
/// let root = DirRecord::new_root(root_path.to_path_buf());
/// let pool = HashingPool::spawn(None);
/// walk_root(&root, root_path, &pool).expect("walk failed");
/// pool.close_and_join();
/// ```
///
/// # Errors
///
/// Returns a [`DupError`] if `walkdir` reports a per-entry error, if an
/// entry is neither a regular file nor a directory, or if an entry somehow
/// falls outside `canonical_root`.
pub fn walk_root(
    root: &Arc<DirRecord>,
    canonical_root: &Path,
    pool: &HashingPool,
) -> Result<(), DupError> {
    for entry in WalkDir::new(canonical_root).follow_links(false) {
        let entry = entry?;

        if entry.path() == canonical_root {
            continue;
        }

        let segments = relative_segments(canonical_root, entry.path())?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            DirRecord::add_directory(root, &segments)?;
        } else if file_type.is_file() {
            let file = root.add_file(&segments)?;
            pool.enqueue(file);
        } else {
            return Err(DupError::IrregularEntry(entry.path().to_path_buf()));
        }
    }

    Ok(())
}

/// Strips `root` from `path` and splits the remainder into segments,
/// failing if `path` does not actually fall under `root`.
fn relative_segments(root: &Path, path: &Path) -> Result<Vec<String>, DupError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| DupError::PathOutsideRoots(path.to_path_buf()))?;

    Ok(relative
        .to_string_lossy()
        .split(MAIN_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_relative_segments_single_level() {
        let root = PathBuf::from("/tmp/root");
        let path = PathBuf::from("/tmp/root/leaf.txt");
        let segments = relative_segments(&root, &path).unwrap();
        assert_eq!(segments, vec!["leaf.txt".to_string()]);
    }

    #[test]
    fn test_relative_segments_nested() {
        let root = PathBuf::from("/tmp/root");
        let path = PathBuf::from("/tmp/root/a/b/leaf.txt");
        let segments = relative_segments(&root, &path).unwrap();
        assert_eq!(
            segments,
            vec!["a".to_string(), "b".to_string(), "leaf.txt".to_string()]
        );
    }

    #[test]
    fn test_relative_segments_outside_root_fails() {
        let root = PathBuf::from("/tmp/root");
        let path = PathBuf::from("/tmp/elsewhere/leaf.txt");
        let result = relative_segments(&root, &path);
        assert!(matches!(result, Err(DupError::PathOutsideRoots(_))));
    }
}
