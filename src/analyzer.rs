//! Analyzer: the orchestrator that ties every other component together.
//!
//! Given the raw path strings from the command line, runs the whole
//! pipeline — canonicalize, walk, hash, digest, report — and returns the
//! finished removal script.

use std::path::PathBuf;
use std::sync::Arc;

use crate::digest::compute_subtree_digest;
use crate::error::DupError;
use crate::hasher::HashingPool;
use crate::index::DigestIndex;
use crate::path_canon::canonicalize_path;
use crate::reporter::generate_script;
use crate::tree::DirRecord;
use crate::walker::walk_root;

/// Runs the full scan over `paths` and returns the generated removal
/// script. `threads` overrides the default hashing worker count.
///
/// The hashing pool is always closed and joined before a walk error is
/// propagated, even if the walk for some root failed partway through —
/// otherwise a walker error would leave worker threads parked forever on
/// a channel nobody will ever close.
///
/// # Examples
///
/// ```no_run
/// use dupdigest::analyzer::analyze;
///
/// let script = analyze(&["/tmp/data".to_string()], None).expect("scan failed");
/// print!("{script}");
/// ```
///
/// # Errors
///
/// Returns a [`DupError`] if any root can't be walked (missing path,
/// permission denied, an irregular filesystem entry), if the tree-insert
/// invariant is violated, or if a hashing failure surfaces during the
/// subtree-digest pass.
pub fn analyze(paths: &[String], threads: Option<usize>) -> Result<String, DupError> {
    let pool = HashingPool::spawn(threads);

    let walk_result = walk_all_roots(paths, &pool);
    pool.close_and_join();
    let roots = walk_result?;

    let index = DigestIndex::new();
    for root in &roots {
        compute_subtree_digest(root, &index)?;
    }

    Ok(generate_script(&index))
}

fn walk_all_roots(
    paths: &[String],
    pool: &HashingPool,
) -> Result<Vec<Arc<DirRecord>>, DupError> {
    let mut roots = Vec::with_capacity(paths.len());
    for raw_path in paths {
        let canonical = canonicalize_path(raw_path);
        let canonical_path = PathBuf::from(canonical);
        let root = DirRecord::new_root(canonical_path.clone());
        walk_root(&root, &canonical_path, pool)?;
        roots.push(root);
    }
    Ok(roots)
}
