//! Subtree Digest Engine: the single-threaded post-order pass that turns a
//! populated tree into content digests, bottom-up.
//!
//! Runs once per root, only after the hashing pool has fully drained, so
//! every file in the tree carries either a digest or a recorded error.

use std::sync::Arc;

use sha1::{Digest as Sha1DigestTrait, Sha1};

use crate::error::DupError;
use crate::index::DigestIndex;
use crate::tree::{DirRecord, Entry};

const DIRECTORY_SEED: &[u8] = b"DIRECTORYSEED";

/// Computes `dir`'s digest and every descendant's digest, storing each on
/// its node and submitting it to `index` as it's computed.
///
/// A file whose hashing failed aborts the whole root immediately — partial
/// output for a corrupted directory's digest is never produced, though
/// digests already submitted to `index` for sibling subtrees computed
/// earlier are not retracted.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use dupdigest::digest::compute_subtree_digest;
/// use dupdigest::index::DigestIndex;
/// use dupdigest::tree::DirRecord;
///
/// let root = DirRecord::new_root(PathBuf::from("/tmp/data"));
/// // ... populate `root` via walker::walk_root and drain the hashing pool first ...
/// let index = DigestIndex::new();
/// let digest = compute_subtree_digest(&root, &index).expect("digest pass failed");
/// println!("{digest}");
/// ```
///
/// # Errors
///
/// Returns a [`DupError`] if any file under `dir` has no recorded digest
/// (the walker/hasher invariant was violated) or if any file's hashing
/// recorded an error.
pub fn compute_subtree_digest(
    dir: &Arc<DirRecord>,
    index: &DigestIndex,
) -> Result<String, DupError> {
    let mut child_digests: Vec<String> = Vec::new();

    for file in dir.files() {
        let digest = match file.digest_result() {
            Some(Ok(digest)) => digest.clone(),
            Some(Err(err)) => return Err(err.clone()),
            None => {
                return Err(DupError::TreeInvariant(format!(
                    "digest pass reached {} before its file was hashed",
                    file.path().display()
                )));
            }
        };
        index.insert(digest.clone(), Entry::File(file.clone()));
        child_digests.push(digest);
    }

    for subdir in dir.subdirs() {
        let digest = compute_subtree_digest(&subdir, index)?;
        child_digests.push(digest);
    }

    child_digests.sort();

    let mut hasher = Sha1::new();
    hasher.update(DIRECTORY_SEED);
    for child in &child_digests {
        hasher.update(child.as_bytes());
    }
    let digest = format!("{:x}", hasher.finalize());

    dir.set_digest(digest.clone());
    index.insert(digest.clone(), Entry::Dir(dir.clone()));

    Ok(digest)
}
