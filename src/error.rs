//! Error types for duplicate detection and removal-script generation.
//!
//! Mirrors the error categories named in the specification: walk failures,
//! irregular filesystem entries, tree-insertion invariant violations, and
//! root-prefix mismatches. Every variant stores an owned `String`/`PathBuf`
//! rather than the originating error type (e.g. `io::Error`) because these
//! errors cross thread boundaries (stashed on a `FileRecord` by a hashing
//! worker, then read back on the digest-computation thread) and the
//! originating types are not `Send + Sync`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for the duplicate scan and script generation pipeline.
#[derive(Debug, Clone)]
pub enum DupError {
    /// Propagated from the filesystem walker: missing path, permission
    /// denied, symlink loop, or any other `walkdir` failure.
    WalkError(String),

    /// A device, FIFO, socket, or other non-regular file was encountered.
    IrregularEntry(PathBuf),

    /// `add_file` descended into a path segment with no matching child
    /// directory already present in the tree.
    MissingSubdirForFile(PathBuf),

    /// A walked path did not fall under any of the requested roots.
    PathOutsideRoots(PathBuf),

    /// `add_directory` tried to create an intermediate directory that the
    /// walker should have delivered first; this is an invariant violation,
    /// not a normal runtime condition.
    TreeInvariant(String),

    /// Opening or reading a file during hashing failed.
    Io(String),
}

impl fmt::Display for DupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DupError::WalkError(msg) => write!(f, "traversal error: {msg}"),
            DupError::IrregularEntry(path) => {
                write!(f, "irregular files not handled: {}", path.display())
            }
            DupError::MissingSubdirForFile(path) => {
                write!(f, "can't find subdir for file placement: {}", path.display())
            }
            DupError::PathOutsideRoots(path) => {
                write!(f, "path outside requested roots: {}", path.display())
            }
            DupError::TreeInvariant(msg) => write!(f, "tree invariant violated: {msg}"),
            DupError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for DupError {}

impl From<io::Error> for DupError {
    fn from(err: io::Error) -> Self {
        DupError::Io(err.to_string())
    }
}

impl From<walkdir::Error> for DupError {
    fn from(err: walkdir::Error) -> Self {
        // walkdir::Error is not Send/Sync, so convert it to a string
        // immediately rather than threading the original error around.
        DupError::WalkError(err.to_string())
    }
}
