//! Duplicate-content scanner library.
//!
//! Walks one or more filesystem roots, computes content digests for every
//! file and directory (a directory's digest is a pure function of its
//! children's digests, so identical subtrees collide regardless of naming),
//! groups entries that collide, and emits a reviewable POSIX shell script
//! that removes every duplicate but one per group.
//!
//! # Architecture
//!
//! - [`cli`]: command-line argument parsing
//! - [`error`]: error types
//! - [`path_canon`]: pure-string root path normalization
//! - [`tree`]: the scanned-tree data model (`FileRecord`/`DirRecord`/`Entry`)
//! - [`walker`]: the `walkdir` boundary that populates the tree
//! - [`hasher`]: file hashing and the bounded worker pool
//! - [`digest`]: the post-order subtree-digest pass
//! - [`index`]: the shared digest-to-entries index
//! - [`reporter`]: shell-script rendering
//! - [`analyzer`]: the orchestrator tying the above together
//!
//! # Quick Start
//!
//! ```no_run
//! use dupdigest::{cli::CliArgs, run};
//! use clap::Parser;
//!
//! let args = CliArgs::parse_from(&["dupdigest", "/tmp"]);
//! run(&args).expect("scan failed");
//! ```

pub mod analyzer;
pub mod cli;
pub mod digest;
pub mod error;
pub mod hasher;
pub mod index;
pub mod path_canon;
pub mod reporter;
pub mod tree;
pub mod walker;

use cli::CliArgs;
use error::DupError;

const USAGE: &str = "\
usage: dupdigest <path> [path...]

Scans one or more directories for duplicate files and directories by
content and prints a POSIX shell script to stdout.

    dupdigest /data > cleanup.sh   # generate the script
    less cleanup.sh                # review every command
    sh cleanup.sh                  # execute once satisfied
";

/// Funnels the one non-fatal notice this crate ever prints (usage, on a
/// zero-path invocation) through a single call site, matching the "Stderr:
/// log lines for non-fatal notices" half of the external contract.
fn log_notice(message: &str) {
    eprint!("{message}");
}

/// Runs the scan described by `args` and prints the removal script to
/// stdout. Zero paths is not an error: usage is printed to stderr and the
/// function returns `Ok(())`.
pub fn run(args: &CliArgs) -> Result<(), DupError> {
    if args.paths.is_empty() {
        log_notice(USAGE);
        return Ok(());
    }

    let script = analyzer::analyze(&args.paths, args.threads)?;
    println!("{script}");
    Ok(())
}
