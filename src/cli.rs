//! Command-line interface argument parsing.
//!
//! This module defines the CLI structure using `clap`'s derive macros.
//! The [`CliArgs`] struct automatically generates argument parsing,
//! `--help`/`--version` output, and type validation.
//!
//! # Examples
//!
//! ```
//! use dupdigest::cli::CliArgs;
//! use clap::Parser;
//!
//! let args = CliArgs::parse_from(&["dupdigest", "/tmp"]);
//! assert_eq!(args.paths, vec!["/tmp"]);
//! ```

use clap::Parser;

/// Command-line arguments for the duplicate-file/directory scanner.
///
/// Unlike the teacher's `-d`, `-s`, `-a`, `--sort`, `--no-color`, `paths`
/// carries no default value here: zero paths is a meaningful, distinct
/// invocation (print usage, exit 0), so it must stay reachable rather than
/// silently becoming "scan `.`".
#[derive(Parser, Debug)]
#[command(
    name = "dupdigest",
    about = "Find duplicate files and directories by content, emit a removal script",
    version
)]
pub struct CliArgs {
    /// Root paths to scan. Zero paths prints usage and exits successfully.
    ///
    /// ```bash
    /// dupdigest /tmp /var        # scan two roots
    /// dupdigest                  # prints usage, exits 0
    /// ```
    pub paths: Vec<String>,

    /// Number of hashing worker threads (default 4).
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}
