//! Path canonicalization: a pure string transform applied to each
//! user-supplied root before it is walked.
//!
//! This has nothing to do with [`std::path::Path::canonicalize`] — there is
//! no I/O and no symlink resolution here. It only normalizes the textual
//! shape of the path so that prefix comparisons against walked entries are
//! reliable, regardless of how the user spelled the root (`./root//sub/`
//! and `root/sub` must compare equal).
//!
//! # Examples
//!
//! ```
//! use dupdigest::path_canon::canonicalize_path;
//!
//! assert_eq!(canonicalize_path("./root//sub/"), "root/sub");
//! assert_eq!(canonicalize_path("root"), "root");
//! assert_eq!(canonicalize_path("/"), "/");
//! ```

use std::path::MAIN_SEPARATOR;

/// Canonicalizes a single raw path string.
///
/// Rules, applied in order:
/// 1. Collapse any run of the platform path separator to a single occurrence.
/// 2. If the result begins with `./`, drop those two characters.
/// 3. If the result ends with a separator (and is longer than one character),
///    drop that trailing separator.
pub fn canonicalize_path(raw: &str) -> String {
    let collapsed = collapse_separator_runs(raw);

    let without_leading = collapsed
        .strip_prefix(&format!(".{MAIN_SEPARATOR}"))
        .map(str::to_string)
        .unwrap_or(collapsed);

    if without_leading.len() > 1 && without_leading.ends_with(MAIN_SEPARATOR) {
        without_leading[..without_leading.len() - 1].to_string()
    } else {
        without_leading
    }
}

fn collapse_separator_runs(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_was_sep = false;
    for c in raw.chars() {
        if c == MAIN_SEPARATOR {
            if !prev_was_sep {
                out.push(c);
            }
            prev_was_sep = true;
        } else {
            out.push(c);
            prev_was_sep = false;
        }
    }
    out
}
