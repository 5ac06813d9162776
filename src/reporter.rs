//! Duplicate Reporter: turns a populated [`DigestIndex`] into a reviewable
//! POSIX shell script.
//!
//! The script never executes anything by itself — it is meant to be
//! redirected to a file, read by a human, and run with `sh` once approved.

use std::fmt::Write as _;

use crate::index::DigestIndex;
use crate::tree::Entry;

const SCRIPT_HEADER: &str = "#!/bin/sh\n# REVIEW ALL THESE COMMANDS BEFORE EXECUTION\n\n";

/// Renders the full removal script for every duplicate group found in
/// `index`. Digest bucket order is unspecified; the order entries appear
/// within a group is fixed by keeper-selection rules.
pub fn generate_script(index: &DigestIndex) -> String {
    let mut script = String::from(SCRIPT_HEADER);

    for group in index.duplicate_groups() {
        let ordered = order_group(group);
        let (keeper, rest) = ordered
            .split_first()
            .expect("duplicate_groups only yields groups with at least 2 entries");

        writeln!(script, "# keep {}", shell_quote(&keeper.path().display().to_string())).unwrap();
        for entry in rest {
            let quoted = shell_quote(&entry.path().display().to_string());
            if entry.is_directory() {
                writeln!(script, "rm -rf {quoted}").unwrap();
            } else {
                writeln!(script, "rm     {quoted}").unwrap();
            }
        }
        script.push('\n');
    }

    script
}

/// Orders a duplicate group's entries: ascending by depth level, then
/// within a level by (shorter path, then lexicographic path). The first
/// entry in the result is the keeper.
fn order_group(group: std::collections::BTreeMap<usize, Vec<Entry>>) -> Vec<Entry> {
    let mut ordered = Vec::new();
    for (_, mut entries) in group {
        entries.sort_by(|a, b| {
            let a_path = a.path().display().to_string();
            let b_path = b.path().display().to_string();
            a_path
                .len()
                .cmp(&b_path.len())
                .then_with(|| a_path.cmp(&b_path))
        });
        ordered.extend(entries);
    }
    ordered
}

/// Double-quotes `raw` for safe use as a single POSIX shell word, escaping
/// the characters that are still special inside double quotes: `"`, `\`,
/// `$`, and backtick.
pub fn shell_quote(raw: &str) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for c in raw.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DirRecord;
    use std::path::PathBuf;

    #[test]
    fn test_shell_quote_escapes_special_characters() {
        assert_eq!(shell_quote(r#"a"b"#), r#""a\"b""#);
        assert_eq!(shell_quote(r"a\b"), r#""a\\b""#);
        assert_eq!(shell_quote("a$b"), r#""a\$b""#);
        assert_eq!(shell_quote("a`b"), r#""a\`b""#);
    }

    #[test]
    fn test_shell_quote_plain_path_unchanged_inside_quotes() {
        assert_eq!(shell_quote("root/sub/leaf.txt"), "\"root/sub/leaf.txt\"");
    }

    #[test]
    fn test_empty_index_produces_only_header() {
        let index = DigestIndex::new();
        let script = generate_script(&index);
        assert_eq!(script, SCRIPT_HEADER);
    }

    #[test]
    fn test_duplicate_group_keeps_shallowest_as_keeper() {
        let shallow_root = DirRecord::new_root(PathBuf::from("shallow"));
        let shallow_file = shallow_root.add_file(&["dup.txt".to_string()]).unwrap();
        shallow_file.set_digest(Ok("shared".to_string()));

        let deep_root = DirRecord::new_root(PathBuf::from("deep"));
        DirRecord::add_directory(&deep_root, &["nested".to_string()]).unwrap();
        let nested = deep_root.subdirs().into_iter().next().unwrap();
        let deep_file = nested.add_file(&["dup.txt".to_string()]).unwrap();
        deep_file.set_digest(Ok("shared".to_string()));

        let index = DigestIndex::new();
        index.insert("shared".to_string(), Entry::File(shallow_file.clone()));
        index.insert("shared".to_string(), Entry::File(deep_file.clone()));

        let script = generate_script(&index);
        let keep_line = script.lines().find(|l| l.starts_with("# keep")).unwrap();
        assert!(keep_line.contains("shallow/dup.txt"));
        assert!(script.contains("rm     "));
    }

    #[test]
    fn test_directory_duplicate_uses_rm_rf() {
        let root_a = DirRecord::new_root(PathBuf::from("a"));
        root_a.set_digest("shared".to_string());
        let root_b = DirRecord::new_root(PathBuf::from("b"));
        root_b.set_digest("shared".to_string());

        let index = DigestIndex::new();
        index.insert("shared".to_string(), Entry::Dir(root_a));
        index.insert("shared".to_string(), Entry::Dir(root_b));

        let script = generate_script(&index);
        assert!(script.contains("rm -rf"));
        assert!(!script.contains("rm     "));
    }
}
