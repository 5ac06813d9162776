//! Digest Index: the only piece of shared mutable state touched after the
//! walk begins.
//!
//! Hashing workers only write each file's digest cell on its `FileRecord`;
//! both file and directory entries are submitted here by the
//! single-threaded post-order digest pass, as it computes each directory's
//! digest from its already-hashed files and already-digested subdirectories.
//! One mutex around the whole structure is adequate — insertion is O(1)
//! and every call happens on that one thread.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::tree::Entry;

/// Maps a digest string to every entry that produced it, further bucketed
/// by depth (so the Reporter can prefer shallower keepers without a second
/// pass over the whole index).
#[derive(Default)]
pub struct DigestIndex {
    buckets: Mutex<HashMap<String, HashMap<usize, Vec<Entry>>>>,
}

impl DigestIndex {
    pub fn new() -> Self {
        DigestIndex {
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Records that `entry` produced `digest`.
    pub fn insert(&self, digest: String, entry: Entry) {
        let mut buckets = self.buckets.lock().unwrap();
        buckets
            .entry(digest)
            .or_default()
            .entry(entry.depth())
            .or_default()
            .push(entry);
    }

    /// Every digest bucket that contains more than one entry in total,
    /// each bucket's entries grouped by depth (ascending) for the
    /// Reporter's keeper-selection pass.
    pub fn duplicate_groups(&self) -> Vec<BTreeMap<usize, Vec<Entry>>> {
        let buckets = self.buckets.lock().unwrap();
        buckets
            .values()
            .filter(|by_depth| by_depth.values().map(Vec::len).sum::<usize>() > 1)
            .map(|by_depth| by_depth.iter().map(|(d, es)| (*d, es.clone())).collect())
            .collect()
    }
}
