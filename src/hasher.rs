//! File hashing and the bounded worker pool that drives it.
//!
//! Hashing is I/O-bound (mostly waiting on the disk, not the CPU), so this
//! is a plain `std::thread` pool behind a bounded `mpsc` channel rather than
//! a `rayon` fan-out: the channel capacity itself provides backpressure,
//! keeping at most one file's worth of unread bytes queued per worker.

use std::io;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use sha1::{Digest, Sha1};

use crate::error::DupError;
use crate::tree::FileRecord;

/// Number of hashing workers when the caller doesn't override it.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Hashes a single file's contents and returns the lowercase hex digest.
///
/// Streams the file through the hasher rather than reading it whole, so
/// memory use doesn't scale with file size.
pub fn hash_file(path: &std::path::Path) -> Result<String, DupError> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha1::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// A fixed pool of worker threads draining a shared, bounded channel of
/// files to hash.
///
/// Each worker hashes a file and stores the outcome directly on its
/// `FileRecord` via [`FileRecord::set_digest`]; the pool itself has no
/// notion of success or failure, matching the contract that a hashing
/// error is recorded per-file rather than aborting the pool.
pub struct HashingPool {
    sender: SyncSender<Arc<FileRecord>>,
    workers: Vec<JoinHandle<()>>,
}

impl HashingPool {
    /// Spawns `worker_count` threads (or [`DEFAULT_WORKER_COUNT`] if
    /// `None`), each draining the same bounded channel. Channel capacity
    /// equals the worker count.
    pub fn spawn(worker_count: Option<usize>) -> Self {
        let worker_count = worker_count.unwrap_or(DEFAULT_WORKER_COUNT).max(1);
        let (sender, receiver) = mpsc::sync_channel::<Arc<FileRecord>>(worker_count);
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..worker_count)
            .map(|_| {
                let receiver = Arc::clone(&receiver);
                thread::spawn(move || worker_loop(receiver))
            })
            .collect();

        HashingPool { sender, workers }
    }

    /// Enqueues a file for hashing. Blocks if the channel is at capacity,
    /// which is the backpressure mechanism: the walker can't outrun the
    /// workers by more than one file per worker.
    pub fn enqueue(&self, file: Arc<FileRecord>) {
        // The receiving end only drops once every worker has exited, and
        // workers only exit once the channel is closed (by `close_and_join`
        // taking `self.sender` by value), so this send cannot fail while
        // the pool is still alive to receive `enqueue` calls.
        self.sender
            .send(file)
            .expect("hashing pool workers exited before the walk finished enqueueing files");
    }

    /// Closes the channel and blocks until every worker has drained it and
    /// exited. This is the single wait synchronization primitive that
    /// releases the caller once every `File.digest` slot is populated.
    pub fn close_and_join(self) {
        drop(self.sender);
        for worker in self.workers {
            let _ = worker.join();
        }
    }
}

fn worker_loop(receiver: Arc<Mutex<Receiver<Arc<FileRecord>>>>) {
    loop {
        let file = {
            let receiver = receiver.lock().unwrap();
            receiver.recv()
        };

        let file = match file {
            Ok(file) => file,
            Err(_) => return,
        };

        let result = hash_file(file.path());
        file.set_digest(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_hash_file_matches_known_sha1() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("leaf.txt");
        std::fs::write(&path, "hello").unwrap();

        let digest = hash_file(&path).unwrap();
        // `sha1sum` of the literal bytes "hello"
        assert_eq!(digest, "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
    }

    #[test]
    fn test_hash_file_missing_path_errors() {
        let result = hash_file(&PathBuf::from("/nonexistent/path/leaf.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_hash_file_empty_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        let digest = hash_file(&path).unwrap();
        assert_eq!(digest, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn test_pool_hashes_enqueued_files() {
        let tmp = TempDir::new().unwrap();
        let path_a = tmp.path().join("a.txt");
        let path_b = tmp.path().join("b.txt");
        std::fs::write(&path_a, "one").unwrap();
        std::fs::write(&path_b, "one").unwrap();

        let file_a = FileRecord::new("a.txt".to_string(), path_a, 2);
        let file_b = FileRecord::new("b.txt".to_string(), path_b, 2);

        let pool = HashingPool::spawn(Some(2));
        pool.enqueue(file_a.clone());
        pool.enqueue(file_b.clone());
        pool.close_and_join();

        let digest_a = file_a.digest_result().unwrap().as_ref().unwrap().clone();
        let digest_b = file_b.digest_result().unwrap().as_ref().unwrap().clone();
        assert_eq!(digest_a, digest_b);
    }

    #[test]
    fn test_pool_records_error_without_aborting_other_files() {
        let tmp = TempDir::new().unwrap();
        let good_path = tmp.path().join("good.txt");
        std::fs::write(&good_path, "data").unwrap();

        let missing = FileRecord::new(
            "missing.txt".to_string(),
            PathBuf::from("/nonexistent/missing.txt"),
            2,
        );
        let good = FileRecord::new("good.txt".to_string(), good_path, 2);

        let pool = HashingPool::spawn(Some(2));
        pool.enqueue(missing.clone());
        pool.enqueue(good.clone());
        pool.close_and_join();

        assert!(missing.digest_result().unwrap().is_err());
        assert!(good.digest_result().unwrap().is_ok());
    }
}
