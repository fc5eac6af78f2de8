//! Snapshot file persistence and the flush write policy.
//!
//! The store itself is pure in-memory; this module owns the disk side:
//! reading the snapshot document at session start and writing it back on
//! a debounced schedule. Storage failures are logged and swallowed — a
//! session that cannot reach its snapshot file keeps working in memory
//! and only loses durability across restarts.

use crate::store::{KnowledgeStore, SnapshotError};
use log::{debug, error, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Error type for snapshot file operations
#[derive(Debug)]
pub enum PersistError {
    /// File read or write failed
    Io(std::io::Error),
    /// Document was present but unusable
    Snapshot(SnapshotError),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "I/O error: {}", e),
            PersistError::Snapshot(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Snapshot(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<SnapshotError> for PersistError {
    fn from(e: SnapshotError) -> Self {
        PersistError::Snapshot(e)
    }
}

/// Read a snapshot file and merge it into the store.
///
/// A missing file is not an error; it simply means a fresh install.
/// Returns true if a document was read and merged.
pub fn read_snapshot(store: &mut KnowledgeStore, path: &Path) -> Result<bool, PersistError> {
    if !path.exists() {
        return Ok(false);
    }
    let bytes = std::fs::read(path)?;
    store.load(&bytes)?;
    Ok(true)
}

/// Write the store's full state to a snapshot file.
///
/// Creates parent directories as needed. Does not touch the dirty flag;
/// that is the scheduler's job once the write is known good.
pub fn write_snapshot(store: &KnowledgeStore, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = store.save()?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Configuration for the flush scheduler.
#[derive(Clone, Copy, Debug)]
pub struct FlushConfig {
    /// Minimum interval between scheduled flushes. Default: 5 s
    pub min_interval: Duration,
}

impl Default for FlushConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(5),
        }
    }
}

impl FlushConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the minimum flush interval
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }
}

/// Debounced write policy for the knowledge store.
///
/// The host calls [`FlushScheduler::tick`] from its periodic timer and
/// [`FlushScheduler::flush_now`] on session teardown. Writes only happen
/// while the store is dirty, so idle ticks cost nothing.
#[derive(Debug)]
pub struct FlushScheduler {
    path: PathBuf,
    config: FlushConfig,
    last_flush: Option<Instant>,
}

impl FlushScheduler {
    /// Create a scheduler writing to the given snapshot path
    pub fn new(path: impl Into<PathBuf>, config: FlushConfig) -> Self {
        Self {
            path: path.into(),
            config,
            last_flush: None,
        }
    }

    /// The snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot file into the store, swallowing failures.
    ///
    /// A malformed or unreadable document is logged and discarded; the
    /// session starts from whatever is already in memory.
    pub fn load_into(&self, store: &mut KnowledgeStore) {
        match read_snapshot(store, &self.path) {
            Ok(true) => {
                debug!(
                    "[FlushScheduler] loaded {} link(s) from {}",
                    store.total_links(),
                    self.path.display()
                );
            }
            Ok(false) => {}
            Err(e) => {
                warn!(
                    "[FlushScheduler] could not load {}: {} (starting empty)",
                    self.path.display(),
                    e
                );
            }
        }
    }

    /// Periodic flush entry point. Writes only if the store is dirty and
    /// the minimum interval has elapsed. Returns true if a write happened.
    pub fn tick(&mut self, store: &mut KnowledgeStore) -> bool {
        if !store.is_dirty() {
            return false;
        }
        if let Some(last) = self.last_flush {
            if last.elapsed() < self.config.min_interval {
                return false;
            }
        }
        self.flush_now(store)
    }

    /// Flush immediately if dirty, ignoring the interval. Returns true
    /// if a write happened. Failures are logged and leave the dirty flag
    /// set so a later flush retries.
    pub fn flush_now(&mut self, store: &mut KnowledgeStore) -> bool {
        if !store.is_dirty() {
            return false;
        }
        match write_snapshot(store, &self.path) {
            Ok(()) => {
                store.mark_clean();
                self.last_flush = Some(Instant::now());
                debug!(
                    "[FlushScheduler] {} link(s) saved to {}",
                    store.total_links(),
                    self.path.display()
                );
                true
            }
            Err(e) => {
                error!(
                    "[FlushScheduler] could not save {}: {}",
                    self.path.display(),
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;

    const WORLD: &str = "test-world";

    fn sample_store() -> KnowledgeStore {
        let mut store = KnowledgeStore::new();
        store.record_link(
            WORLD,
            Position::new(10, 0, 0),
            Some(Position::new(90, 0, 0)),
        );
        store.set_origin_if_absent(WORLD, Position::new(0, 100, 0));
        store
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = KnowledgeStore::new();
        let loaded = read_snapshot(&mut store, &dir.path().join("absent.json")).unwrap();
        assert!(!loaded);
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory creation is part of the contract
        let path = dir.path().join("nested").join("links.json");

        let store = sample_store();
        write_snapshot(&store, &path).unwrap();

        let mut restored = KnowledgeStore::new();
        assert!(read_snapshot(&mut restored, &path).unwrap());
        assert_eq!(
            restored.world(WORLD).unwrap().links(),
            store.world(WORLD).unwrap().links()
        );
        assert_eq!(restored.origin(WORLD), store.origin(WORLD));
    }

    #[test]
    fn test_malformed_file_reports_snapshot_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(&path, b"{{{{").unwrap();

        let mut store = KnowledgeStore::new();
        let err = read_snapshot(&mut store, &path).unwrap_err();
        assert!(matches!(err, PersistError::Snapshot(_)));
    }

    #[test]
    fn test_flush_now_clears_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut scheduler =
            FlushScheduler::new(dir.path().join("links.json"), FlushConfig::default());
        let mut store = sample_store();
        assert!(store.is_dirty());

        assert!(scheduler.flush_now(&mut store));
        assert!(!store.is_dirty());
        // Nothing pending, nothing written
        assert!(!scheduler.flush_now(&mut store));
    }

    #[test]
    fn test_tick_skips_clean_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut scheduler =
            FlushScheduler::new(dir.path().join("links.json"), FlushConfig::default());
        let mut store = KnowledgeStore::new();
        assert!(!scheduler.tick(&mut store));
    }

    #[test]
    fn test_tick_respects_min_interval() {
        let dir = tempfile::tempdir().unwrap();
        let config = FlushConfig::new().with_min_interval(Duration::from_secs(3600));
        let mut scheduler = FlushScheduler::new(dir.path().join("links.json"), config);
        let mut store = sample_store();

        // First flush has no previous timestamp
        assert!(scheduler.tick(&mut store));

        store.record_link(WORLD, Position::new(1, 1, 1), None);
        assert!(store.is_dirty());
        // Interval has not elapsed, so the write is deferred
        assert!(!scheduler.tick(&mut store));
        assert!(store.is_dirty());
    }

    #[test]
    fn test_load_into_swallows_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(&path, b"not a snapshot").unwrap();

        let scheduler = FlushScheduler::new(&path, FlushConfig::default());
        let mut store = KnowledgeStore::new();
        scheduler.load_into(&mut store);
        assert_eq!(store.total_links(), 0);
    }
}
