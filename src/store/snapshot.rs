//! Persisted snapshot document for the knowledge store.
//!
//! One JSON document per installation, holding every world's discovered
//! links, reference origin and last query pair. The document is
//! deliberately flat and version-free: unknown fields are ignored and
//! missing sections default to empty, so older documents keep loading.

use crate::core::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A discovered teleport link as it appears on disk.
///
/// `target` is `None` while the destination has not been observed yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Entry point of the link
    pub source: Position,
    /// Resolved exit point, if known
    #[serde(default)]
    pub target: Option<Position>,
}

/// A remembered (start, goal) query pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPair {
    /// Query start position
    pub start: Position,
    /// Query goal position
    pub goal: Position,
}

/// Full serialized state: one entry per world identifier.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Discovered links per world
    #[serde(default)]
    pub links: HashMap<String, Vec<LinkEntry>>,
    /// Reference origin (default spawn) per world
    #[serde(default)]
    pub origins: HashMap<String, Position>,
    /// Last computed query pair per world
    #[serde(default)]
    pub last_queries: HashMap<String, QueryPair>,
}

impl Snapshot {
    /// Parse a snapshot from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, SnapshotError> {
        serde_json::from_slice(bytes).map_err(SnapshotError::Parse)
    }

    /// Serialize to pretty-printed JSON bytes
    pub fn to_json(&self) -> Result<Vec<u8>, SnapshotError> {
        serde_json::to_vec_pretty(self).map_err(SnapshotError::Serialize)
    }

    /// Total number of link entries across all worlds
    pub fn total_links(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }
}

/// Error type for snapshot (de)serialization
#[derive(Debug)]
pub enum SnapshotError {
    /// Document is present but not well-formed
    Parse(serde_json::Error),
    /// State could not be serialized
    Serialize(serde_json::Error),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Parse(e) => write!(f, "malformed snapshot: {}", e),
            SnapshotError::Serialize(e) => write!(f, "snapshot serialization failed: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Parse(e) | SnapshotError::Serialize(e) => Some(e),
        }
    }
}
