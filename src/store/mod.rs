//! In-memory knowledge store for discovered teleport links.
//!
//! The store is the single mutation point for all persisted state: link
//! maps, world origins and last query pairs, keyed by world identifier.
//! It is a pure in-memory structure; serialization lives in
//! [`snapshot`] and file handling in [`crate::io`], so the store itself
//! is testable without any I/O.
//!
//! A process-wide dirty flag tracks unsaved changes. Mutations that do
//! not actually change state (re-recording an identical link) leave the
//! flag untouched, because observation is polled every tick and must not
//! cause write amplification.

mod snapshot;

pub use snapshot::{LinkEntry, QueryPair, Snapshot, SnapshotError};

use crate::core::Position;
use log::debug;
use std::collections::HashMap;

/// Everything known about a single world.
#[derive(Clone, Debug, Default)]
pub struct WorldKnowledge {
    /// Discovered links keyed by source position. `None` targets are
    /// links whose destination has not been observed yet.
    links: HashMap<Position, Option<Position>>,
    /// Reference origin (default spawn), fixed at first observation
    origin: Option<Position>,
    /// Last computed (start, goal) pair
    last_query: Option<QueryPair>,
}

impl WorldKnowledge {
    /// Discovered links keyed by source position
    pub fn links(&self) -> &HashMap<Position, Option<Position>> {
        &self.links
    }

    /// World reference origin, if set
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    /// Last computed query pair, if any
    pub fn last_query(&self) -> Option<QueryPair> {
        self.last_query
    }
}

/// Per-world knowledge store with dirty tracking.
///
/// Owns all persisted link and origin data for the process lifetime.
/// Single-threaded by design: the host drives every mutation from one
/// logic thread, so no locking is needed.
#[derive(Debug, Default)]
pub struct KnowledgeStore {
    worlds: HashMap<String, WorldKnowledge>,
    dirty: bool,
}

impl KnowledgeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Knowledge for one world, if any has been recorded or loaded
    pub fn world(&self, world: &str) -> Option<&WorldKnowledge> {
        self.worlds.get(world)
    }

    /// Number of known links for a world
    pub fn known_links(&self, world: &str) -> usize {
        self.worlds.get(world).map_or(0, |w| w.links.len())
    }

    /// Total number of known links across all worlds
    pub fn total_links(&self) -> usize {
        self.worlds.values().map(|w| w.links.len()).sum()
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful persistence write
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Insert or overwrite the link for `source` in `world`.
    ///
    /// Re-recording an identical (source, target) pair is a strict no-op:
    /// the dirty flag is left untouched. A source that resolves to a
    /// different target supersedes the previous value.
    ///
    /// Returns true if the stored state changed.
    pub fn record_link(
        &mut self,
        world: &str,
        source: Position,
        target: Option<Position>,
    ) -> bool {
        let knowledge = self.worlds.entry(world.to_string()).or_default();
        match knowledge.links.get(&source) {
            Some(existing) if *existing == target => false,
            _ => {
                knowledge.links.insert(source, target);
                self.dirty = true;
                debug!(
                    "[KnowledgeStore] recorded link {} -> {} in world {}",
                    source,
                    target.map_or_else(|| "unknown".to_string(), |t| t.to_string()),
                    world
                );
                true
            }
        }
    }

    /// World reference origin, if set
    pub fn origin(&self, world: &str) -> Option<Position> {
        self.worlds.get(world).and_then(|w| w.origin)
    }

    /// Set the world origin at first contact; later calls are no-ops.
    pub fn set_origin_if_absent(&mut self, world: &str, pos: Position) {
        let knowledge = self.worlds.entry(world.to_string()).or_default();
        if knowledge.origin.is_none() {
            knowledge.origin = Some(pos);
            self.dirty = true;
        }
    }

    /// Last computed (start, goal) pair for a world
    pub fn last_query(&self, world: &str) -> Option<QueryPair> {
        self.worlds.get(world).and_then(|w| w.last_query)
    }

    /// Remember the last computed (start, goal) pair for a world
    pub fn set_last_query(&mut self, world: &str, start: Position, goal: Position) {
        let knowledge = self.worlds.entry(world.to_string()).or_default();
        knowledge.last_query = Some(QueryPair { start, goal });
        self.dirty = true;
    }

    /// Parse serialized bytes and merge them into the store.
    ///
    /// See [`KnowledgeStore::absorb`] for the merge semantics. Malformed
    /// input fails without touching in-memory state; callers treat that
    /// as "start from empty" (log and continue), not as a fatal error.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::from_json(bytes)?;
        self.absorb(snapshot);
        Ok(())
    }

    /// Serialize the full current state
    pub fn save(&self) -> Result<Vec<u8>, SnapshotError> {
        self.export().to_json()
    }

    /// Merge a snapshot into the store.
    ///
    /// Incoming links are layered onto any already-present links, with
    /// incoming values winning on key collision. Origins and last-query
    /// entries are overwritten outright per world. Absorbing does not
    /// mark the store dirty: loaded state matches what is on disk.
    pub fn absorb(&mut self, snapshot: Snapshot) {
        for (world, entries) in snapshot.links {
            let knowledge = self.worlds.entry(world).or_default();
            for entry in entries {
                knowledge.links.insert(entry.source, entry.target);
            }
        }
        for (world, origin) in snapshot.origins {
            self.worlds.entry(world).or_default().origin = Some(origin);
        }
        for (world, pair) in snapshot.last_queries {
            self.worlds.entry(world).or_default().last_query = Some(pair);
        }
    }

    /// Export the full current state as a snapshot document
    pub fn export(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for (world, knowledge) in &self.worlds {
            if !knowledge.links.is_empty() {
                let entries = knowledge
                    .links
                    .iter()
                    .map(|(&source, &target)| LinkEntry { source, target })
                    .collect();
                snapshot.links.insert(world.clone(), entries);
            }
            if let Some(origin) = knowledge.origin {
                snapshot.origins.insert(world.clone(), origin);
            }
            if let Some(pair) = knowledge.last_query {
                snapshot.last_queries.insert(world.clone(), pair);
            }
        }
        snapshot
    }
}
