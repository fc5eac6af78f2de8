//! Query facade over the knowledge store.
//!
//! The navigator owns the store, builds a route graph per query, and
//! keeps the most recent result per world so repeated identical queries
//! skip the rebuild. The cache is keyed on exact coordinate equality and
//! is only invalidated by a query with different coordinates — newly
//! discovered links do not evict it, so a cached route can under-report
//! a fresh shortcut until the next distinct query. That staleness window
//! is accepted; link discovery happens every tick and eager invalidation
//! would throw the cache away constantly.

use crate::core::Position;
use crate::graph::{RouteConfig, RouteGraph, RouteResult};
use crate::store::{KnowledgeStore, QueryPair};
use log::{debug, trace};
use std::collections::HashMap;

/// Pathfinding facade: observation recording, route queries and the
/// per-world last-result cache.
#[derive(Debug, Default)]
pub struct Navigator {
    store: KnowledgeStore,
    config: RouteConfig,
    cached: HashMap<String, RouteResult>,
    graph_builds: u64,
}

impl Navigator {
    /// Create a navigator with an empty store and default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator with a custom route configuration
    pub fn with_config(config: RouteConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The underlying knowledge store
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Mutable access to the store, for loading and persistence
    pub fn store_mut(&mut self) -> &mut KnowledgeStore {
        &mut self.store
    }

    /// Record an observed link. Returns true if the store changed.
    pub fn record_observation(
        &mut self,
        world: &str,
        source: Position,
        target: Option<Position>,
    ) -> bool {
        self.store.record_link(world, source, target)
    }

    /// Fix the world's reference origin at first contact
    pub fn set_origin_if_absent(&mut self, world: &str, pos: Position) {
        self.store.set_origin_if_absent(world, pos);
    }

    /// The world's reference origin, if set
    pub fn origin(&self, world: &str) -> Option<Position> {
        self.store.origin(world)
    }

    /// The (start, goal) pair of the world's last query, if any
    pub fn last_query(&self, world: &str) -> Option<QueryPair> {
        self.store.last_query(world)
    }

    /// Number of known links for a world
    pub fn known_links(&self, world: &str) -> usize {
        self.store.known_links(world)
    }

    /// How many route graphs have been built. Identical repeat queries
    /// are served from cache and do not increment this.
    pub fn graph_builds(&self) -> u64 {
        self.graph_builds
    }

    /// Compute the lowest-cost route from `start` to `goal`.
    ///
    /// Served from the per-world cache when the coordinates match the
    /// world's last query exactly; otherwise a graph is built and solved
    /// fresh, the result cached, and the query pair persisted as the
    /// world's last query.
    pub fn query(&mut self, world: &str, start: Position, goal: Position) -> RouteResult {
        if let Some(pair) = self.store.last_query(world) {
            if pair.start == start && pair.goal == goal {
                if let Some(cached) = self.cached.get(world) {
                    trace!("[Navigator] cache hit for {} -> {} in {}", start, goal, world);
                    return cached.clone();
                }
            }
        }

        let empty = HashMap::new();
        let links = self
            .store
            .world(world)
            .map_or(&empty, |knowledge| knowledge.links());

        let graph = RouteGraph::build(links, start, goal, &self.config);
        self.graph_builds += 1;
        let result = graph.solve();

        debug!(
            "[Navigator] solved {} -> {} in {}: found={} distance={} waypoints={}",
            start,
            goal,
            world,
            result.is_found(),
            result.total_distance(),
            result.path().len()
        );

        self.store.set_last_query(world, start, goal);
        self.cached.insert(world.to_string(), result.clone());
        result
    }
}
