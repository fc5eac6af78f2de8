//! Per-query route graph construction and solving.
//!
//! A route graph is built fresh for each (start, goal) query from the
//! world's known links:
//!
//! 1. A baseline walking edge start→goal, so the graph is always
//!    solvable even with zero known links.
//! 2. Zero-cost teleport edges in both directions for every resolved
//!    link (the underlying teleport mechanic is bidirectional, even when
//!    discovery was one-sided).
//! 3. Access walking edges start→endpoint and endpoint→goal for every
//!    link endpoint.
//! 4. Chaining walking edges from each resolved link's exit to the
//!    nearest few other link entrances, so multi-hop teleport routes
//!    through portal clusters stay discoverable without an O(n²) edge
//!    set.
//!
//! Walking edges weigh their truncated Euclidean block distance;
//! teleport edges weigh exactly zero. The graph and its id-interning
//! table are transient and discarded after solving.

mod dijkstra;

use crate::core::Position;
use log::trace;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Configuration for route graph construction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RouteConfig {
    /// How many nearest other link entrances each resolved exit is
    /// chained to. Bounds the graph to O(n·k) edges; a chain through an
    /// entrance ranked below this cutoff will be missed. Default: 5
    pub chain_neighbors: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self { chain_neighbors: 5 }
    }
}

impl RouteConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the chaining neighbor count
    pub fn with_chain_neighbors(mut self, k: usize) -> Self {
        self.chain_neighbors = k;
        self
    }
}

/// Directed weighted multigraph for a single (start, goal) query.
#[derive(Clone, Debug)]
pub struct RouteGraph {
    /// Node positions, in interning order
    nodes: Vec<Position>,
    /// Position → node index, memoized for the build only
    ids: HashMap<Position, usize>,
    /// Adjacency list: edges[i] = [(neighbor_idx, cost), ...]
    edges: Vec<Vec<(usize, u64)>>,
    start_idx: usize,
    goal_idx: usize,
    start: Position,
    goal: Position,
}

impl RouteGraph {
    /// Build a route graph from a world's known links.
    ///
    /// Links with an unresolved target contribute no edges; they exist
    /// only as discovered points. Construction never fails: with no
    /// usable links the graph degrades to the baseline walking edge.
    pub fn build(
        links: &HashMap<Position, Option<Position>>,
        start: Position,
        goal: Position,
        config: &RouteConfig,
    ) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            ids: HashMap::new(),
            edges: Vec::new(),
            start_idx: 0,
            goal_idx: 0,
            start,
            goal,
        };

        let start_idx = graph.intern(start);
        let goal_idx = graph.intern(goal);
        graph.start_idx = start_idx;
        graph.goal_idx = goal_idx;

        // Baseline: the "big walk"
        graph.connect(start_idx, goal_idx, start.block_distance(&goal));

        // Teleport and access edges
        for (&source, &target) in links {
            let Some(target) = target else { continue };

            let source_idx = graph.intern(source);
            let target_idx = graph.intern(target);

            // The jump itself is free, in both directions
            graph.connect(source_idx, target_idx, 0);
            graph.connect(target_idx, source_idx, 0);

            // Walk from the start to either end of the link
            graph.connect(start_idx, source_idx, start.block_distance(&source));
            graph.connect(start_idx, target_idx, start.block_distance(&target));

            // Walk from either end of the link to the goal
            graph.connect(source_idx, goal_idx, source.block_distance(&goal));
            graph.connect(target_idx, goal_idx, target.block_distance(&goal));
        }

        // Chaining: connect each resolved exit to its nearest few other
        // entrances so the solver can hop portal to portal.
        let resolved: Vec<(Position, Position)> = links
            .iter()
            .filter_map(|(&source, &target)| target.map(|t| (source, t)))
            .collect();

        for &(source, exit) in &resolved {
            let mut nearby: Vec<(Position, f64)> = resolved
                .iter()
                .filter(|(other_source, _)| *other_source != source)
                .map(|&(other_source, _)| (other_source, exit.distance(&other_source)))
                .collect();
            nearby.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

            for &(entrance, dist) in nearby.iter().take(config.chain_neighbors) {
                let exit_idx = graph.intern(exit);
                let entrance_idx = graph.intern(entrance);
                // Both ways, so the "hallway" walks in either direction
                graph.connect(exit_idx, entrance_idx, dist as u64);
                graph.connect(entrance_idx, exit_idx, dist as u64);
            }
        }

        trace!(
            "[RouteGraph] built {} nodes, {} edges for {} -> {}",
            graph.node_count(),
            graph.edge_count(),
            start,
            goal
        );

        graph
    }

    /// Solve the graph and package the result.
    pub fn solve(&self) -> RouteResult {
        let birds_eye = self.start.block_distance(&self.goal);

        match dijkstra::shortest_path(&self.edges, self.start_idx, self.goal_idx) {
            Some(search) => RouteResult {
                path: search.path.iter().map(|&idx| self.nodes[idx]).collect(),
                total_distance: search.distance,
                birds_eye_distance: birds_eye,
                found: true,
            },
            None => RouteResult {
                path: Vec::new(),
                total_distance: 0,
                birds_eye_distance: birds_eye,
                found: false,
            },
        }
    }

    /// Intern a position, assigning a stable node index on first sight
    fn intern(&mut self, pos: Position) -> usize {
        if let Some(&idx) = self.ids.get(&pos) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(pos);
        self.edges.push(Vec::new());
        self.ids.insert(pos, idx);
        idx
    }

    /// Add a directed edge
    fn connect(&mut self, from: usize, to: usize, cost: u64) {
        self.edges[from].push((to, cost));
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Node position by index
    pub fn node(&self, idx: usize) -> Option<&Position> {
        self.nodes.get(idx)
    }

    /// Start node index
    pub fn start_idx(&self) -> usize {
        self.start_idx
    }

    /// Goal node index
    pub fn goal_idx(&self) -> usize {
        self.goal_idx
    }
}

/// Result of a route query.
///
/// Immutable once constructed; a fresh instance is produced per distinct
/// query and the previous one is superseded, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteResult {
    path: Vec<Position>,
    total_distance: u64,
    birds_eye_distance: u64,
    found: bool,
}

impl RouteResult {
    /// Whether a route was found
    pub fn is_found(&self) -> bool {
        self.found
    }

    /// Sum of edge weights along the route, in blocks
    pub fn total_distance(&self) -> u64 {
        self.total_distance
    }

    /// Straight-line start→goal distance, valid whether or not a route
    /// was found
    pub fn birds_eye_distance(&self) -> u64 {
        self.birds_eye_distance
    }

    /// Waypoints from start to goal inclusive; empty if not found
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// The immediate next waypoint after the start.
    ///
    /// `None` when the path has at most one element, which covers both
    /// "not found" and "start equals goal".
    pub fn next_step(&self) -> Option<Position> {
        if self.path.len() <= 1 {
            return None;
        }
        Some(self.path[1])
    }
}
