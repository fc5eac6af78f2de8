//! Dijkstra's shortest path over the route graph adjacency list.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// State for the search priority queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SearchState {
    /// Current path cost (blocks)
    cost: u64,
    /// Current node index
    node: usize,
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default).
        // Ties break on node index so earlier-interned nodes win.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a shortest-path search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Sequence of node indices from start to goal
    pub path: Vec<usize>,
    /// Total path cost in blocks
    pub distance: u64,
}

/// Find the shortest path through an adjacency list.
///
/// `edges[i]` holds `(neighbor_idx, cost)` pairs. All costs are
/// non-negative by construction (walking distances, zero teleports).
///
/// Returns `None` if the goal is unreachable or an index is out of range.
pub fn shortest_path(
    edges: &[Vec<(usize, u64)>],
    start: usize,
    goal: usize,
) -> Option<SearchResult> {
    let n = edges.len();

    if n == 0 || start >= n || goal >= n {
        return None;
    }

    if start == goal {
        return Some(SearchResult {
            path: vec![start],
            distance: 0,
        });
    }

    let mut dist: Vec<u64> = vec![u64::MAX; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    dist[start] = 0;

    let mut heap = BinaryHeap::new();
    heap.push(SearchState {
        cost: 0,
        node: start,
    });

    while let Some(SearchState { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if cost > dist[node] {
            continue;
        }

        if node == goal {
            break;
        }

        for &(neighbor, edge_cost) in &edges[node] {
            let new_dist = dist[node] + edge_cost;
            if new_dist < dist[neighbor] {
                dist[neighbor] = new_dist;
                prev[neighbor] = Some(node);
                heap.push(SearchState {
                    cost: new_dist,
                    node: neighbor,
                });
            }
        }
    }

    if prev[goal].is_none() {
        return None;
    }

    // Reconstruct path
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        path.push(current);
        current = prev[current]?;
    }
    path.push(start);
    path.reverse();

    Some(SearchResult {
        path,
        distance: dist[goal],
    })
}
