//! Lowest-latency path search over the active subgraph.
//!
//! Dijkstra with a binary heap. Latencies are unsigned, so the greedy
//! settle order is exact. Determinism comes from three rules:
//! - a tentative distance is only replaced on strict improvement
//! - neighbors are relaxed in link insertion order
//! - the heap breaks distance ties by node index

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::PathError;
use crate::graph::Topology;
use crate::node::{Latency, NodeIndex};

/// An ordered walk from source to destination, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Node names from source to destination
    pub nodes: Vec<String>,
    /// Sum of link latencies along the walk
    pub latency: Latency,
}

impl Path {
    /// Number of links traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Source node.
    pub fn source(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    /// Destination node.
    pub fn destination(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// Render as `A -> B -> C`.
    pub fn display(&self) -> String {
        self.nodes.join(" -> ")
    }
}

/// Find the minimum-latency path between two nodes.
///
/// Only active nodes take part. A query from a node to itself yields a
/// single-node path of latency zero, as long as the node is active.
pub fn find_path(topology: &Topology, from: &str, to: &str) -> Result<Path, PathError> {
    let src = topology
        .index_of(from)
        .map_err(|_| PathError::NotFound(from.to_string()))?;
    let dst = topology
        .index_of(to)
        .map_err(|_| PathError::NotFound(to.to_string()))?;

    let unreachable = || PathError::Unreachable {
        from: from.to_string(),
        to: to.to_string(),
    };

    let is_active = |idx: NodeIndex| topology.node(idx).is_some_and(|n| n.is_active);
    if !is_active(src) || !is_active(dst) {
        return Err(unreachable());
    }
    if src == dst {
        return Ok(Path {
            nodes: vec![from.to_string()],
            latency: 0,
        });
    }

    let n = topology.node_count();
    let mut dist: Vec<Option<Latency>> = vec![None; n];
    let mut prev: Vec<Option<NodeIndex>> = vec![None; n];
    let mut heap: BinaryHeap<Reverse<(Latency, NodeIndex)>> = BinaryHeap::new();

    dist[src.0] = Some(0);
    heap.push(Reverse((0, src)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if u == dst {
            break;
        }
        // Stale heap entry
        if dist[u.0].is_some_and(|best| d > best) {
            continue;
        }
        for (v, latency) in topology.active_neighbors(u) {
            let candidate = d.saturating_add(latency);
            if dist[v.0].map_or(true, |current| candidate < current) {
                dist[v.0] = Some(candidate);
                prev[v.0] = Some(u);
                heap.push(Reverse((candidate, v)));
            }
        }
    }

    let latency = dist[dst.0].ok_or_else(unreachable)?;

    let mut walk = vec![dst];
    let mut cursor = dst;
    while let Some(p) = prev[cursor.0] {
        walk.push(p);
        cursor = p;
    }
    walk.reverse();

    let nodes = walk
        .into_iter()
        .filter_map(|idx| topology.node(idx).map(|node| node.name.clone()))
        .collect();

    Ok(Path { nodes, latency })
}
