//! Topology store: nodes, links and per-node availability.

use std::collections::HashMap;

use crate::error::{Result, TopologyError};
use crate::node::{Latency, Link, Node, NodeIndex};

/// Outcome of an availability update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityChange {
    /// Node that was updated
    pub node: String,
    /// Availability before the update
    pub previous: bool,
    /// Availability after the update
    pub current: bool,
}

impl AvailabilityChange {
    /// Whether the update actually flipped the flag.
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }

    /// Human-readable description of the transition.
    pub fn describe(&self) -> String {
        let state = if self.current { "online" } else { "offline" };
        if self.changed() {
            let verb = if self.current { "came" } else { "went" };
            format!("Node '{}' {} {}.", self.node, verb, state)
        } else {
            format!("Node '{}' is already {}.", self.node, state)
        }
    }
}

/// Full graph state at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologySnapshot {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

/// Weighted, undirected network topology.
///
/// Nodes and links are kept in insertion order. Adjacency lists mirror the
/// link order, which is what makes path search reproducible.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    by_name: HashMap<String, NodeIndex>,
    links: Vec<Link>,
    adjacency: Vec<Vec<(NodeIndex, Latency)>>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an online node.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<NodeIndex> {
        let name = name.into();
        if name.is_empty() {
            return Err(TopologyError::EmptyName);
        }
        if self.by_name.contains_key(&name) {
            return Err(TopologyError::DuplicateNode(name));
        }

        let idx = NodeIndex(self.nodes.len());
        self.by_name.insert(name.clone(), idx);
        self.nodes.push(Node::new(name));
        self.adjacency.push(Vec::new());
        Ok(idx)
    }

    /// Link two existing nodes.
    pub fn add_link(&mut self, from: &str, to: &str, latency: Latency) -> Result<()> {
        let a = self.index_of(from)?;
        let b = self.index_of(to)?;
        if a == b {
            return Err(TopologyError::SelfLoop(from.to_string()));
        }
        if self.adjacency[a.0].iter().any(|&(n, _)| n == b) {
            return Err(TopologyError::DuplicateLink {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        self.adjacency[a.0].push((b, latency));
        self.adjacency[b.0].push((a, latency));
        self.links.push(Link {
            from: from.to_string(),
            to: to.to_string(),
            latency,
        });
        Ok(())
    }

    /// Look up a node's index by name.
    pub fn index_of(&self, name: &str) -> Result<NodeIndex> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))
    }

    /// Node at an index.
    pub fn node(&self, idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(idx.0)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All links in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Node names in insertion order.
    pub fn list_nodes(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Copy of the full graph state.
    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot {
            nodes: self.nodes.clone(),
            links: self.links.clone(),
        }
    }

    /// Current availability of a node.
    pub fn is_active(&self, name: &str) -> Result<bool> {
        let idx = self.index_of(name)?;
        Ok(self.nodes[idx.0].is_active)
    }

    /// Set a node online or offline.
    ///
    /// Setting a node to the state it is already in succeeds and reports an
    /// unchanged transition.
    pub fn set_availability(&mut self, name: &str, active: bool) -> Result<AvailabilityChange> {
        let idx = self.index_of(name)?;
        let node = &mut self.nodes[idx.0];
        let previous = node.is_active;
        if active {
            node.bring_online();
        } else {
            node.take_offline();
        }
        Ok(AvailabilityChange {
            node: node.name.clone(),
            previous,
            current: active,
        })
    }

    /// Neighbors reachable over links whose endpoints are both active.
    ///
    /// An inactive node has no neighbors.
    pub fn neighbors_of(&self, name: &str) -> Result<Vec<(String, Latency)>> {
        let idx = self.index_of(name)?;
        Ok(self
            .active_neighbors(idx)
            .map(|(n, latency)| (self.nodes[n.0].name.clone(), latency))
            .collect())
    }

    /// Every link of a node, regardless of availability.
    pub fn links_of(&self, name: &str) -> Result<Vec<(&str, Latency)>> {
        let idx = self.index_of(name)?;
        Ok(self.adjacency[idx.0]
            .iter()
            .map(|&(n, latency)| (self.nodes[n.0].name.as_str(), latency))
            .collect())
    }

    /// Active neighbors by index, in link insertion order.
    pub(crate) fn active_neighbors(
        &self,
        idx: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, Latency)> + '_ {
        let source_active = self.nodes[idx.0].is_active;
        self.adjacency[idx.0]
            .iter()
            .copied()
            .filter(move |&(n, _)| source_active && self.nodes[n.0].is_active)
    }

    /// Latency of the direct link between two nodes, if any.
    pub fn link_latency(&self, from: NodeIndex, to: NodeIndex) -> Option<Latency> {
        self.adjacency
            .get(from.0)?
            .iter()
            .find(|&&(n, _)| n == to)
            .map(|&(_, latency)| latency)
    }
}
