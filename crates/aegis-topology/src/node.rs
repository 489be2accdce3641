//! Nodes and links.

/// Link latency in milliseconds.
pub type Latency = u64;

/// Position of a node in insertion order.
///
/// Indices are dense and stable: nodes are never removed, so an index handed
/// out by [`Topology::add_node`](crate::Topology::add_node) stays valid for
/// the lifetime of the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    /// Raw index value.
    pub const fn value(&self) -> usize {
        self.0
    }
}

/// A named endpoint in the simulated network.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Unique, case-sensitive name
    pub name: String,
    /// Whether the node is currently online
    pub is_active: bool,
}

impl Node {
    /// Create an online node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_active: true,
        }
    }

    /// Take the node offline.
    pub fn take_offline(&mut self) {
        self.is_active = false;
    }

    /// Bring the node back online.
    pub fn bring_online(&mut self) {
        self.is_active = true;
    }
}

/// An undirected, latency-weighted connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    /// First endpoint (as given when the link was added)
    pub from: String,
    /// Second endpoint
    pub to: String,
    /// Latency in milliseconds
    pub latency: Latency,
}

impl Link {
    /// Check whether this link touches the named node.
    pub fn touches(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }

    /// The endpoint opposite `name`, if `name` is an endpoint.
    pub fn other(&self, name: &str) -> Option<&str> {
        if self.from == name {
            Some(self.to.as_str())
        } else if self.to == name {
            Some(self.from.as_str())
        } else {
            None
        }
    }
}
