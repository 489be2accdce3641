//! Shared network state: the topology store plus its event log.
//!
//! Lock order is always topology, then events. An availability toggle holds
//! the topology write guard while it appends its event, so the log order
//! matches the order in which states changed.

use std::io;

use aegis_topology::{
    find_path, AvailabilityChange, Latency, Path, Topology, TopologySnapshot,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::Result;
use crate::events::{Event, EventLog, EventRecord, EventRetention};
use crate::report;

/// Link as seen from one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborStatus {
    pub name: String,
    pub latency: Latency,
}

/// Per-node status entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    /// Insertion index of the node
    pub id: usize,
    pub name: String,
    pub is_active: bool,
    /// Every linked node, online or not
    pub neighbors: Vec<NeighborStatus>,
}

/// Topology store and event log behind reader-writer locks.
#[derive(Debug)]
pub struct Network {
    topology: RwLock<Topology>,
    events: RwLock<EventLog>,
}

impl Network {
    /// Wrap a topology with an empty event log.
    pub fn new(topology: Topology, retention: EventRetention) -> Self {
        Self {
            topology: RwLock::new(topology),
            events: RwLock::new(EventLog::new(retention)),
        }
    }

    /// Node names in insertion order.
    pub async fn list_nodes(&self) -> Vec<String> {
        self.topology.read().await.list_nodes()
    }

    /// Full graph state.
    pub async fn snapshot(&self) -> TopologySnapshot {
        self.topology.read().await.snapshot()
    }

    /// Status of every node, sorted by name.
    pub async fn status(&self) -> Result<Vec<NodeStatus>> {
        let topo = self.topology.read().await;
        let mut status = Vec::with_capacity(topo.node_count());
        for (id, node) in topo.nodes().iter().enumerate() {
            let neighbors = topo
                .links_of(&node.name)?
                .into_iter()
                .map(|(name, latency)| NeighborStatus {
                    name: name.to_string(),
                    latency,
                })
                .collect();
            status.push(NodeStatus {
                id,
                name: node.name.clone(),
                is_active: node.is_active,
                neighbors,
            });
        }
        status.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(status)
    }

    /// Set a node online or offline and log the transition.
    ///
    /// Unknown nodes fail with `NotFound` and log nothing.
    pub async fn set_availability(&self, name: &str, active: bool) -> Result<AvailabilityChange> {
        let mut topo = self.topology.write().await;
        let change = topo.set_availability(name, active)?;

        let mut events = self.events.write().await;
        let event = events.append(EventRecord::availability(&change));
        info!(node = %change.node, active, changed = change.changed(), "{}", event.details);
        Ok(change)
    }

    /// Current availability of a node.
    pub async fn is_active(&self, name: &str) -> Result<bool> {
        Ok(self.topology.read().await.is_active(name)?)
    }

    /// Latency of the direct link between two nodes.
    pub async fn link_latency(&self, from: &str, to: &str) -> Result<Option<Latency>> {
        let topo = self.topology.read().await;
        let a = topo.index_of(from)?;
        let b = topo.index_of(to)?;
        Ok(topo.link_latency(a, b))
    }

    /// Lowest-latency path over the active subgraph.
    ///
    /// Runs against a single read guard, so availability cannot change
    /// halfway through the search.
    pub async fn find_path(&self, from: &str, to: &str) -> Result<Path> {
        let topo = self.topology.read().await;
        let path = find_path(&topo, from, to)?;
        debug!(from, to, latency = path.latency, hops = path.hops(), "path computed");
        Ok(path)
    }

    /// Append an event to the log.
    pub async fn record(&self, record: EventRecord) -> Event {
        self.events.write().await.append(record).clone()
    }

    /// All retained events, oldest first.
    pub async fn events(&self) -> Vec<Event> {
        self.events.read().await.list()
    }

    /// Retained events newer than `seq`.
    pub async fn events_since(&self, seq: u64) -> Vec<Event> {
        self.events.read().await.since(seq)
    }

    /// Number of retained events.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Write the retained events as a CSV report.
    pub async fn write_report<W: io::Write>(&self, writer: W) -> Result<usize> {
        let events = self.events().await;
        report::write_csv(&events, writer)
    }
}
