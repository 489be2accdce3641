//! Aegis Network Topology
//!
//! Weighted, undirected network topology with per-node availability and a
//! lowest-latency path engine.
//!
//! # Model
//!
//! - **Nodes** are identified by a unique, case-sensitive name and carry an
//!   `is_active` flag. They are created once and never removed.
//! - **Links** join two distinct nodes with a latency in milliseconds. They
//!   are static for the lifetime of the topology.
//! - The **active subgraph** is the set of active nodes and the links whose
//!   endpoints are both active. Routing only ever sees the active subgraph.
//!
//! # Path Engine
//!
//! [`find_path`] runs Dijkstra over the active subgraph. Results are
//! deterministic for identical inputs: ties keep the path discovered first
//! under link insertion order.
//!
//! ```
//! use aegis_topology::{Topology, find_path};
//!
//! let mut topo = Topology::new();
//! topo.add_node("A").unwrap();
//! topo.add_node("B").unwrap();
//! topo.add_node("C").unwrap();
//! topo.add_link("A", "B", 10).unwrap();
//! topo.add_link("B", "C", 20).unwrap();
//! topo.add_link("A", "C", 50).unwrap();
//!
//! let path = find_path(&topo, "A", "C").unwrap();
//! assert_eq!(path.nodes, vec!["A", "B", "C"]);
//! assert_eq!(path.latency, 30);
//! ```

mod error;
mod graph;
mod node;
mod path;

pub use error::{PathError, Result, TopologyError};
pub use graph::{AvailabilityChange, Topology, TopologySnapshot};
pub use node::{Latency, Link, Node, NodeIndex};
pub use path::{find_path, Path};
