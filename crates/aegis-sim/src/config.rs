//! Simulator configuration: topology files and runtime settings.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use aegis_topology::{Latency, Topology};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::events::EventRetention;

/// Sample topology shipped with the crate, used when no file is given.
pub const DEMO_TOPOLOGY: &str = include_str!("../config/network.toml");

/// A node entry in a topology file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    /// Initial availability
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A link entry in a topology file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub from: String,
    pub to: String,
    /// Latency in milliseconds
    pub latency: Latency,
}

/// Static topology description.
///
/// ```toml
/// [[nodes]]
/// name = "A"
///
/// [[nodes]]
/// name = "B"
///
/// [[links]]
/// from = "A"
/// to = "B"
/// latency = 25
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

impl TopologyConfig {
    /// Read a TOML topology file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse a TOML topology description.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The bundled demo topology.
    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO_TOPOLOGY)
    }

    /// Build a topology, validating names and links.
    pub fn build(&self) -> Result<Topology> {
        let mut topology = Topology::new();
        for node in &self.nodes {
            topology
                .add_node(node.name.clone())
                .map_err(|e| Error::Config(e.to_string()))?;
        }
        for link in &self.links {
            topology
                .add_link(&link.from, &link.to, link.latency)
                .map_err(|e| Error::Config(e.to_string()))?;
        }
        for node in self.nodes.iter().filter(|n| !n.active) {
            topology
                .set_availability(&node.name, false)
                .map_err(|e| Error::Config(e.to_string()))?;
        }
        Ok(topology)
    }
}

/// Runtime settings for the simulator and its HTTP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// HTTP API listen address
    pub api_addr: SocketAddr,
    /// Topology file; the demo topology is used when absent
    pub topology_path: Option<PathBuf>,
    /// Maximum number of retained events (`None` keeps everything)
    pub event_capacity: Option<usize>,
    /// Sleep for each link's latency while walking a route
    pub simulate_delays: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            topology_path: None,
            event_capacity: None,
            simulate_delays: false,
        }
    }
}

impl SimulationConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// - `AEGIS_API_ADDR` (default `0.0.0.0:5000`)
    /// - `AEGIS_TOPOLOGY` path to a TOML topology file
    /// - `AEGIS_EVENT_CAPACITY` retained events, `0` for unbounded
    /// - `AEGIS_SIMULATE_DELAYS` `true`/`false`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("AEGIS_API_ADDR") {
            config.api_addr = addr
                .parse()
                .map_err(|_| Error::Config(format!("invalid AEGIS_API_ADDR '{}'", addr)))?;
        }

        config.topology_path = lookup("AEGIS_TOPOLOGY")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if let Some(cap) = lookup("AEGIS_EVENT_CAPACITY") {
            let cap: usize = cap
                .parse()
                .map_err(|_| Error::Config(format!("invalid AEGIS_EVENT_CAPACITY '{}'", cap)))?;
            config.event_capacity = Some(cap).filter(|&n| n > 0);
        }

        if let Some(flag) = lookup("AEGIS_SIMULATE_DELAYS") {
            config.simulate_delays = flag.parse().map_err(|_| {
                Error::Config(format!("invalid AEGIS_SIMULATE_DELAYS '{}'", flag))
            })?;
        }

        Ok(config)
    }

    /// Event retention policy implied by `event_capacity`.
    pub fn retention(&self) -> EventRetention {
        EventRetention::from_capacity(self.event_capacity)
    }

    /// Load the configured topology, or the demo one.
    pub fn load_topology(&self) -> Result<Topology> {
        let config = match &self.topology_path {
            Some(path) => TopologyConfig::load(path)?,
            None => TopologyConfig::demo()?,
        };
        config.build()
    }
}
