//! Aegis Network Simulator
//!
//! In-memory network simulation behind an HTTP API for the Aegis dashboard.
//!
//! # Architecture
//!
//! - **Network**: Topology store and event log behind reader-writer locks
//! - **Simulation**: Plans a route, then walks it hop by hop against live
//!   node availability
//! - **Events**: Append-only log of availability changes and routing outcomes
//! - **Report**: CSV export of the event log
//! - **Server**: Axum REST API for the dashboard
//!
//! # Usage
//!
//! ```no_run
//! use aegis_sim::{AegisServer, SimulationConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SimulationConfig::from_env()?;
//!     let server = AegisServer::from_config(&config)?;
//!     server.serve(config.api_addr).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod network;
pub mod report;
pub mod server;
pub mod simulation;

pub use config::{SimulationConfig, TopologyConfig};
pub use error::{Error, Result};
pub use events::{Event, EventKind, EventLog, EventRecord, EventRetention, EventStatus};
pub use network::{NeighborStatus, Network, NodeStatus};
pub use server::AegisServer;
pub use simulation::{Delivery, Message, RoutePlan, RouterConfig, RoutingSimulator};
