//! Message routing simulation.
//!
//! Delivery happens in two phases. [`RoutingSimulator::plan`] computes the
//! lowest-latency path against one consistent view of the topology.
//! [`RoutingSimulator::deliver`] then walks that path and re-reads each
//! hop's live availability, so a node that went offline after planning
//! stops the message at that hop. [`RoutingSimulator::send_direct`] skips
//! planning and only delivers over a single link. Every outcome lands in
//! the event log.

use std::sync::Arc;
use std::time::Duration;

use aegis_topology::{Latency, Path};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::events::EventRecord;
use crate::network::Network;

/// A payload addressed from one node to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub source: String,
    pub destination: String,
    pub payload: String,
}

impl Message {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            payload: payload.into(),
        }
    }

    /// Payload size in bytes.
    pub fn payload_bytes(&self) -> usize {
        self.payload.len()
    }

    /// Whether a node is the intended receiver.
    pub fn is_addressed_to(&self, node: &str) -> bool {
        self.destination == node
    }
}

/// A message together with the path it will take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub message: Message,
    pub path: Path,
}

/// A successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub path: Path,
    /// Human-readable confirmation
    pub confirmation: String,
    /// Sequence number of the SUCCESS event
    pub event_seq: u64,
}

/// Routing settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterConfig {
    /// Sleep for each link's latency before checking the next hop
    pub simulate_delays: bool,
}

/// Plans and delivers messages over the shared network.
#[derive(Debug, Clone)]
pub struct RoutingSimulator {
    network: Arc<Network>,
    config: RouterConfig,
}

impl RoutingSimulator {
    pub fn new(network: Arc<Network>, config: RouterConfig) -> Self {
        Self { network, config }
    }

    /// Plan and deliver a message.
    pub async fn route(&self, message: Message) -> Result<Delivery> {
        let plan = self.plan(message).await?;
        self.deliver(plan).await
    }

    /// Compute the path for a message.
    ///
    /// An empty payload is rejected before any lookup and is not logged.
    /// Every other failure is logged as a FAILED routing event.
    pub async fn plan(&self, message: Message) -> Result<RoutePlan> {
        check_payload(&message)?;

        match self.network.find_path(&message.source, &message.destination).await {
            Ok(path) => Ok(RoutePlan { message, path }),
            Err(e) => Err(self.reject(&message, e).await),
        }
    }

    /// Send a message over the single link between two neighbors.
    ///
    /// No multi-hop search happens: nodes without a direct link fail with
    /// `NotNeighbors`. Both endpoints must be online when the message
    /// reaches them.
    pub async fn send_direct(&self, message: Message) -> Result<Delivery> {
        check_payload(&message)?;

        let latency = match self
            .network
            .link_latency(&message.source, &message.destination)
            .await
        {
            Ok(Some(latency)) => latency,
            Ok(None) => {
                let err = Error::NotNeighbors {
                    from: message.source.clone(),
                    to: message.destination.clone(),
                };
                return Err(self.reject(&message, err).await);
            }
            Err(e) => return Err(self.reject(&message, e).await),
        };

        let path = Path {
            nodes: vec![message.source.clone(), message.destination.clone()],
            latency,
        };
        self.deliver(RoutePlan { message, path }).await
    }

    /// Walk a planned path, re-checking each hop's availability.
    ///
    /// The plan must run from the message source to its destination over
    /// existing links, with a latency equal to the sum of those links.
    /// Delivery stops at the first offline hop; nodes past it are never
    /// visited.
    pub async fn deliver(&self, plan: RoutePlan) -> Result<Delivery> {
        let RoutePlan { message, path } = plan;

        let links = match self.link_latencies(&message, &path).await {
            Ok(links) => links,
            Err(e) => return Err(self.reject(&message, e).await),
        };

        let mut travelled: Vec<String> = Vec::with_capacity(path.nodes.len());
        for (i, hop) in path.nodes.iter().enumerate() {
            if self.config.simulate_delays && i > 0 {
                tokio::time::sleep(Duration::from_millis(links[i - 1])).await;
            }

            let active = match self.network.is_active(hop).await {
                Ok(active) => active,
                Err(e) => return Err(self.reject(&message, e).await),
            };

            if !active {
                let event = self
                    .network
                    .record(EventRecord::route_interrupted(
                        &message.source,
                        &message.destination,
                        hop,
                        &travelled,
                    ))
                    .await;
                warn!(seq = event.seq, hop = %hop, "{}", event.details);
                return Err(Error::HopOffline {
                    hop: hop.clone(),
                    travelled,
                });
            }
            travelled.push(hop.clone());
        }

        let event = self
            .network
            .record(EventRecord::route_succeeded(&path, message.payload_bytes()))
            .await;
        info!(seq = event.seq, "{}", event.details);

        let confirmation = format!(
            "Message delivered from '{}' to '{}' via {} in {}ms.",
            message.source,
            message.destination,
            path.display(),
            path.latency
        );
        Ok(Delivery {
            path,
            confirmation,
            event_seq: event.seq,
        })
    }

    /// Latency of each link along a plan, validating the plan on the way.
    async fn link_latencies(&self, message: &Message, path: &Path) -> Result<Vec<Latency>> {
        if path.source() != Some(message.source.as_str())
            || path.destination() != Some(message.destination.as_str())
        {
            return Err(Error::InvalidInput(format!(
                "route '{}' does not run from '{}' to '{}'",
                path.display(),
                message.source,
                message.destination
            )));
        }

        let mut links = Vec::with_capacity(path.hops());
        for pair in path.nodes.windows(2) {
            let latency = self
                .network
                .link_latency(&pair[0], &pair[1])
                .await?
                .ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "no link between '{}' and '{}'",
                        pair[0], pair[1]
                    ))
                })?;
            links.push(latency);
        }

        let total = links.iter().fold(0, |acc: Latency, l| acc.saturating_add(*l));
        if total != path.latency {
            return Err(Error::InvalidInput(format!(
                "route latency {}ms does not match its links ({}ms)",
                path.latency, total
            )));
        }
        Ok(links)
    }

    /// Log a failed routing attempt and hand the error back.
    async fn reject(&self, message: &Message, err: Error) -> Error {
        let reason = match &err {
            Error::NotFound(name) => format!("unknown node '{}'", name),
            Error::Unreachable { from, to } => format!("no route between '{}' and '{}'", from, to),
            Error::NotNeighbors { from, to } => {
                format!("'{}' and '{}' are not neighbors", from, to)
            }
            Error::InvalidInput(detail) => detail.clone(),
            other => other.to_string(),
        };
        let event = self
            .network
            .record(EventRecord::route_unplanned(
                &message.source,
                &message.destination,
                &reason,
            ))
            .await;
        warn!(seq = event.seq, "{}", event.details);
        err
    }
}

fn check_payload(message: &Message) -> Result<()> {
    if message.payload.is_empty() {
        return Err(Error::InvalidInput("message payload cannot be empty".into()));
    }
    Ok(())
}
