//! Append-only event log for availability changes and routing outcomes.

use std::collections::VecDeque;

use aegis_topology::{AvailabilityChange, Latency, Path};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome class of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Success,
    Failed,
    Info,
}

/// What the event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A node was set online
    NodeOnline,
    /// A node was set offline
    NodeOffline,
    /// A message routing attempt finished
    MessageRoute,
}

/// An immutable log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Position in the log, starting at 0 and never reused
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub status: EventStatus,
    pub event_type: EventKind,
    pub details: String,
    /// Nodes visited by a routing attempt (empty when no route existed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_taken: Option<Vec<String>>,
    /// Total latency of a successful delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_latency_ms: Option<Latency>,
}

/// An event before the log assigns its sequence number and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub status: EventStatus,
    pub event_type: EventKind,
    pub details: String,
    pub path_taken: Option<Vec<String>>,
    pub total_latency_ms: Option<Latency>,
}

impl EventRecord {
    /// Record for a node availability update.
    pub fn availability(change: &AvailabilityChange) -> Self {
        Self {
            status: EventStatus::Info,
            event_type: if change.current {
                EventKind::NodeOnline
            } else {
                EventKind::NodeOffline
            },
            details: change.describe(),
            path_taken: None,
            total_latency_ms: None,
        }
    }

    /// Record for a completed delivery.
    pub fn route_succeeded(path: &Path, payload_bytes: usize) -> Self {
        let from = path.source().unwrap_or_default();
        let to = path.destination().unwrap_or_default();
        Self {
            status: EventStatus::Success,
            event_type: EventKind::MessageRoute,
            details: format!(
                "Route from '{}' to '{}' SUCCEEDED via {} ({}ms, {} bytes).",
                from,
                to,
                path.display(),
                path.latency,
                payload_bytes
            ),
            path_taken: Some(path.nodes.clone()),
            total_latency_ms: Some(path.latency),
        }
    }

    /// Record for a routing attempt rejected before any hop was walked.
    pub fn route_unplanned(from: &str, to: &str, reason: &str) -> Self {
        Self {
            status: EventStatus::Failed,
            event_type: EventKind::MessageRoute,
            details: format!("Route from '{}' to '{}' FAILED: {}.", from, to, reason),
            path_taken: Some(Vec::new()),
            total_latency_ms: None,
        }
    }

    /// Record for a delivery aborted at an unavailable hop.
    pub fn route_interrupted(from: &str, to: &str, failed_hop: &str, travelled: &[String]) -> Self {
        Self {
            status: EventStatus::Failed,
            event_type: EventKind::MessageRoute,
            details: format!(
                "Route from '{}' to '{}' FAILED at hop '{}': node is offline.",
                from, to, failed_hop
            ),
            path_taken: Some(travelled.to_vec()),
            total_latency_ms: None,
        }
    }
}

/// How much history the log keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventRetention {
    /// Keep every event for the process lifetime
    #[default]
    Unbounded,
    /// Keep the most recent `n` events, evicting the oldest first.
    /// A capacity of zero keeps everything.
    Capacity(usize),
}

impl EventRetention {
    /// Retention from an optional capacity, where `0` or `None` means unbounded.
    pub fn from_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(n) if n > 0 => EventRetention::Capacity(n),
            _ => EventRetention::Unbounded,
        }
    }
}

/// Ordered, append-only event record.
///
/// Sequence numbers increase by one per append and timestamps never go
/// backwards, even if the wall clock does. With a capacity set, the oldest
/// events are dropped; the survivors keep their order and sequence numbers.
#[derive(Debug, Default)]
pub struct EventLog {
    events: VecDeque<Event>,
    retention: EventRetention,
    next_seq: u64,
    last_timestamp: Option<DateTime<Utc>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new(retention: EventRetention) -> Self {
        Self {
            events: VecDeque::new(),
            retention,
            next_seq: 0,
            last_timestamp: None,
        }
    }

    /// Append a record, returning the stored event.
    pub fn append(&mut self, record: EventRecord) -> &Event {
        self.append_at(record, Utc::now())
    }

    fn append_at(&mut self, record: EventRecord, now: DateTime<Utc>) -> &Event {
        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);

        let event = Event {
            seq: self.next_seq,
            timestamp,
            status: record.status,
            event_type: record.event_type,
            details: record.details,
            path_taken: record.path_taken,
            total_latency_ms: record.total_latency_ms,
        };
        self.next_seq += 1;

        if let EventRetention::Capacity(cap) = self.retention {
            while cap > 0 && self.events.len() >= cap {
                self.events.pop_front();
            }
        }
        self.events.push_back(event);
        &self.events[self.events.len() - 1]
    }

    /// All retained events, oldest first.
    pub fn list(&self) -> Vec<Event> {
        self.events.iter().cloned().collect()
    }

    /// Retained events with a sequence number greater than `seq`.
    pub fn since(&self, seq: u64) -> Vec<Event> {
        self.events.iter().filter(|e| e.seq > seq).cloned().collect()
    }

    /// Most recent event.
    pub fn last(&self) -> Option<&Event> {
        self.events.back()
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events ever appended, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.next_seq
    }
}
