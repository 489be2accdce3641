//! CSV export of the event log.

use std::io;

use serde::Serialize;

use crate::error::Result;
use crate::events::{Event, EventKind, EventStatus};

/// Column order of the report.
pub const REPORT_HEADERS: [&str; 6] = [
    "timestamp",
    "event_type",
    "details",
    "status",
    "path_taken",
    "total_latency_ms",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    timestamp: String,
    event_type: EventKind,
    details: &'a str,
    status: EventStatus,
    path_taken: String,
    total_latency_ms: String,
}

impl<'a> ReportRow<'a> {
    fn new(event: &'a Event) -> Self {
        // Route columns are only meaningful for routing events
        let routed = event.event_type == EventKind::MessageRoute;
        let path_taken = match &event.path_taken {
            Some(nodes) if !nodes.is_empty() => nodes.join(" -> "),
            _ if routed => "No path found".to_string(),
            _ => String::new(),
        };
        let total_latency_ms = match event.total_latency_ms {
            Some(ms) => ms.to_string(),
            None if routed => "N/A".to_string(),
            None => String::new(),
        };

        Self {
            timestamp: event.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            event_type: event.event_type,
            details: &event.details,
            status: event.status,
            path_taken,
            total_latency_ms,
        }
    }
}

/// Write events as CSV, header row first.
///
/// Returns the number of event rows written.
pub fn write_csv<W: io::Write>(events: &[Event], writer: W) -> Result<usize> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(REPORT_HEADERS)?;
    for event in events {
        csv.serialize(ReportRow::new(event))?;
    }
    csv.flush()?;

    Ok(events.len())
}
