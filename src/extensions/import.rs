use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Event, EventId};
use crate::error::LayoutResult;

pub const DEFAULT_SUMMARY: &str = "No Title";

/// Loosely-typed event as handed over by a calendar parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub uid: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl EventRecord {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Turns parser records into layout events.
///
/// Records without a start are skipped. Missing or blank ids fall back to
/// `event-{index}`, a missing end equals the start, a blank summary becomes
/// [`DEFAULT_SUMMARY`] and other missing text fields become empty.
#[must_use]
pub fn normalize_records(records: &[EventRecord]) -> Vec<Event> {
    let mut events = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let Some(start) = record.start else {
            trace!(index, "skipping event record without start");
            continue;
        };

        let id = non_blank(record.uid.as_deref())
            .map_or_else(|| EventId::new(format!("event-{index}")), EventId::new);
        let summary = non_blank(record.summary.as_deref()).unwrap_or(DEFAULT_SUMMARY);

        events.push(Event {
            id,
            start,
            end: record.end.unwrap_or(start),
            summary: summary.to_owned(),
            description: record.description.clone().unwrap_or_default(),
            location: record.location.clone().unwrap_or_default(),
        });
    }

    debug!(
        record_count = records.len(),
        event_count = events.len(),
        "normalized event records"
    );
    events
}

/// Parses a JSON array of [`EventRecord`]s and normalizes it.
pub fn events_from_json(json: &str) -> LayoutResult<Vec<Event>> {
    let records: Vec<EventRecord> = serde_json::from_str(json)?;
    Ok(normalize_records(&records))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
