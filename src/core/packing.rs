use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Event, ViewWindow};

/// One horizontal lane of the timeline.
///
/// Members are kept in placement order and never overlap each other under the
/// half-open interval test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub events: Vec<Event>,
}

impl EventRow {
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Returns `true` when `event` overlaps no current member.
    #[must_use]
    pub fn accepts(&self, event: &Event) -> bool {
        !self.events.iter().any(|member| member.overlaps(event))
    }
}

impl<'a> IntoIterator for &'a EventRow {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Packs the events intersecting `window` into the fewest non-overlapping rows.
///
/// Events are sorted by start, longer events first on equal starts, then by
/// id; each is placed in the first row it fits, or opens a new row. For
/// positive-duration events the row count equals [`peak_concurrency`].
/// Zero- and negative-duration events are placed as given.
#[must_use]
pub fn pack_rows(events: &[Event], window: &ViewWindow) -> Vec<EventRow> {
    let mut visible: Vec<&Event> = events
        .iter()
        .filter(|event| window.intersects(event))
        .collect();

    visible.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| b.duration().cmp(&a.duration()))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut rows: Vec<EventRow> = Vec::new();
    for event in visible.iter().copied() {
        match rows.iter_mut().find(|row| row.accepts(event)) {
            Some(row) => row.events.push(event.clone()),
            None => rows.push(EventRow {
                events: vec![event.clone()],
            }),
        }
    }

    debug!(
        input_count = events.len(),
        visible_count = visible.len(),
        row_count = rows.len(),
        "packed event rows"
    );
    rows
}

/// Maximum number of positive-duration events intersecting `window` that
/// cover a single instant.
#[must_use]
pub fn peak_concurrency(events: &[Event], window: &ViewWindow) -> usize {
    let mut edges: Vec<(DateTime<Utc>, i32)> = Vec::with_capacity(events.len() * 2);
    for event in events
        .iter()
        .filter(|event| event.start < event.end && window.intersects(event))
    {
        edges.push((event.start, 1));
        edges.push((event.end, -1));
    }
    // Ends sort before starts at the same instant: touching events do not overlap.
    edges.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut current: i64 = 0;
    let mut peak: i64 = 0;
    for (_, delta) in edges {
        current += i64::from(delta);
        peak = peak.max(current);
    }
    usize::try_from(peak).unwrap_or(0)
}
