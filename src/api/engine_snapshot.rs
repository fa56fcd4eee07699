use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{EventGeometry, EventId, ViewWindow, ZoomLevels};

use super::{TimelineLayout, ViewMode};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub reference_date: DateTime<Utc>,
    pub view_mode: ViewMode,
    pub zoom: ZoomLevels,
    pub event_count: usize,
    pub window: ViewWindow,
    pub rows: Vec<Vec<EventId>>,
    pub geometry: IndexMap<EventId, EventGeometry>,
    pub content_width: f64,
    pub content_height: f64,
    pub selected: Vec<EventId>,
}

impl TimelineSnapshot {
    pub(crate) fn from_layout(
        layout: &TimelineLayout,
        reference_date: DateTime<Utc>,
        view_mode: ViewMode,
        zoom: ZoomLevels,
        event_count: usize,
        selected: Vec<EventId>,
    ) -> Self {
        Self {
            reference_date,
            view_mode,
            zoom,
            event_count,
            window: layout.window,
            rows: layout
                .rows
                .iter()
                .map(|row| row.iter().map(|event| event.id.clone()).collect())
                .collect(),
            geometry: layout.geometry.clone(),
            content_width: layout.content_width,
            content_height: layout.content_height,
            selected,
        }
    }
}
