use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    Event, EventGeometry, EventId, EventRow, LayoutConfig, ViewWindow, ZoomLevels,
    content_height, content_width, map_geometry, pack_rows, resolve_view_window_in,
};
use crate::error::LayoutResult;

use super::ViewMode;

/// Output of one full layout pass: window, rows and per-event geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub window: ViewWindow,
    pub rows: Vec<EventRow>,
    pub geometry: IndexMap<EventId, EventGeometry>,
    pub content_width: f64,
    pub content_height: f64,
}

impl TimelineLayout {
    #[must_use]
    pub fn geometry_of(&self, id: &str) -> Option<&EventGeometry> {
        self.geometry.get(id)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Hour gridline instants across the window, computed on demand.
    pub fn hour_marks(&self) -> impl Iterator<Item = DateTime<Utc>> + use<> {
        self.window.hour_marks()
    }
}

/// Runs window resolution, row packing and geometry mapping from scratch.
pub fn build_layout<Tz: TimeZone>(
    events: &[Event],
    reference_date: DateTime<Utc>,
    view_mode: ViewMode,
    zoom: ZoomLevels,
    config: LayoutConfig,
    tz: &Tz,
) -> LayoutResult<TimelineLayout> {
    let window = match view_mode {
        ViewMode::Auto => resolve_view_window_in(events, reference_date, tz),
        ViewMode::Period(period) => ViewWindow::for_period(reference_date, period, tz),
    };
    let rows = pack_rows(events, &window);
    let geometry = map_geometry(&rows, &window, zoom, config)?;

    Ok(TimelineLayout {
        content_width: content_width(&window, zoom.horizontal, config),
        content_height: content_height(rows.len(), zoom.vertical, config),
        window,
        rows,
        geometry,
    })
}
