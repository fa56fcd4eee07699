use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::primitives::delta_millis;
use crate::core::{EventId, EventRow, ViewWindow};
use crate::error::{LayoutError, LayoutResult};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 15.0;

/// Independent horizontal and vertical zoom factors.
///
/// Horizontal zoom widens the scrollable content; vertical zoom scales row
/// heights and gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLevels {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for ZoomLevels {
    fn default() -> Self {
        Self {
            horizontal: MIN_ZOOM,
            vertical: MIN_ZOOM,
        }
    }
}

impl ZoomLevels {
    pub fn new(horizontal: f64, vertical: f64) -> LayoutResult<Self> {
        Self {
            horizontal,
            vertical,
        }
        .validate()
    }

    pub fn validate(self) -> LayoutResult<Self> {
        for (value, axis) in [(self.horizontal, "horizontal"), (self.vertical, "vertical")] {
            if !value.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&value) {
                return Err(LayoutError::InvalidZoom { axis, value });
            }
        }
        Ok(self)
    }
}

/// Fixed layout constants, in unscaled length units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub base_row_height: f64,
    pub row_gap: f64,
    pub base_hour_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            // 28 px card plus 8 px vertical padding.
            base_row_height: 36.0,
            row_gap: 8.0,
            base_hour_width: 100.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> LayoutResult<Self> {
        for (value, name) in [
            (self.base_row_height, "base_row_height"),
            (self.base_hour_width, "base_hour_width"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidData(format!(
                    "layout config `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.row_gap.is_finite() || self.row_gap < 0.0 {
            return Err(LayoutError::InvalidData(
                "layout config `row_gap` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Vertical extent shared by every event of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowBand {
    pub top: f64,
    pub height: f64,
}

/// Rendering geometry of one placed event.
///
/// `left_fraction` and `width_fraction` are fractions of the view window and
/// are independent of horizontal zoom; `top` and `height` are length units
/// already scaled by vertical zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventGeometry {
    pub row: usize,
    pub left_fraction: f64,
    pub width_fraction: f64,
    pub top: f64,
    pub height: f64,
}

impl EventGeometry {
    /// Projects the fractional geometry onto content of the given width.
    #[must_use]
    pub fn to_pixels(self, content_width: f64) -> PixelRect {
        PixelRect {
            x: self.left_fraction * content_width,
            y: self.top,
            width: self.width_fraction * content_width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[must_use]
pub fn row_band(row: usize, vertical_zoom: f64, config: LayoutConfig) -> RowBand {
    let height = config.base_row_height * vertical_zoom;
    let gap = config.row_gap * vertical_zoom;
    RowBand {
        top: gap + row as f64 * (height + gap),
        height,
    }
}

/// Total height of `row_count` stacked rows including the leading and
/// trailing gap.
#[must_use]
pub fn content_height(row_count: usize, vertical_zoom: f64, config: LayoutConfig) -> f64 {
    let height = config.base_row_height * vertical_zoom;
    let gap = config.row_gap * vertical_zoom;
    gap + row_count as f64 * (height + gap)
}

/// Scrollable content width: one `base_hour_width` column per started hour.
#[must_use]
pub fn content_width(window: &ViewWindow, horizontal_zoom: f64, config: LayoutConfig) -> f64 {
    window.hours_in_view() as f64 * config.base_hour_width * horizontal_zoom
}

/// Maps packed rows to per-event geometry inside `window`.
///
/// Event intervals are clamped to the window; fractions stay in `[0, 1]` and
/// inverted events get a zero width.
///
/// # Errors
///
/// [`LayoutError::DegenerateWindow`] when `window.end <= window.start`; this is
/// the only failure inherent to the mapping. Zoom outside
/// [`MIN_ZOOM`]..=[`MAX_ZOOM`] and invalid [`LayoutConfig`] values are
/// rejected too, as caller-contract checks on inputs the engine already
/// validates.
pub fn map_geometry(
    rows: &[EventRow],
    window: &ViewWindow,
    zoom: ZoomLevels,
    config: LayoutConfig,
) -> LayoutResult<IndexMap<EventId, EventGeometry>> {
    window.ensure_non_degenerate()?;
    let zoom = zoom.validate()?;
    let config = config.validate()?;

    let total = delta_millis(window.duration());
    let mut geometry = IndexMap::with_capacity(rows.iter().map(EventRow::len).sum());

    for (row_index, row) in rows.iter().enumerate() {
        let band = row_band(row_index, zoom.vertical, config);
        for event in row {
            let clamped_start = event.start.max(window.start);
            let clamped_end = event.end.min(window.end);

            let left_fraction = (delta_millis(clamped_start - window.start) / total).clamp(0.0, 1.0);
            let width_fraction = (delta_millis(clamped_end - clamped_start) / total)
                .clamp(0.0, 1.0 - left_fraction);

            let previous = geometry.insert(
                event.id.clone(),
                EventGeometry {
                    row: row_index,
                    left_fraction,
                    width_fraction,
                    top: band.top,
                    height: band.height,
                },
            );
            if previous.is_some() {
                warn!(id = %event.id, "duplicate event id; keeping the later placement");
            }
        }
    }

    trace!(
        rows = rows.len(),
        events = geometry.len(),
        "mapped event geometry"
    );
    Ok(geometry)
}
