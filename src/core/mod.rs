pub mod geometry;
pub mod packing;
pub mod primitives;
pub mod types;
pub mod view_window;

pub use geometry::{
    EventGeometry, LayoutConfig, MAX_ZOOM, MIN_ZOOM, PixelRect, RowBand, ZoomLevels,
    content_height, content_width, map_geometry, row_band,
};
pub use packing::{EventRow, pack_rows, peak_concurrency};
pub use types::{Event, EventId};
pub use view_window::{
    DayPeriod, ViewWindow, reference_day_from_events, reference_day_from_events_in,
    resolve_view_window, resolve_view_window_in,
};
