//! schedule-flow: layout engine for calendar events on a zoomable timeline.
//!
//! The `core` pipeline is pure: resolve a view window, pack overlapping
//! events into rows, then map rows to fractional geometry. `api` wraps it in
//! a stateful, memoizing facade for host applications.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{LayoutError, LayoutResult};
