mod engine;
mod engine_config;
mod engine_snapshot;
mod layout_cache;
mod selection;
mod timeline_layout;

pub use engine::TimelineEngine;
pub use engine_config::{TimelineEngineConfig, ViewMode};
pub use engine_snapshot::TimelineSnapshot;
pub use layout_cache::LayoutCacheStats;
pub use selection::SelectionSet;
pub use timeline_layout::{TimelineLayout, build_layout};
