use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ZoomLevels;
use crate::error::LayoutResult;

use super::{TimelineLayout, ViewMode};

/// Every input a layout pass depends on, except the layout constants whose
/// changes clear the cache explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LayoutKey {
    pub(crate) generation: u64,
    pub(crate) reference_date: DateTime<Utc>,
    pub(crate) view_mode: ViewMode,
    pub(crate) horizontal_zoom: OrderedFloat<f64>,
    pub(crate) vertical_zoom: OrderedFloat<f64>,
}

impl LayoutKey {
    pub(crate) fn new(
        generation: u64,
        reference_date: DateTime<Utc>,
        view_mode: ViewMode,
        zoom: ZoomLevels,
    ) -> Self {
        Self {
            generation,
            reference_date,
            view_mode,
            horizontal_zoom: OrderedFloat(zoom.horizontal),
            vertical_zoom: OrderedFloat(zoom.vertical),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-entry memo of the latest layout pass.
#[derive(Debug, Default)]
pub(crate) struct LayoutCache {
    entry: Option<(LayoutKey, TimelineLayout)>,
    stats: LayoutCacheStats,
}

impl LayoutCache {
    pub(crate) fn get_or_try_insert_with(
        &mut self,
        key: LayoutKey,
        build: impl FnOnce() -> LayoutResult<TimelineLayout>,
    ) -> LayoutResult<&TimelineLayout> {
        let layout = match self.entry.take() {
            Some((cached_key, layout)) if cached_key == key => {
                self.stats.hits += 1;
                layout
            }
            _ => {
                self.stats.misses += 1;
                build()?
            }
        };
        Ok(&self.entry.insert((key, layout)).1)
    }

    pub(crate) fn clear(&mut self) {
        self.entry = None;
    }

    pub(crate) fn stats(&self) -> LayoutCacheStats {
        self.stats
    }
}
