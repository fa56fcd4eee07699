use std::collections::HashSet;

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{debug, trace};

use crate::core::{
    Event, EventId, LayoutConfig, ZoomLevels, reference_day_from_events_in,
};
use crate::error::LayoutResult;

use super::layout_cache::{LayoutCache, LayoutKey};
use super::{
    LayoutCacheStats, SelectionSet, TimelineEngineConfig, TimelineLayout, TimelineSnapshot,
    ViewMode, build_layout,
};

/// Stateful facade over the layout pipeline.
///
/// Holds the current event set and view inputs, and recomputes the full
/// layout lazily whenever one of them changed since the last pass.
pub struct TimelineEngine<Tz: TimeZone = Local> {
    tz: Tz,
    events: Vec<Event>,
    generation: u64,
    reference_date: DateTime<Utc>,
    view_mode: ViewMode,
    zoom: ZoomLevels,
    layout_config: LayoutConfig,
    selection: SelectionSet,
    cache: LayoutCache,
}

impl TimelineEngine<Local> {
    /// Creates an engine that resolves calendar days in the host's time zone.
    pub fn new(config: TimelineEngineConfig) -> LayoutResult<Self> {
        Self::with_timezone(config, Local)
    }
}

impl<Tz: TimeZone> TimelineEngine<Tz> {
    pub fn with_timezone(config: TimelineEngineConfig, tz: Tz) -> LayoutResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            tz,
            events: Vec::new(),
            generation: 0,
            reference_date: config.reference_date,
            view_mode: config.view_mode,
            zoom: config.zoom,
            layout_config: config.layout,
            selection: SelectionSet::default(),
            cache: LayoutCache::default(),
        })
    }

    /// Replaces the event set.
    ///
    /// A non-empty set moves the reference date to the day of its earliest
    /// event. Selected ids missing from the new set are dropped.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(day) = reference_day_from_events_in(&events, &self.tz) {
            self.reference_date = day;
        }
        self.events = events;

        let known: HashSet<&EventId> = self.events.iter().map(|event| &event.id).collect();
        let dropped_selection = self.selection.retain(|id| known.contains(id));
        debug!(
            count = self.events.len(),
            generation = self.generation,
            dropped_selection,
            reference_date = %self.reference_date,
            "set events"
        );
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Identity of the current event set; bumps on every `set_events`.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn reference_date(&self) -> DateTime<Utc> {
        self.reference_date
    }

    pub fn set_reference_date(&mut self, reference_date: DateTime<Utc>) {
        trace!(%reference_date, "set reference date");
        self.reference_date = reference_date;
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        trace!(?view_mode, "set view mode");
        self.view_mode = view_mode;
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomLevels {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevels) -> LayoutResult<()> {
        self.zoom = zoom.validate()?;
        trace!(
            horizontal = self.zoom.horizontal,
            vertical = self.zoom.vertical,
            "set zoom"
        );
        Ok(())
    }

    pub fn set_horizontal_zoom(&mut self, horizontal: f64) -> LayoutResult<()> {
        self.set_zoom(ZoomLevels {
            horizontal,
            ..self.zoom
        })
    }

    pub fn set_vertical_zoom(&mut self, vertical: f64) -> LayoutResult<()> {
        self.set_zoom(ZoomLevels {
            vertical,
            ..self.zoom
        })
    }

    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig {
        self.layout_config
    }

    pub fn set_layout_config(&mut self, layout_config: LayoutConfig) -> LayoutResult<()> {
        self.layout_config = layout_config.validate()?;
        self.cache.clear();
        Ok(())
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Toggles selection of `id`; returns whether it is selected afterwards.
    pub fn toggle_selection(&mut self, id: impl Into<EventId>) -> bool {
        let id = id.into();
        let selected = self.selection.toggle(id.clone());
        trace!(%id, selected, "toggle selection");
        selected
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Returns the layout for the current inputs, recomputing it when stale.
    pub fn layout(&mut self) -> LayoutResult<&TimelineLayout> {
        let key = LayoutKey::new(
            self.generation,
            self.reference_date,
            self.view_mode,
            self.zoom,
        );
        let Self {
            tz,
            events,
            reference_date,
            view_mode,
            zoom,
            layout_config,
            cache,
            ..
        } = self;
        cache.get_or_try_insert_with(key, || {
            debug!(events = events.len(), "recomputing timeline layout");
            build_layout(events, *reference_date, *view_mode, *zoom, *layout_config, &*tz)
        })
    }

    #[must_use]
    pub fn cache_stats(&self) -> LayoutCacheStats {
        self.cache.stats()
    }

    pub fn snapshot(&mut self) -> LayoutResult<TimelineSnapshot> {
        let reference_date = self.reference_date;
        let view_mode = self.view_mode;
        let zoom = self.zoom;
        let event_count = self.events.len();
        let selected: Vec<EventId> = self.selection.iter().cloned().collect();
        let layout = self.layout()?;
        Ok(TimelineSnapshot::from_layout(
            layout,
            reference_date,
            view_mode,
            zoom,
            event_count,
            selected,
        ))
    }

    pub fn snapshot_json_pretty(&mut self) -> LayoutResult<String> {
        let snapshot = self.snapshot()?;
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}
