use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DayPeriod, LayoutConfig, ZoomLevels};
use crate::error::LayoutResult;

/// How the engine picks the view window for the reference date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    /// Fit the window to the events starting on the reference day.
    #[default]
    Auto,
    /// Show a fixed slice of the reference day.
    Period(DayPeriod),
}

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist and restore timeline setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub reference_date: DateTime<Utc>,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub zoom: ZoomLevels,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(reference_date: DateTime<Utc>) -> Self {
        Self {
            reference_date,
            view_mode: ViewMode::default(),
            zoom: ZoomLevels::default(),
            layout: LayoutConfig::default(),
        }
    }

    #[must_use]
    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomLevels) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn validate(self) -> LayoutResult<Self> {
        self.zoom.validate()?;
        self.layout.validate()?;
        Ok(self)
    }
}
