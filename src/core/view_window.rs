use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Event;
use crate::core::primitives::{
    at_local_hour, ceil_to_hour, delta_millis, end_of_day, floor_to_hour, local_day,
    saturating_shift, start_of_day,
};
use crate::error::{LayoutError, LayoutResult};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Half-open `[start, end)` instant range rendered on the timeline.
///
/// Windows built by this module always satisfy `end > start`. The fields are
/// public so hosts can build custom ranges; `ViewWindow::new` validates, and
/// geometry mapping rejects a degenerate window built by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ViewWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> LayoutResult<Self> {
        let window = Self { start, end };
        window.ensure_non_degenerate()?;
        Ok(window)
    }

    /// The full local calendar day containing `reference`.
    #[must_use]
    pub fn full_day<Tz: TimeZone>(reference: DateTime<Utc>, tz: &Tz) -> Self {
        Self {
            start: start_of_day(reference, tz),
            end: end_of_day(reference, tz),
        }
    }

    /// A fixed slice of the local calendar day containing `reference`.
    #[must_use]
    pub fn for_period<Tz: TimeZone>(reference: DateTime<Utc>, period: DayPeriod, tz: &Tz) -> Self {
        let day = local_day(reference, tz);
        let (start_hour, end_hour) = period.hours();
        Self {
            start: at_local_hour(day, start_hour, tz),
            end: at_local_hour(day, end_hour, tz),
        }
    }

    pub fn ensure_non_degenerate(&self) -> LayoutResult<()> {
        if self.end <= self.start {
            return Err(LayoutError::DegenerateWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    #[must_use]
    pub fn intersects(&self, event: &Event) -> bool {
        event.intersects(self.start, self.end)
    }

    /// Position of `instant` as a fraction of the window, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction_of(&self, instant: DateTime<Utc>) -> f64 {
        let total = delta_millis(self.duration());
        if total <= 0.0 {
            return 0.0;
        }
        (delta_millis(instant - self.start) / total).clamp(0.0, 1.0)
    }

    /// Number of hour columns needed to cover the window (partial hours round up).
    #[must_use]
    pub fn hours_in_view(&self) -> usize {
        let millis = self.duration().num_milliseconds();
        if millis <= 0 {
            return 0;
        }
        usize::try_from((millis + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR).unwrap_or(usize::MAX)
    }

    /// Hour gridline instants `start, start + 1h, ...` strictly before `end`,
    /// produced on demand.
    pub fn hour_marks(&self) -> impl Iterator<Item = DateTime<Utc>> + use<> {
        let start = self.start;
        (0..self.hours_in_view()).map_while(move |index| {
            i64::try_from(index)
                .ok()
                .and_then(TimeDelta::try_hours)
                .and_then(|offset| start.checked_add_signed(offset))
        })
    }
}

/// Preset slices of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPeriod {
    AllDay,
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::AllDay,
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
    ];

    /// Local `(start_hour, end_hour)`; `24` is the following midnight.
    #[must_use]
    pub fn hours(self) -> (u32, u32) {
        match self {
            DayPeriod::AllDay => (0, 24),
            DayPeriod::Morning => (6, 12),
            DayPeriod::Afternoon => (12, 18),
            DayPeriod::Evening => (18, 24),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DayPeriod::AllDay => "All Day",
            DayPeriod::Morning => "Morning (6-12)",
            DayPeriod::Afternoon => "Afternoon (12-18)",
            DayPeriod::Evening => "Evening (18-24)",
        }
    }
}

/// Resolves the view window in the host's local time zone.
#[must_use]
pub fn resolve_view_window(events: &[Event], reference: DateTime<Utc>) -> ViewWindow {
    resolve_view_window_in(events, reference, &Local)
}

/// Derives the window to display for `reference` from the events starting on
/// that local day.
///
/// Falls back to the full reference day when no event starts on it. Otherwise
/// the window spans the day's events rounded out to whole hours plus one hour
/// of padding on each side.
#[must_use]
pub fn resolve_view_window_in<Tz: TimeZone>(
    events: &[Event],
    reference: DateTime<Utc>,
    tz: &Tz,
) -> ViewWindow {
    let day = local_day(reference, tz);
    let mut on_day = events.iter().filter(|event| local_day(event.start, tz) == day);

    let Some(first) = on_day.next() else {
        trace!(events = events.len(), %day, "no events on reference day; using full day");
        return ViewWindow::full_day(reference, tz);
    };

    let (earliest, latest) = on_day.fold((first.start, first.end), |(lo, hi), event| {
        (lo.min(event.start), hi.max(event.end))
    });
    // Inverted events must not pull the end before the start.
    let latest = latest.max(earliest);

    let window = ViewWindow {
        start: saturating_shift(floor_to_hour(earliest, tz), TimeDelta::hours(-1)),
        end: saturating_shift(ceil_to_hour(latest, tz), TimeDelta::hours(1)),
    };
    if window.ensure_non_degenerate().is_err() {
        trace!(start = %window.start, end = %window.end, "clamped window collapsed; using full day");
        return ViewWindow::full_day(reference, tz);
    }
    trace!(start = %window.start, end = %window.end, "resolved view window");
    window
}

/// Start of the local day of the earliest event, in the host's time zone.
#[must_use]
pub fn reference_day_from_events(events: &[Event]) -> Option<DateTime<Utc>> {
    reference_day_from_events_in(events, &Local)
}

/// Start of the local day of the earliest event; `None` for an empty set.
#[must_use]
pub fn reference_day_from_events_in<Tz: TimeZone>(
    events: &[Event],
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    events
        .iter()
        .map(|event| event.start)
        .min()
        .map(|earliest| start_of_day(earliest, tz))
}
