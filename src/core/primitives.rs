use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};

/// Calendar day of `instant` as observed in `tz`.
#[must_use]
pub fn local_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// First instant of the local calendar day `day`.
#[must_use]
pub fn start_of_local_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    from_local(day.and_time(NaiveTime::MIN), tz)
}

/// Instant of the local wall-clock hour `hour` on `day`; `24` means the start
/// of the following day.
#[must_use]
pub fn at_local_hour<Tz: TimeZone>(day: NaiveDate, hour: u32, tz: &Tz) -> DateTime<Utc> {
    if hour >= 24 {
        return match day.checked_add_days(Days::new(1)) {
            Some(next) => start_of_local_day(next, tz),
            None => saturating_shift(start_of_local_day(day, tz), TimeDelta::days(1)),
        };
    }
    match NaiveTime::from_hms_opt(hour, 0, 0) {
        Some(time) => from_local(day.and_time(time), tz),
        None => start_of_local_day(day, tz),
    }
}

/// First instant of the local calendar day containing `instant`.
#[must_use]
pub fn start_of_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    start_of_local_day(local_day(instant, tz), tz)
}

/// Exclusive end of the local calendar day containing `instant`, i.e. the
/// start of the following day.
#[must_use]
pub fn end_of_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    at_local_hour(local_day(instant, tz), 24, tz)
}

/// Truncates `instant` to the start of its local hour.
#[must_use]
pub fn floor_to_hour<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let local = instant.with_timezone(tz).naive_local();
    let truncated = local
        .with_minute(0)
        .and_then(|value| value.with_second(0))
        .and_then(|value| value.with_nanosecond(0));
    match truncated {
        // A partial-hour DST gap can push the resolved hour past `instant`.
        Some(value) => from_local(value, tz).min(instant),
        None => instant,
    }
}

/// Rounds `instant` up to the next local hour boundary; whole hours are kept.
#[must_use]
pub fn ceil_to_hour<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let floor = floor_to_hour(instant, tz);
    if floor == instant {
        instant
    } else {
        saturating_shift(floor, TimeDelta::hours(1))
    }
}

/// `instant + delta`, clamped to the representable `DateTime<Utc>` range.
#[must_use]
pub fn saturating_shift(instant: DateTime<Utc>, delta: TimeDelta) -> DateTime<Utc> {
    instant.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

#[must_use]
pub fn delta_millis(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64
}

/// Maps a local wall-clock time to an absolute instant.
///
/// Ambiguous times (DST fall-back) pick the earlier instant; times inside a
/// DST gap move forward by the gap's typical one-hour width.
fn from_local<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    if let Some(value) = tz.from_local_datetime(&naive).earliest() {
        return value.with_timezone(&Utc);
    }
    naive
        .checked_add_signed(TimeDelta::hours(1))
        .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        .map_or_else(|| naive.and_utc(), |value| value.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn utc(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, minute, 0)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn day_bounds_follow_the_given_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).expect("offset");
        // 23:30 UTC on the 6th is 01:30 on the 7th at UTC+2.
        let instant = utc(6, 23, 30);

        assert_eq!(start_of_day(instant, &plus_two), utc(6, 22, 0));
        assert_eq!(end_of_day(instant, &plus_two), utc(7, 22, 0));
        assert_eq!(start_of_day(instant, &Utc), utc(6, 0, 0));
        assert_eq!(end_of_day(instant, &Utc), utc(7, 0, 0));
    }

    #[test]
    fn local_hours_map_onto_the_day() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).expect("date");
        assert_eq!(at_local_hour(day, 6, &Utc), utc(6, 6, 0));
        assert_eq!(at_local_hour(day, 24, &Utc), utc(7, 0, 0));
    }

    #[test]
    fn hour_rounding_keeps_whole_hours() {
        assert_eq!(floor_to_hour(utc(6, 9, 45), &Utc), utc(6, 9, 0));
        assert_eq!(ceil_to_hour(utc(6, 9, 45), &Utc), utc(6, 10, 0));
        assert_eq!(floor_to_hour(utc(6, 9, 0), &Utc), utc(6, 9, 0));
        assert_eq!(ceil_to_hour(utc(6, 9, 0), &Utc), utc(6, 9, 0));
    }

    #[test]
    fn shifts_saturate_at_the_representable_range() {
        let max = DateTime::<Utc>::MAX_UTC;
        let min = DateTime::<Utc>::MIN_UTC;
        assert_eq!(saturating_shift(max, TimeDelta::hours(1)), max);
        assert_eq!(saturating_shift(min, TimeDelta::hours(-1)), min);
        assert_eq!(saturating_shift(utc(6, 9, 0), TimeDelta::hours(1)), utc(6, 10, 0));
        assert_eq!(ceil_to_hour(max - TimeDelta::minutes(30), &Utc), max);
    }

    #[test]
    fn hour_rounding_uses_local_hours_for_half_hour_offsets() {
        let plus_five_thirty = FixedOffset::east_opt(5 * 3600 + 1800).expect("offset");
        // 09:45 UTC is 15:15 local; the local hour starts at 09:30 UTC.
        assert_eq!(floor_to_hour(utc(6, 9, 45), &plus_five_thirty), utc(6, 9, 30));
        assert_eq!(ceil_to_hour(utc(6, 9, 45), &plus_five_thirty), utc(6, 10, 30));
    }
}
