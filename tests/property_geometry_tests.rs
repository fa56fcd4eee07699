use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use schedule_flow::core::{Event, LayoutConfig, ViewWindow, ZoomLevels, map_geometry, pack_rows};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0)
        .single()
        .expect("valid instant")
}

fn events_strategy() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((0i64..1_440, -60i64..600), 0..32).prop_map(|draws| {
        draws
            .into_iter()
            .enumerate()
            .map(|(index, (start, duration))| {
                let start = base() + TimeDelta::minutes(start);
                Event::new(format!("e{index}"), start, start + TimeDelta::minutes(duration))
            })
            .collect()
    })
}

fn window_strategy() -> impl Strategy<Value = ViewWindow> {
    (0i64..1_200, 1i64..720).prop_map(|(start, span)| {
        let start = base() + TimeDelta::minutes(start);
        ViewWindow::new(start, start + TimeDelta::minutes(span)).expect("valid window")
    })
}

proptest! {
    #[test]
    fn fractions_stay_inside_the_window(
        events in events_strategy(),
        window in window_strategy(),
        horizontal in 1.0f64..15.0,
        vertical in 1.0f64..15.0
    ) {
        let rows = pack_rows(&events, &window);
        let zoom = ZoomLevels::new(horizontal, vertical).expect("zoom");
        let geometry = map_geometry(&rows, &window, zoom, LayoutConfig::default()).expect("geometry");

        for item in geometry.values() {
            prop_assert!(item.left_fraction.is_finite() && item.width_fraction.is_finite());
            prop_assert!(item.left_fraction >= 0.0);
            prop_assert!(item.width_fraction >= 0.0);
            prop_assert!(item.left_fraction + item.width_fraction <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn vertical_geometry_scales_linearly(
        events in events_strategy(),
        window in window_strategy(),
        vertical in 1.0f64..7.5
    ) {
        let rows = pack_rows(&events, &window);
        let config = LayoutConfig::default();
        let single = map_geometry(&rows, &window, ZoomLevels::new(1.0, vertical).expect("zoom"), config)
            .expect("geometry");
        let double = map_geometry(&rows, &window, ZoomLevels::new(1.0, vertical * 2.0).expect("zoom"), config)
            .expect("geometry");

        for (id, item) in &single {
            let scaled = double[id];
            prop_assert!((scaled.top - 2.0 * item.top).abs() <= 1e-9 * scaled.top.max(1.0));
            prop_assert!((scaled.height - 2.0 * item.height).abs() <= 1e-9 * scaled.height.max(1.0));
            prop_assert_eq!(scaled.left_fraction, item.left_fraction);
            prop_assert_eq!(scaled.width_fraction, item.width_fraction);
        }
    }
}
