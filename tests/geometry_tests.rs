use approx::assert_abs_diff_eq;
use chrono::{DateTime, TimeZone, Utc};
use schedule_flow::LayoutError;
use schedule_flow::core::{
    Event, LayoutConfig, ViewWindow, ZoomLevels, content_height, content_width, map_geometry,
    pack_rows,
};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, hour, minute, 0)
        .single()
        .expect("valid instant")
}

fn window() -> ViewWindow {
    ViewWindow::new(at(9, 0), at(11, 0)).expect("valid window")
}

#[test]
fn fractions_are_relative_to_the_window() {
    let events = vec![Event::new("b", at(9, 30), at(10, 30))];
    let rows = pack_rows(&events, &window());
    let geometry = map_geometry(&rows, &window(), ZoomLevels::default(), LayoutConfig::default())
        .expect("geometry");

    let b = geometry.get("b").expect("b geometry");
    assert_abs_diff_eq!(b.left_fraction, 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(b.width_fraction, 0.5, epsilon = 1e-12);
}

#[test]
fn intervals_are_clamped_to_the_window() {
    let events = vec![
        Event::new("leading", at(8, 0), at(9, 30)),
        Event::new("trailing", at(10, 30), at(12, 0)),
        Event::new("covering", at(7, 0), at(13, 0)),
    ];
    let rows = pack_rows(&events, &window());
    let geometry = map_geometry(&rows, &window(), ZoomLevels::default(), LayoutConfig::default())
        .expect("geometry");

    let leading = geometry["leading"];
    assert_abs_diff_eq!(leading.left_fraction, 0.0);
    assert_abs_diff_eq!(leading.width_fraction, 0.25, epsilon = 1e-12);

    let trailing = geometry["trailing"];
    assert_abs_diff_eq!(trailing.left_fraction, 0.75, epsilon = 1e-12);
    assert_abs_diff_eq!(trailing.width_fraction, 0.25, epsilon = 1e-12);

    let covering = geometry["covering"];
    assert_abs_diff_eq!(covering.left_fraction, 0.0);
    assert_abs_diff_eq!(covering.width_fraction, 1.0);
}

#[test]
fn inverted_event_gets_zero_width() {
    let events = vec![Event::new("inverted", at(10, 0), at(9, 30))];
    let rows = pack_rows(&events, &window());
    let geometry = map_geometry(&rows, &window(), ZoomLevels::default(), LayoutConfig::default())
        .expect("geometry");

    let inverted = geometry["inverted"];
    assert_abs_diff_eq!(inverted.left_fraction, 0.5, epsilon = 1e-12);
    assert_eq!(inverted.width_fraction, 0.0);
    assert!(inverted.left_fraction.is_finite());
}

#[test]
fn hand_built_degenerate_window_fails_fast() {
    let degenerate = ViewWindow {
        start: at(9, 0),
        end: at(9, 0),
    };
    let result = map_geometry(&[], &degenerate, ZoomLevels::default(), LayoutConfig::default());
    assert!(matches!(result, Err(LayoutError::DegenerateWindow { .. })));
}

#[test]
fn rows_stack_with_uniform_scaled_height() {
    let events = vec![
        Event::new("A", at(9, 0), at(10, 0)),
        Event::new("B", at(9, 30), at(10, 30)),
        Event::new("C", at(10, 0), at(11, 0)),
    ];
    let config = LayoutConfig {
        base_row_height: 30.0,
        row_gap: 10.0,
        base_hour_width: 100.0,
    };
    let zoom = ZoomLevels::new(1.0, 2.0).expect("zoom");
    let rows = pack_rows(&events, &window());
    let geometry = map_geometry(&rows, &window(), zoom, config).expect("geometry");

    let a = geometry["A"];
    let b = geometry["B"];
    let c = geometry["C"];
    assert_eq!((a.row, b.row, c.row), (0, 1, 0));
    assert_abs_diff_eq!(a.top, 20.0);
    assert_abs_diff_eq!(a.height, 60.0);
    assert_abs_diff_eq!(b.top, 20.0 + 60.0 + 20.0);
    assert_abs_diff_eq!(b.height, 60.0);
    assert_eq!(a.top, c.top);

    let ids: Vec<&str> = geometry.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["A", "C", "B"]);
}

#[test]
fn horizontal_zoom_scales_content_not_fractions() {
    let events = vec![Event::new("b", at(9, 30), at(10, 30))];
    let rows = pack_rows(&events, &window());
    let config = LayoutConfig::default();

    let base = map_geometry(&rows, &window(), ZoomLevels::new(1.0, 1.0).expect("zoom"), config)
        .expect("geometry");
    let zoomed = map_geometry(&rows, &window(), ZoomLevels::new(4.0, 1.0).expect("zoom"), config)
        .expect("geometry");
    assert_eq!(base["b"].left_fraction, zoomed["b"].left_fraction);
    assert_eq!(base["b"].width_fraction, zoomed["b"].width_fraction);

    let narrow = content_width(&window(), 1.0, config);
    let wide = content_width(&window(), 4.0, config);
    assert_abs_diff_eq!(narrow, 200.0);
    assert_abs_diff_eq!(wide, 800.0);

    let rect = zoomed["b"].to_pixels(wide);
    assert_abs_diff_eq!(rect.x, 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.width, 400.0, epsilon = 1e-9);
}

#[test]
fn empty_rows_map_to_empty_geometry() {
    let config = LayoutConfig::default();
    let geometry =
        map_geometry(&[], &window(), ZoomLevels::new(1.0, 3.0).expect("zoom"), config)
            .expect("geometry");
    assert!(geometry.is_empty());
    assert_abs_diff_eq!(content_height(0, 3.0, config), config.row_gap * 3.0);
}

#[test]
fn out_of_range_zoom_is_rejected() {
    let zoom = ZoomLevels {
        horizontal: 1.0,
        vertical: 20.0,
    };
    let result = map_geometry(&[], &window(), zoom, LayoutConfig::default());
    assert!(matches!(
        result,
        Err(LayoutError::InvalidZoom {
            axis: "vertical",
            ..
        })
    ));
}

#[test]
fn invalid_layout_constants_are_rejected() {
    let config = LayoutConfig {
        base_hour_width: f64::NAN,
        ..LayoutConfig::default()
    };
    let result = map_geometry(&[], &window(), ZoomLevels::default(), config);
    assert!(matches!(result, Err(LayoutError::InvalidData(_))));
}
