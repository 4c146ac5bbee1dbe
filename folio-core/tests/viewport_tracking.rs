use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use folio_core::{
    CenteredPoint, MonthFocus, Timeline, TimelineConfig, TimelineItem, ViewportState,
    ViewportTracker, WheelDelta, ZoomController, ZoomLevel,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn timeline() -> Timeline {
    Timeline::new(
        vec![
            TimelineItem::new("web-app", date(2024, 1, 15), "/next.svg"),
            TimelineItem::new("conference", date(2024, 3, 1), "/globe.svg"),
            TimelineItem::new("hackathon", date(2024, 6, 18), "/globe.svg"),
        ],
        TimelineConfig::default(),
    )
}

/// Viewport of `width` whose center sits on `x`.
fn centered_on(x: f64, width: f64) -> ViewportState {
    ViewportState::new(x - width / 2.0, width)
}

#[test]
fn item_wins_when_strictly_closer() {
    let timeline = timeline();
    let zoom = ZoomLevel::default();
    let x = timeline.scale(zoom, 800.0).expect("scale").position(date(2024, 1, 15));

    let mut tracker = ViewportTracker::new();
    tracker.update(&timeline, zoom, &centered_on(x, 800.0));

    assert_eq!(tracker.centered_item_id(), Some("web-app"));
    assert_eq!(tracker.centered_gridline_date(), None);
}

#[test]
fn tie_goes_to_the_gridline() {
    let timeline = timeline();
    let zoom = ZoomLevel::default();
    let x = timeline.scale(zoom, 800.0).expect("scale").position(date(2024, 3, 1));

    let mut tracker = ViewportTracker::new();
    tracker.update(&timeline, zoom, &centered_on(x, 800.0));

    assert_eq!(tracker.centered_gridline_date(), Some(date(2024, 3, 1)));
    assert_eq!(tracker.centered_item_id(), None);
}

#[test]
fn exactly_one_point_is_centered_for_every_scroll() {
    let timeline = timeline();
    let mut tracker = ViewportTracker::new();
    assert!(tracker.centered_point().is_none());

    for zoom in [0.5, 1.0, 6.0] {
        let zoom = ZoomLevel::new(zoom);
        let total = timeline.total_width(zoom, 640.0);
        let mut scroll = 0.0;
        while scroll < total {
            tracker.update(&timeline, zoom, &ViewportState::new(scroll, 640.0));
            let gridline = tracker.centered_gridline_date().is_some();
            let item = tracker.centered_item_id().is_some();
            assert!(gridline ^ item, "scroll {scroll} at zoom {zoom:?}");
            scroll += 37.0;
        }
    }
}

#[test]
fn centered_date_inverts_position() {
    let timeline = timeline();
    let zoom = ZoomLevel::new(3.0);
    let x = timeline.scale(zoom, 1024.0).expect("scale").position(date(2024, 6, 18));

    let report = timeline
        .locate_center(zoom, &centered_on(x, 1024.0))
        .expect("ready")
        .expect("non-empty");
    assert_eq!(report.centered_date, date(2024, 6, 18));
    assert_eq!(report.point, CenteredPoint::Item("hackathon".to_string()));
}

#[test]
fn observer_receives_month_focus_after_every_update() {
    let timeline = timeline();
    let zoom = ZoomLevel::default();
    let scale = timeline.scale(zoom, 800.0).expect("scale");
    let seen: Rc<RefCell<Vec<MonthFocus>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let mut tracker = ViewportTracker::with_observer(move |focus| sink.borrow_mut().push(focus.clone()));
    assert!(tracker.focus().is_none());

    let june = centered_on(scale.position(date(2024, 6, 18)), 800.0);
    tracker.update(&timeline, zoom, &june);
    tracker.update(&timeline, zoom, &june);
    let january = centered_on(scale.position(date(2024, 1, 15)), 800.0);
    tracker.update(&timeline, zoom, &january);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!((seen[0].year, seen[0].month), (2024, 6));
    assert_eq!(seen[0].items.len(), 1);
    assert_eq!(seen[0].items[0].id, "hackathon");
    assert_eq!(seen[1], seen[0]);
    assert_eq!((seen[2].year, seen[2].month), (2024, 1));
    assert_eq!(tracker.focus(), Some(&seen[2]));
}

#[test]
fn unusable_viewport_keeps_previous_state() {
    let timeline = timeline();
    let zoom = ZoomLevel::default();
    let mut tracker = ViewportTracker::new();

    assert!(tracker.update(&timeline, zoom, &ViewportState::new(0.0, 0.0)).is_none());

    tracker.update(&timeline, zoom, &ViewportState::new(200.0, 800.0));
    let before = tracker.centered().cloned();
    tracker.update(&timeline, zoom, &ViewportState::new(900.0, 0.0));
    assert_eq!(tracker.centered().cloned(), before);
}

#[test]
fn empty_timeline_never_centers() {
    let timeline = Timeline::new(Vec::new(), TimelineConfig::default());
    let mut tracker = ViewportTracker::new();
    assert!(tracker
        .update(&timeline, ZoomLevel::default(), &ViewportState::new(0.0, 800.0))
        .is_none());
}

fn centered_date(timeline: &Timeline, zoom: ZoomLevel, viewport: &ViewportState) -> NaiveDate {
    timeline
        .locate_center(zoom, viewport)
        .expect("ready")
        .expect("non-empty")
        .centered_date
}

/// One wheel gesture followed by the deferred correction, as the view runs it.
fn wheel_and_correct(zoom: &mut ZoomController, dy: f64, viewport: &ViewportState) -> ViewportState {
    zoom.on_wheel(WheelDelta::new(0.0, dy), viewport)
        .expect("zoom level changed");
    let mut offset = None;
    while zoom.has_pending_correction() {
        offset = zoom.on_frame(viewport.viewport_width);
    }
    ViewportState::new(
        offset.expect("correction released"),
        viewport.viewport_width,
    )
}

#[test]
fn zoom_step_keeps_center_date_in_place() {
    let timeline = timeline();
    let config = timeline.config().clone();
    let mut zoom = ZoomController::new(&config);
    let viewport = ViewportState::new(500.0, 800.0);

    let before = centered_date(&timeline, zoom.level(), &viewport);
    zoom.on_wheel(WheelDelta::new(0.0, -120.0), &viewport)
        .expect("zoomed in");

    assert_eq!(zoom.on_frame(viewport.viewport_width), None);
    let offset = zoom
        .on_frame(viewport.viewport_width)
        .expect("correction after second frame");

    let after = centered_date(
        &timeline,
        zoom.level(),
        &ViewportState::new(offset, viewport.viewport_width),
    );
    assert!((after - before).num_days().abs() <= 1, "{before} vs {after}");
}

#[test]
fn zoom_from_a_track_narrower_than_the_viewport_keeps_center_date() {
    let timeline = timeline();
    let mut zoom = ZoomController::new(timeline.config());
    let mut viewport = ViewportState::new(0.0, 1920.0);

    viewport = wheel_and_correct(&mut zoom, 100.0, &viewport);
    viewport = wheel_and_correct(&mut zoom, 100.0, &viewport);
    assert_eq!(zoom.level().value(), 0.5);
    assert_eq!(viewport.scroll_offset, 0.0);

    // 0.5 -> 0.75 stays inside the viewport, 1.0 and beyond overflow it.
    for _ in 0..6 {
        let before = centered_date(&timeline, zoom.level(), &viewport);
        viewport = wheel_and_correct(&mut zoom, -100.0, &viewport);
        let after = centered_date(&timeline, zoom.level(), &viewport);
        assert!(
            (after - before).num_days().abs() <= 1,
            "zoom {:?}: {before} vs {after}",
            zoom.level()
        );
        assert!(viewport.scroll_offset >= 0.0);
        assert!(
            viewport.scroll_offset
                <= timeline.total_width(zoom.level(), viewport.viewport_width)
                    - viewport.viewport_width
        );
    }
    assert_eq!(zoom.level().value(), 2.0);
}

#[test]
fn zoom_stays_within_bounds() {
    let config = TimelineConfig::default();
    let mut zoom = ZoomController::new(&config);
    let viewport = ViewportState::new(0.0, 800.0);

    for _ in 0..500 {
        zoom.on_wheel(WheelDelta::new(0.0, -300.0), &viewport);
    }
    assert_eq!(zoom.level().value(), config.max_zoom);

    for _ in 0..500 {
        zoom.on_wheel(WheelDelta::new(0.0, 300.0), &viewport);
    }
    assert_eq!(zoom.level().value(), config.min_zoom);
}
