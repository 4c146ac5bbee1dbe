use chrono::NaiveDate;
use folio_core::{
    DrawKind, FolioError, LabelRole, Side, Timeline, TimelineConfig, TimelineItem, ViewportState,
    ZoomLevel,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn item(id: &str, y: i32, m: u32, d: u32) -> TimelineItem {
    TimelineItem::new(id, date(y, m, d), format!("/{id}.svg"))
}

fn sample_items() -> Vec<TimelineItem> {
    vec![
        item("hackathon", 2024, 6, 18),
        item("web-app", 2024, 1, 15),
        item("iot", 2024, 2, 20),
        item("robot-arm", 2024, 5, 12),
    ]
}

fn full_view() -> ViewportState {
    ViewportState::new(0.0, 2000.0)
}

#[test]
fn january_item_sits_left_of_june_item() {
    let timeline = Timeline::new(
        vec![item("june", 2024, 6, 18), item("january", 2024, 1, 15)],
        TimelineConfig::default(),
    );
    let layout = timeline
        .layout(ZoomLevel::default(), &full_view())
        .expect("layout");

    let january = layout.item_x("january").expect("january marker");
    let june = layout.item_x("june").expect("june marker");
    assert!(january < june, "{january} should be left of {june}");
}

#[test]
fn positions_are_non_decreasing_in_date() {
    let timeline = Timeline::new(sample_items(), TimelineConfig::default());
    for zoom in [0.5, 1.0, 3.25, 20.0] {
        let scale = timeline.scale(ZoomLevel::new(zoom), 800.0).expect("scale");
        let range = scale.range();
        let mut previous = f64::MIN;
        let mut cursor = range.start;
        while cursor <= range.end {
            let x = scale.position(cursor);
            assert!(x >= previous, "position went backwards at {cursor}");
            previous = x;
            cursor = cursor.succ_opt().expect("next day");
        }
    }
}

#[test]
fn range_ends_map_to_track_edges_exactly() {
    let config = TimelineConfig::default();
    let timeline = Timeline::new(sample_items(), config.clone());
    let zoom = ZoomLevel::new(2.5);
    let scale = timeline.scale(zoom, 1280.0).expect("scale");
    let range = timeline.range().expect("range");

    assert_eq!(range.start, date(2023, 1, 1));
    assert_eq!(range.end, date(2025, 12, 31));
    assert_eq!(scale.position(range.start), config.margin_left);
    assert_eq!(
        scale.position(range.end),
        config.margin_left + timeline.track_width(zoom, 1280.0)
    );
    assert_eq!(timeline.total_width(zoom, 1280.0), 5000.0);
}

#[test]
fn single_item_is_centered() {
    let config = TimelineConfig::default();
    let timeline = Timeline::new(vec![item("solo", 2024, 3, 10)], config.clone());
    let zoom = ZoomLevel::default();
    let layout = timeline.layout(zoom, &full_view()).expect("layout");

    let x = layout.item_x("solo").expect("marker");
    let track = timeline.track_width(zoom, full_view().viewport_width);
    assert_eq!(x, config.margin_left + track / 2.0);
}

#[test]
fn items_sharing_a_date_are_all_centered() {
    let timeline = Timeline::new(
        vec![item("a", 2024, 3, 10), item("b", 2024, 3, 10)],
        TimelineConfig::default(),
    );
    let layout = timeline
        .layout(ZoomLevel::default(), &full_view())
        .expect("layout");
    assert_eq!(layout.item_x("a"), layout.item_x("b"));
    assert_eq!(layout.item_x("a"), Some(160.0 + 1808.0 / 2.0));
}

#[test]
fn empty_timeline_renders_nothing() {
    let timeline = Timeline::new(Vec::new(), TimelineConfig::default());
    let layout = timeline
        .layout(ZoomLevel::default(), &full_view())
        .expect("layout");
    assert!(layout.is_empty());
    assert!(layout.range.is_none());
    assert!(layout.centered.is_none());
}

#[test]
fn zero_width_viewport_is_not_ready() {
    let timeline = Timeline::new(sample_items(), TimelineConfig::default());
    let err = timeline
        .layout(ZoomLevel::default(), &ViewportState::new(0.0, 0.0))
        .expect_err("should skip");
    assert!(matches!(err, FolioError::ViewportNotReady));
}

#[test]
fn sides_alternate_after_sorting() {
    let timeline = Timeline::new(sample_items(), TimelineConfig::default());
    let layout = timeline
        .layout(ZoomLevel::default(), &full_view())
        .expect("layout");

    let markers: Vec<(String, Side)> = layout
        .item_markers()
        .filter_map(|ins| match &ins.kind {
            DrawKind::ItemMarker { id, side, .. } => Some((id.clone(), *side)),
            _ => None,
        })
        .collect();

    assert_eq!(
        markers,
        vec![
            ("web-app".to_string(), Side::Above),
            ("iot".to_string(), Side::Below),
            ("robot-arm".to_string(), Side::Above),
            ("hackathon".to_string(), Side::Below),
        ]
    );
}

#[test]
fn offscreen_instructions_are_culled() {
    let config = TimelineConfig::default();
    let timeline = Timeline::new(sample_items(), config.clone());
    let viewport = ViewportState::new(0.0, 800.0);
    let layout = timeline.layout(ZoomLevel::new(4.0), &viewport).expect("layout");

    let (low, high) = viewport.visible_bounds(config.cull_margin);
    assert!(layout.instructions.iter().all(|ins| ins.x >= low && ins.x <= high));
    assert_eq!(layout.item_markers().count(), 0);

    let months: Vec<NaiveDate> = layout
        .gridlines()
        .filter_map(|ins| match ins.kind {
            DrawKind::Gridline { date, .. } => Some(date),
            _ => None,
        })
        .collect();
    assert_eq!(
        months,
        vec![
            date(2023, 1, 1),
            date(2023, 2, 1),
            date(2023, 3, 1),
            date(2023, 4, 1)
        ]
    );
}

#[test]
fn labels_name_years_months_and_items() {
    let timeline = Timeline::new(sample_items(), TimelineConfig::default());
    let layout = timeline
        .layout(ZoomLevel::default(), &full_view())
        .expect("layout");

    let texts: Vec<(String, LabelRole)> = layout
        .labels()
        .filter_map(|ins| match &ins.kind {
            DrawKind::Label { text, role, .. } => Some((text.clone(), *role)),
            _ => None,
        })
        .collect();

    assert!(texts.contains(&("2024".to_string(), LabelRole::Year)));
    assert!(texts.contains(&("Feb".to_string(), LabelRole::Month)));
    assert!(texts.contains(&("Jan 15".to_string(), LabelRole::ItemDate)));
    assert_eq!(
        texts.iter().filter(|(_, role)| *role == LabelRole::Year).count(),
        3
    );
}

#[test]
fn exactly_one_instruction_pair_is_emphasized() {
    let timeline = Timeline::new(sample_items(), TimelineConfig::default());
    let layout = timeline
        .layout(ZoomLevel::default(), &ViewportState::new(300.0, 900.0))
        .expect("layout");

    let emphasized: Vec<_> = layout.instructions.iter().filter(|ins| ins.emphasized).collect();
    assert_eq!(emphasized.len(), 2);
    assert!(layout.centered.is_some());
}

#[test]
fn layout_is_idempotent() {
    let timeline = Timeline::new(sample_items(), TimelineConfig::default());
    let viewport = ViewportState::new(420.0, 1280.0);
    let zoom = ZoomLevel::new(1.75);
    assert_eq!(
        timeline.layout(zoom, &viewport).expect("first"),
        timeline.layout(zoom, &viewport).expect("second")
    );
}

#[test]
fn track_stretches_to_a_wider_viewport() {
    let config = TimelineConfig::default();
    let timeline = Timeline::new(sample_items(), config.clone());
    let viewport = ViewportState::new(0.0, 1920.0);
    let layout = timeline.layout(ZoomLevel::new(0.5), &viewport).expect("layout");

    assert_eq!(layout.total_width, 1920.0);
    assert_eq!(
        layout.track_width,
        1920.0 - config.margin_left - config.margin_right
    );
    let range = layout.range.expect("range");
    assert!(range.contains(date(2024, 6, 18)));
    assert!(!range.contains(date(2026, 1, 1)));
}
