//! Framework-neutral WASM <-> JavaScript bridge for the timeline layout.

use folio_core::{
    ConfigOverrides, FolioError, Timeline, TimelineConfig, TimelineItem, ViewportState, ZoomLevel,
};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsViewport {
    #[serde(default)]
    scroll_offset: f64,
    viewport_width: f64,
}

impl From<JsViewport> for ViewportState {
    fn from(viewport: JsViewport) -> Self {
        ViewportState::new(viewport.scroll_offset, viewport.viewport_width)
    }
}

/// Draw instructions for `items` at `zoom` inside `viewport`.
///
/// `items` is an array of `{ id, date: "YYYY-MM-DD", thumbnail }`,
/// `viewport` is `{ scroll_offset, viewport_width }`.
#[wasm_bindgen]
pub fn compute_layout(
    items: JsValue,
    zoom: f64,
    viewport: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let timeline = read_timeline(items, config)?;
    let viewport = read_viewport(viewport)?;
    let layout = timeline
        .layout(ZoomLevel::new(zoom), &viewport)
        .map_err(|err| JsValue::from_str(&format_folio_error(err)))?;

    to_value(&layout).map_err(|err| JsValue::from_str(&format!("Could not serialize layout: {err}")))
}

/// Centered date and attraction point, or `null` for an empty item list.
#[wasm_bindgen]
pub fn locate_center(
    items: JsValue,
    zoom: f64,
    viewport: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let timeline = read_timeline(items, config)?;
    let viewport = read_viewport(viewport)?;
    let report = timeline
        .locate_center(ZoomLevel::new(zoom), &viewport)
        .map_err(|err| JsValue::from_str(&format_folio_error(err)))?;

    to_value(&report).map_err(|err| JsValue::from_str(&format!("Could not serialize report: {err}")))
}

/// The embedded project catalog as plain JavaScript objects.
#[wasm_bindgen]
pub fn builtin_projects() -> Result<JsValue, JsValue> {
    let catalog = folio_content::builtin_catalog()
        .map_err(|err| JsValue::from_str(&format_folio_error(err)))?;
    to_value(catalog.projects())
        .map_err(|err| JsValue::from_str(&format!("Could not serialize projects: {err}")))
}

fn read_timeline(items: JsValue, config: Option<JsValue>) -> Result<Timeline, JsValue> {
    let items: Vec<TimelineItem> = from_value(items)
        .map_err(|err| JsValue::from_str(&format!("Could not read items: {err}")))?;
    let config = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let overrides: ConfigOverrides = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            TimelineConfig::from(overrides)
        }
        _ => TimelineConfig::default(),
    };
    Ok(Timeline::new(items, config))
}

fn read_viewport(viewport: JsValue) -> Result<ViewportState, JsValue> {
    let viewport: JsViewport = from_value(viewport)
        .map_err(|err| JsValue::from_str(&format!("Could not read viewport: {err}")))?;
    Ok(viewport.into())
}

fn format_folio_error(err: FolioError) -> String {
    format!("Timeline error: {err}")
}
