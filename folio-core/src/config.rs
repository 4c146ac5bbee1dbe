//! Tunable geometry and interaction constants.

use log::warn;
use serde::{Deserialize, Serialize};

/// Geometry, zoom bounds and timing used by the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineConfig {
    /// Total rendered width at zoom 1, in pixels.
    pub base_width: f64,
    /// Space reserved on the left for fixed chrome.
    pub margin_left: f64,
    /// Space reserved on the right for fixed chrome.
    pub margin_right: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Additive zoom change per wheel gesture.
    pub zoom_step: f64,
    pub resize_debounce_ms: u32,
    /// Extra pixels kept on each side of the viewport before culling.
    pub cull_margin: f64,
    /// Paint cycles to wait before applying the post-zoom scroll correction.
    pub correction_frames: u8,
    /// URL query key holding the selected project id.
    pub query_key: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            base_width: 2000.0,
            margin_left: 160.0,
            margin_right: 32.0,
            min_zoom: 0.5,
            max_zoom: 20.0,
            zoom_step: 0.25,
            resize_debounce_ms: 100,
            cull_margin: 80.0,
            correction_frames: 2,
            query_key: "project".to_string(),
        }
    }
}

impl TimelineConfig {
    /// Rendered width at `zoom`. The track is stretched so it never ends
    /// short of the viewport.
    pub fn total_width(&self, zoom: f64, viewport_width: f64) -> f64 {
        (self.base_width * zoom).max(viewport_width)
    }

    /// Width of the date track for a given total width.
    pub fn track_width(&self, total_width: f64) -> f64 {
        (total_width - self.margin_left - self.margin_right).max(0.0)
    }
}

/// Partial configuration, merged over the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub base_width: Option<f64>,
    #[serde(default)]
    pub margin_left: Option<f64>,
    #[serde(default)]
    pub margin_right: Option<f64>,
    #[serde(default)]
    pub zoom_step: Option<f64>,
    #[serde(default)]
    pub resize_debounce_ms: Option<u32>,
    #[serde(default)]
    pub cull_margin: Option<f64>,
    #[serde(default)]
    pub query_key: Option<String>,
}

impl From<ConfigOverrides> for TimelineConfig {
    fn from(cfg: ConfigOverrides) -> Self {
        let mut base = TimelineConfig::default();
        if let Some(width) = cfg.base_width {
            base.base_width = width;
        }
        if let Some(margin) = cfg.margin_left {
            base.margin_left = margin;
        }
        if let Some(margin) = cfg.margin_right {
            base.margin_right = margin;
        }
        match cfg.zoom_step {
            Some(step) if step.is_finite() && step > 0.0 => base.zoom_step = step,
            Some(step) => warn!("ignoring zoom_step {step}, keeping {}", base.zoom_step),
            None => {}
        }
        if let Some(delay) = cfg.resize_debounce_ms {
            base.resize_debounce_ms = delay;
        }
        if let Some(margin) = cfg.cull_margin {
            base.cull_margin = margin;
        }
        if let Some(key) = cfg.query_key {
            base.query_key = key;
        }
        base
    }
}
