//! Wheel-driven zoom with a deferred scroll correction.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::viewport::ViewportState;
use crate::TimelineConfig;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 20.0;

/// Scale factor applied to the base timeline width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct ZoomLevel(f64);

impl ZoomLevel {
    pub fn new(value: f64) -> Self {
        Self::clamped(value, MIN_ZOOM, MAX_ZOOM)
    }

    pub fn clamped(value: f64, min: f64, max: f64) -> Self {
        if value.is_nan() {
            return Self(min);
        }
        Self(value.clamp(min, max))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Raw wheel deltas as reported by the browser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WheelDelta {
    pub dx: f64,
    pub dy: f64,
}

impl WheelDelta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Horizontal-dominant gestures are left to native scrolling.
    pub fn is_zoom_gesture(&self) -> bool {
        self.dy != 0.0 && self.dx.abs() <= self.dy.abs()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoomChange {
    pub previous: ZoomLevel,
    pub level: ZoomLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingCorrection {
    anchor_percent: f64,
    frames_left: u8,
}

/// Owns the zoom level and the scroll correction that follows a change.
///
/// Widths are derived from the configured geometry, the same way the layout
/// derives them, so the anchor and the correction agree with what is drawn.
/// The DOM only accepts the new scroll offset once the wider track has been
/// rendered, so the correction is released by [`ZoomController::on_frame`]
/// after the configured number of paint cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    level: ZoomLevel,
    geometry: TimelineConfig,
    correction_frames: u8,
    pending: Option<PendingCorrection>,
}

impl ZoomController {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            level: ZoomLevel::default(),
            geometry: config.clone(),
            correction_frames: config.correction_frames.max(1),
            pending: None,
        }
    }

    pub fn level(&self) -> ZoomLevel {
        self.level
    }

    pub fn has_pending_correction(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel_correction(&mut self) {
        self.pending = None;
    }

    /// Apply one wheel gesture. Returns the change when the level moved.
    ///
    /// Wheel up (`dy < 0`) zooms in. The track percentage under the viewport
    /// center is remembered; a gesture arriving while a correction is still
    /// pending keeps the earlier anchor.
    pub fn on_wheel(&mut self, delta: WheelDelta, viewport: &ViewportState) -> Option<ZoomChange> {
        if !delta.is_zoom_gesture() {
            return None;
        }

        let direction = if delta.dy < 0.0 { 1.0 } else { -1.0 };
        let previous = self.level;
        let level = ZoomLevel::clamped(
            previous.value() + self.geometry.zoom_step * direction,
            self.geometry.min_zoom,
            self.geometry.max_zoom,
        );
        if level == previous {
            return None;
        }

        let anchor_percent = match self.pending {
            Some(pending) => pending.anchor_percent,
            None => self.track_percent(viewport),
        };
        self.pending = Some(PendingCorrection {
            anchor_percent,
            frames_left: self.correction_frames,
        });
        self.level = level;

        debug!(
            "zoom {:.2} -> {:.2}, anchor at {anchor_percent:.3}%",
            previous.value(),
            level.value()
        );
        Some(ZoomChange { previous, level })
    }

    /// Called once per animation frame. Yields the corrected scroll offset on
    /// the last deferred frame and `None` otherwise.
    pub fn on_frame(&mut self, viewport_width: f64) -> Option<f64> {
        let pending = self.pending.as_mut()?;
        pending.frames_left = pending.frames_left.saturating_sub(1);
        if pending.frames_left > 0 {
            return None;
        }
        let anchor_percent = pending.anchor_percent;
        self.pending = None;

        let total = self.total_width(viewport_width);
        let track = self.geometry.track_width(total);
        let anchor_x = self.geometry.margin_left + anchor_percent / 100.0 * track;
        let max_scroll = (total - viewport_width).max(0.0);
        Some((anchor_x - viewport_width / 2.0).clamp(0.0, max_scroll))
    }

    fn total_width(&self, viewport_width: f64) -> f64 {
        self.geometry.total_width(self.level.value(), viewport_width)
    }

    fn track_percent(&self, viewport: &ViewportState) -> f64 {
        let track = self
            .geometry
            .track_width(self.total_width(viewport.viewport_width));
        if track <= 0.0 {
            return 50.0;
        }
        (viewport.center() - self.geometry.margin_left) / track * 100.0
    }
}
