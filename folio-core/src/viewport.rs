//! Tracking of the date and attraction point under the viewport center.

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::layout::Timeline;
use crate::{FolioError, TimelineItem, ZoomLevel};

/// Scroll position and visible width of the timeline container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ViewportState {
    pub scroll_offset: f64,
    pub viewport_width: f64,
}

impl ViewportState {
    pub fn new(scroll_offset: f64, viewport_width: f64) -> Self {
        Self {
            scroll_offset,
            viewport_width,
        }
    }

    /// A container that has not been laid out yet reports zero width.
    pub fn is_ready(&self) -> bool {
        self.viewport_width > 0.0
    }

    pub fn center(&self) -> f64 {
        self.scroll_offset + self.viewport_width / 2.0
    }

    /// Horizontal interval kept by culling, widened by `margin` on each side.
    pub fn visible_bounds(&self, margin: f64) -> (f64, f64) {
        (
            self.scroll_offset - margin,
            self.scroll_offset + self.viewport_width + margin,
        )
    }
}

/// Whichever of gridline or item sits closest to the viewport center.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CenteredPoint {
    Gridline(NaiveDate),
    Item(String),
}

/// Result of locating the viewport center on the track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CenterReport {
    pub center_percent: f64,
    pub centered_date: NaiveDate,
    pub point: CenteredPoint,
}

/// Items sharing the calendar month of the centered date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthFocus {
    pub year: i32,
    pub month: u32,
    pub items: Vec<TimelineItem>,
}

impl Timeline {
    /// Find the centered date and attraction point for a viewport.
    ///
    /// Returns `Ok(None)` for an empty timeline. An item only wins over the
    /// nearest gridline when it is strictly closer.
    pub fn locate_center(
        &self,
        zoom: ZoomLevel,
        viewport: &ViewportState,
    ) -> Result<Option<CenterReport>, FolioError> {
        if !viewport.is_ready() {
            return Err(FolioError::ViewportNotReady);
        }
        let Some(scale) = self.scale(zoom, viewport.viewport_width) else {
            return Ok(None);
        };

        let center_percent = scale.percent_at(viewport.center());
        let centered_date = scale.date_at_percent(center_percent);

        let gridline = scale
            .range()
            .month_boundaries()
            .into_iter()
            .map(|date| (date, (scale.percent(date) - center_percent).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let item = self
            .items()
            .iter()
            .map(|item| (item, (scale.percent(item.date) - center_percent).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let point = match (gridline, item) {
            (Some((_, grid_distance)), Some((item, item_distance)))
                if item_distance < grid_distance =>
            {
                CenteredPoint::Item(item.id.clone())
            }
            (Some((date, _)), _) => CenteredPoint::Gridline(date),
            (None, Some((item, _))) => CenteredPoint::Item(item.id.clone()),
            (None, None) => return Ok(None),
        };

        Ok(Some(CenterReport {
            center_percent,
            centered_date,
            point,
        }))
    }

    /// Items falling in the same month and year as `date`.
    pub fn month_focus(&self, date: NaiveDate) -> MonthFocus {
        let items = self
            .items()
            .iter()
            .filter(|item| item.date.year() == date.year() && item.date.month() == date.month())
            .cloned()
            .collect();
        MonthFocus {
            year: date.year(),
            month: date.month(),
            items,
        }
    }
}

type FocusObserver = Box<dyn FnMut(&MonthFocus)>;

/// Keeps the last centered point and reports the month focus after every
/// successful update.
#[derive(Default)]
pub struct ViewportTracker {
    centered: Option<CenterReport>,
    last_focus: Option<MonthFocus>,
    observer: Option<FocusObserver>,
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: impl FnMut(&MonthFocus) + 'static) -> Self {
        Self {
            observer: Some(Box::new(observer)),
            ..Self::default()
        }
    }

    pub fn set_observer(&mut self, observer: impl FnMut(&MonthFocus) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Recompute the centered point. Unusable viewports and empty timelines
    /// leave the previous state untouched.
    pub fn update(
        &mut self,
        timeline: &Timeline,
        zoom: ZoomLevel,
        viewport: &ViewportState,
    ) -> Option<&CenterReport> {
        match timeline.locate_center(zoom, viewport) {
            Ok(Some(report)) => {
                let focus = timeline.month_focus(report.centered_date);
                if self.last_focus.as_ref() != Some(&focus) {
                    debug!(
                        "month focus {}-{:02} with {} item(s)",
                        focus.year,
                        focus.month,
                        focus.items.len()
                    );
                }
                if let Some(observer) = self.observer.as_mut() {
                    observer(&focus);
                }
                self.last_focus = Some(focus);
                self.centered = Some(report);
            }
            Ok(None) => {}
            Err(err) => debug!("skipping viewport update: {err}"),
        }
        self.centered.as_ref()
    }

    pub fn centered(&self) -> Option<&CenterReport> {
        self.centered.as_ref()
    }

    pub fn centered_point(&self) -> Option<&CenteredPoint> {
        self.centered.as_ref().map(|report| &report.point)
    }

    pub fn centered_gridline_date(&self) -> Option<NaiveDate> {
        match self.centered_point() {
            Some(CenteredPoint::Gridline(date)) => Some(*date),
            _ => None,
        }
    }

    pub fn centered_item_id(&self) -> Option<&str> {
        match self.centered_point() {
            Some(CenteredPoint::Item(id)) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Month focus from the last successful update.
    pub fn focus(&self) -> Option<&MonthFocus> {
        self.last_focus.as_ref()
    }
}
