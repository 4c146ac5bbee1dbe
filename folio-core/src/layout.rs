//! Layout engine: turns dated items into positioned draw instructions.

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::scale::{DateRange, TimeScale};
use crate::viewport::{CenteredPoint, ViewportState};
use crate::{FolioError, TimelineConfig, TimelineItem, ZoomLevel};

/// Which side of the central axis an item thumbnail hangs from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Above,
    Below,
}

impl Side {
    /// Items alternate by index parity after sorting, regardless of spacing.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Side::Above
        } else {
            Side::Below
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LabelRole {
    Year,
    Month,
    ItemDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawKind {
    Gridline {
        date: NaiveDate,
        year_mark: bool,
    },
    ItemMarker {
        id: String,
        date: NaiveDate,
        thumbnail: String,
        side: Side,
    },
    Label {
        text: String,
        role: LabelRole,
        date: NaiveDate,
    },
}

/// One element for the rendering surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawInstruction {
    #[serde(flatten)]
    pub kind: DrawKind,
    pub x: f64,
    pub emphasized: bool,
}

/// Everything the rendering surface needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    pub total_width: f64,
    pub track_width: f64,
    pub range: Option<DateRange>,
    pub centered: Option<CenteredPoint>,
    pub instructions: Vec<DrawInstruction>,
}

impl Layout {
    fn empty(total_width: f64, track_width: f64) -> Self {
        Self {
            total_width,
            track_width,
            range: None,
            centered: None,
            instructions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn item_markers(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|ins| matches!(ins.kind, DrawKind::ItemMarker { .. }))
    }

    pub fn gridlines(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|ins| matches!(ins.kind, DrawKind::Gridline { .. }))
    }

    pub fn labels(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|ins| matches!(ins.kind, DrawKind::Label { .. }))
    }

    /// Offset of the marker for `id`, if it survived culling.
    pub fn item_x(&self, id: &str) -> Option<f64> {
        self.item_markers().find_map(|ins| match &ins.kind {
            DrawKind::ItemMarker { id: marker_id, .. } if marker_id == id => Some(ins.x),
            _ => None,
        })
    }
}

/// Sorted items plus the padded date range derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    items: Vec<TimelineItem>,
    range: Option<DateRange>,
    config: TimelineConfig,
}

impl Timeline {
    pub fn new(mut items: Vec<TimelineItem>, config: TimelineConfig) -> Self {
        items.sort_by_key(|item| item.date);
        let range = DateRange::padded(items.iter().map(|item| item.date));
        Self {
            items,
            range,
            config,
        }
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Rendered width at `zoom`, never narrower than `viewport_width`.
    pub fn total_width(&self, zoom: ZoomLevel, viewport_width: f64) -> f64 {
        self.config.total_width(zoom.value(), viewport_width)
    }

    pub fn track_width(&self, zoom: ZoomLevel, viewport_width: f64) -> f64 {
        self.config.track_width(self.total_width(zoom, viewport_width))
    }

    /// Date scale for a zoom level and viewport; `None` when there are no items.
    pub fn scale(&self, zoom: ZoomLevel, viewport_width: f64) -> Option<TimeScale> {
        let total_width = self.total_width(zoom, viewport_width);
        self.range.map(|range| TimeScale::new(range, total_width, &self.config))
    }

    /// Compute draw instructions for the visible part of the track.
    ///
    /// Instructions outside the viewport (widened by `cull_margin`) are
    /// dropped. Same inputs always give the same output.
    pub fn layout(&self, zoom: ZoomLevel, viewport: &ViewportState) -> Result<Layout, FolioError> {
        if !viewport.is_ready() {
            return Err(FolioError::ViewportNotReady);
        }

        let width = viewport.viewport_width;
        let total_width = self.total_width(zoom, width);
        let Some(scale) = self.scale(zoom, width) else {
            return Ok(Layout::empty(total_width, self.track_width(zoom, width)));
        };

        let centered = self
            .locate_center(zoom, viewport)?
            .map(|report| report.point);
        let (low, high) = viewport.visible_bounds(self.config.cull_margin);
        let visible = |x: f64| x >= low && x <= high;

        let mut instructions = Vec::new();

        for boundary in scale.range().month_boundaries() {
            let x = scale.position(boundary);
            if !visible(x) {
                continue;
            }
            let emphasized = matches!(&centered, Some(CenteredPoint::Gridline(date)) if *date == boundary);
            let year_mark = boundary.month() == 1;
            let (text, role) = if year_mark {
                (boundary.year().to_string(), LabelRole::Year)
            } else {
                (boundary.format("%b").to_string(), LabelRole::Month)
            };

            instructions.push(DrawInstruction {
                kind: DrawKind::Gridline {
                    date: boundary,
                    year_mark,
                },
                x,
                emphasized,
            });
            instructions.push(DrawInstruction {
                kind: DrawKind::Label {
                    text,
                    role,
                    date: boundary,
                },
                x,
                emphasized,
            });
        }

        for (index, item) in self.items.iter().enumerate() {
            let x = scale.position(item.date);
            if !visible(x) {
                continue;
            }
            let emphasized = matches!(&centered, Some(CenteredPoint::Item(id)) if *id == item.id);

            instructions.push(DrawInstruction {
                kind: DrawKind::ItemMarker {
                    id: item.id.clone(),
                    date: item.date,
                    thumbnail: item.thumbnail.clone(),
                    side: Side::for_index(index),
                },
                x,
                emphasized,
            });
            instructions.push(DrawInstruction {
                kind: DrawKind::Label {
                    text: item.date.format("%b %-d").to_string(),
                    role: LabelRole::ItemDate,
                    date: item.date,
                },
                x,
                emphasized,
            });
        }

        debug!(
            "layout at zoom {:.2}: {} instruction(s) in [{low:.0}, {high:.0}]",
            zoom.value(),
            instructions.len()
        );

        Ok(Layout {
            total_width,
            track_width: scale.track_width(),
            range: Some(scale.range()),
            centered,
            instructions,
        })
    }
}
