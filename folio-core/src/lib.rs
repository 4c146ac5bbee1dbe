//! Core logic for the portfolio timeline: domain types, layout engine,
//! viewport tracking, zoom handling and URL-driven modal state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod layout;
pub mod modal;
pub mod query;
pub mod scale;
pub mod schedule;
pub mod viewport;
pub mod zoom;

pub use config::{ConfigOverrides, TimelineConfig};
pub use layout::{DrawInstruction, DrawKind, Layout, LabelRole, Side, Timeline};
pub use modal::{ModalController, ScrollGuard, ScrollLock};
pub use query::{QueryChange, QueryState, QueryStore, SubscriptionId};
pub use scale::{DateRange, TimeScale};
pub use schedule::{Debouncer, FrameCoalescer};
pub use viewport::{CenterReport, CenteredPoint, MonthFocus, ViewportState, ViewportTracker};
pub use zoom::{WheelDelta, ZoomChange, ZoomController, ZoomLevel};

/// Discipline tag shown on a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Discipline {
    Software,
    Hardware,
    Events,
}

impl Discipline {
    pub fn label(self) -> &'static str {
        match self {
            Discipline::Software => "Software",
            Discipline::Hardware => "Hardware",
            Discipline::Events => "Events",
        }
    }
}

/// Structured body of a project detail page.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectContent {
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// A project record as shown in the detail modal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub discipline: Discipline,
    pub thumbnail: String,
    pub content: ProjectContent,
}

/// One dated, clickable entry on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineItem {
    pub id: String,
    pub date: NaiveDate,
    pub thumbnail: String,
}

impl TimelineItem {
    pub fn new(id: impl Into<String>, date: NaiveDate, thumbnail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date,
            thumbnail: thumbnail.into(),
        }
    }
}

impl From<&Project> for TimelineItem {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            date: project.date,
            thumbnail: project.thumbnail.clone(),
        }
    }
}

/// External profile link rendered in the page header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Owner information for the page header.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SiteProfile {
    pub owner: String,
    #[serde(default)]
    pub links: Vec<SocialLink>,
}

/// Read-only set of projects, ordered by date.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(mut projects: Vec<Project>) -> Self {
        projects.sort_by_key(|project| project.date);
        Self { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Look up a project by id. Unknown ids yield `None`.
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn timeline_items(&self) -> Vec<TimelineItem> {
        self.projects.iter().map(TimelineItem::from).collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Errors raised while loading content or computing a layout.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("input is missing required data")]
    MissingData,
    #[error("could not parse input: {0}")]
    Parse(String),
    #[error("duplicate project id: {0}")]
    DuplicateId(String),
    #[error("viewport has no width yet")]
    ViewportNotReady,
}
