//! Project catalog loader: JSON documents to core portfolio types.

use std::collections::HashSet;

use chrono::NaiveDate;
use folio_core::{Discipline, FolioError, Project, ProjectCatalog, ProjectContent, SiteProfile};
use log::info;
use serde::Deserialize;
use serde_json::Value;

/// Data set compiled into the binary.
pub const BUILTIN_DOCUMENT: &str = include_str!("../data/site.json");

/// Everything a page needs: header profile plus the project catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    pub site: SiteProfile,
    pub catalog: ProjectCatalog,
}

/// Load the embedded data set.
pub fn builtin_portfolio() -> Result<Portfolio, FolioError> {
    load_portfolio_str(BUILTIN_DOCUMENT)
}

/// Load a portfolio document from a JSON string.
pub fn load_portfolio_str(document: &str) -> Result<Portfolio, FolioError> {
    let value: Value =
        serde_json::from_str(document).map_err(|err| FolioError::Parse(err.to_string()))?;
    load_portfolio_value(&value)
}

/// Load a portfolio document from a `serde_json::Value`.
///
/// `projects` is required; `site` is optional and defaults to an empty
/// profile. Dates must be `YYYY-MM-DD` and ids must be unique.
pub fn load_portfolio_value(document: &Value) -> Result<Portfolio, FolioError> {
    let entries = document
        .get("projects")
        .and_then(Value::as_array)
        .ok_or(FolioError::MissingData)?;

    let site = match document.get("site") {
        Some(site) => serde_json::from_value::<SiteProfile>(site.clone())
            .map_err(|err| FolioError::Parse(format!("site profile: {err}")))?,
        None => SiteProfile::default(),
    };

    let mut seen = HashSet::new();
    let mut projects = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let project = parse_project(entry, index)?;
        if !seen.insert(project.id.clone()) {
            return Err(FolioError::DuplicateId(project.id));
        }
        projects.push(project);
    }

    let catalog = ProjectCatalog::new(projects);
    info!("loaded {} project(s) for {:?}", catalog.len(), site.owner);
    Ok(Portfolio { site, catalog })
}

/// Catalog only, for callers that do not render a header.
pub fn load_catalog_str(document: &str) -> Result<ProjectCatalog, FolioError> {
    load_portfolio_str(document).map(|portfolio| portfolio.catalog)
}

pub fn builtin_catalog() -> Result<ProjectCatalog, FolioError> {
    builtin_portfolio().map(|portfolio| portfolio.catalog)
}

#[derive(Deserialize)]
struct RawProject {
    id: String,
    title: String,
    date: String,
    discipline: Discipline,
    thumbnail: String,
    #[serde(default)]
    content: ProjectContent,
}

fn parse_project(entry: &Value, index: usize) -> Result<Project, FolioError> {
    let raw: RawProject = serde_json::from_value(entry.clone())
        .map_err(|err| FolioError::Parse(format!("project #{index}: {err}")))?;

    let id = raw.id.trim().to_string();
    if id.is_empty() {
        return Err(FolioError::Parse(format!("project #{index}: empty id")));
    }

    let date = parse_date(&raw.date).ok_or_else(|| {
        FolioError::Parse(format!("project {id}: invalid date {:?}", raw.date))
    })?;

    Ok(Project {
        id,
        title: raw.title,
        date,
        discipline: raw.discipline,
        thumbnail: raw.thumbnail,
        content: raw.content,
    })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
