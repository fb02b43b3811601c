//! Structured export document.
//!
//! This is the lossless interchange shape of a project:
//!
//! ```json
//! { "project": {...}, "shapes": [...], "researchData": {...},
//!   "comments": [...], "exportDate": "..." }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::measurement::MeasurementSummary;
use crate::model::{Comment, Project, ProjectId, ProjectStatus, ResearchData, Shape, ZoneType};

/// Project metadata as written in the `project` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Backend identifier, if the project was saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProjectId>,
    /// Project name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Researcher attribution
    #[serde(default)]
    pub researcher: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub modified_at: DateTime<Utc>,
    /// Last computed measurement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<MeasurementSummary>,
    /// Visible zone types
    #[serde(default = "Project::default_layers")]
    pub active_layers: BTreeSet<ZoneType>,
}

impl From<&Project> for ProjectMetadata {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            researcher: project.researcher.clone(),
            status: project.status,
            created_at: project.created_at,
            modified_at: project.modified_at,
            measurement: project.measurement.clone(),
            active_layers: project.active_layers.clone(),
        }
    }
}

/// Full structured export of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Project metadata
    pub project: ProjectMetadata,
    /// Every exported shape, verbatim
    pub shapes: Vec<Shape>,
    /// Ancillary research datasets
    #[serde(default)]
    pub research_data: ResearchData,
    /// Comment thread
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// When the export was produced
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    /// Build a document from a project and the shapes chosen for export.
    pub fn new(project: &Project, shapes: Vec<Shape>) -> Self {
        Self {
            project: ProjectMetadata::from(project),
            shapes,
            research_data: project.research_data.clone(),
            comments: project.comments.clone(),
            export_date: Utc::now(),
        }
    }

    /// Rebuild the project this document was exported from.
    ///
    /// The result is never remote-backed and carries no attachments.
    pub fn into_project(self) -> Project {
        let meta = self.project;
        Project {
            id: meta.id,
            name: meta.name,
            description: meta.description,
            researcher: meta.researcher,
            status: meta.status,
            created_at: meta.created_at,
            modified_at: meta.modified_at,
            shapes: self.shapes,
            research_data: self.research_data,
            comments: self.comments,
            measurement: meta.measurement,
            active_layers: meta.active_layers,
            remote: false,
            attachments: BTreeMap::new(),
        }
    }
}
