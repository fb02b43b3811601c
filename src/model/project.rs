//! Project data model.
//!
//! A [`Project`] is the unit of persistence: metadata, the full shape
//! collection, ancillary research datasets, the comment thread, the last
//! measurement and the visible layers. It is *unsaved* while `id` is
//! `None` and *persisted* once a backend has assigned an identifier.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shape::{Shape, ShapeId};
use super::zone::ZoneType;
use crate::constants::DEFAULT_PROJECT_NAME;
use crate::measurement::MeasurementSummary;

/// Identifier assigned by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Generate a random identifier (used by stores that assign their own ids).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Work in progress
    #[default]
    Draft,
    /// Under active use
    Active,
    /// Kept for reference only
    Archived,
}

/// Ancillary datasets carried with a project but not interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchData {
    /// Water-quality sample records
    #[serde(default)]
    pub water_quality: Vec<serde_json::Value>,
    /// Survey records
    #[serde(default)]
    pub surveys: Vec<serde_json::Value>,
}

impl ResearchData {
    /// Check if both datasets are empty.
    pub fn is_empty(&self) -> bool {
        self.water_quality.is_empty() && self.surveys.is_empty()
    }
}

/// A comment in the project discussion thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier
    pub id: Uuid,
    /// Author display name
    pub author: String,
    /// Comment body
    pub text: String,
    /// Time the comment was posted
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment stamped with the current time.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: author.into(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Photo attached to a shape, fetched from the document store on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment identifier in the store
    pub id: String,
    /// Shape this photo belongs to
    pub shape_id: ShapeId,
    /// Download location
    pub url: String,
    /// Optional caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// A marine spatial planning project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Backend identifier, `None` until the first successful save.
    #[serde(default)]
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
    /// All drawn shapes
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Ancillary research datasets
    #[serde(default)]
    pub research_data: ResearchData,
    /// Comment thread
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Last computed measurement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<MeasurementSummary>,
    /// Zone types currently shown on the map
    #[serde(default = "Project::default_layers")]
    pub active_layers: BTreeSet<ZoneType>,
    /// Whether the project lives in the remote document store
    #[serde(default)]
    pub remote: bool,
    /// Photo attachments per shape (read-only, populated on load)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attachments: BTreeMap<ShapeId, Vec<Attachment>>,
}

impl Project {
    /// Every zone type visible.
    pub fn default_layers() -> BTreeSet<ZoneType> {
        ZoneType::all().iter().copied().collect()
    }

    /// Create a fresh unsaved draft.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            researcher: String::new(),
            status: ProjectStatus::Draft,
            created_at: now,
            modified_at: now,
            shapes: Vec::new(),
            research_data: ResearchData::default(),
            comments: Vec::new(),
            measurement: None,
            active_layers: Self::default_layers(),
            remote: false,
            attachments: BTreeMap::new(),
        }
    }

    /// Whether a backend has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Total area of all areal shapes in km².
    pub fn total_area_km2(&self) -> f64 {
        self.shapes
            .iter()
            .filter_map(|s| s.geometry.area_km2())
            .sum()
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_NAME)
    }
}
