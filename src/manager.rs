//! Active project lifecycle: new, save, load, list.
//!
//! The manager owns the active project's metadata and the [`ShapeStore`]
//! for the editing session. Persistence goes through one injected
//! [`PersistenceBackend`]. Saves and loads are all-or-nothing with respect
//! to in-memory state: a failed call leaves everything as it was.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::measurement::MeasurementSummary;
use crate::model::{
    Attachment, Comment, Project, ProjectId, ProjectStatus, ResearchData, Shape, ShapeId, ZoneType,
};
use crate::persistence::{PersistenceBackend, PersistenceError};
use crate::store::ShapeStore;
use crate::undo::UndoConfig;

/// Owns the active project and its editing session.
#[derive(Debug)]
pub struct ProjectManager<B: PersistenceBackend> {
    backend: B,
    /// Metadata and ancillary state; `shapes` stays empty, the store is authoritative.
    project: Project,
    store: ShapeStore,
    history: UndoConfig,
    /// Researcher given to every fresh project
    default_researcher: String,
    listing: Vec<Project>,
    dirty: bool,
}

impl<B: PersistenceBackend> ProjectManager<B> {
    /// Create a manager with an empty draft project.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, UndoConfig::default())
    }

    /// Create a manager with a history configuration for the shape store.
    pub fn with_config(backend: B, history: UndoConfig) -> Self {
        Self {
            backend,
            project: Project::default(),
            store: ShapeStore::with_config(history),
            history,
            default_researcher: String::new(),
            listing: Vec::new(),
            dirty: false,
        }
    }

    /// Attribute the draft and every later fresh project to `researcher`.
    pub fn with_researcher(mut self, researcher: impl Into<String>) -> Self {
        self.default_researcher = researcher.into();
        self.project.researcher = self.default_researcher.clone();
        self
    }

    fn fresh_project(&self) -> Project {
        Project {
            researcher: self.default_researcher.clone(),
            ..Project::default()
        }
    }

    /// The persistence backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the persistence backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Active project metadata. Its `shapes` field is not kept in sync; use
    /// [`Self::store`] or [`Self::snapshot`].
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Full copy of the active project including shapes.
    pub fn snapshot(&self) -> Project {
        let mut project = self.project.clone();
        project.shapes = self.store.shapes().to_vec();
        project
    }

    /// The shape store.
    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    /// Mutable access to the shape store. Marks the project as modified.
    pub fn store_mut(&mut self) -> &mut ShapeStore {
        self.dirty = true;
        &mut self.store
    }

    /// Whether there are changes since the last save, load or reset.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Projects from the most recent listing.
    pub fn cached_projects(&self) -> &[Project] {
        &self.listing
    }

    /// Start a fresh unsaved project.
    ///
    /// All metadata resets to defaults; the researcher becomes the one set
    /// with [`Self::with_researcher`], not the previous project's.
    ///
    /// When shapes exist, the caller must pass `confirmed = true`; otherwise
    /// nothing changes and [`ProjectError::ConfirmationRequired`] is returned.
    pub fn new_project(&mut self, confirmed: bool) -> Result<(), ProjectError> {
        if !self.store.is_empty() && !confirmed {
            return Err(ProjectError::ConfirmationRequired {
                shape_count: self.store.len(),
            });
        }

        self.project = self.fresh_project();
        self.store = ShapeStore::with_config(self.history);
        self.dirty = false;
        log::info!("Started new project");
        Ok(())
    }

    /// Save the active project through the backend.
    ///
    /// On success the project takes the id the backend assigned and the
    /// backend's remote flag, and the cached listing is refreshed. On failure
    /// the in-memory project is untouched.
    pub async fn save(&mut self) -> Result<ProjectId, ProjectError> {
        let mut outgoing = self.snapshot();
        outgoing.modified_at = Utc::now();
        outgoing.remote = self.backend.is_remote();

        let id = match self.backend.save_project(&outgoing).await {
            Ok(id) => id,
            Err(e) => {
                log::error!("Saving project '{}' failed: {}", self.project.name, e);
                return Err(e.into());
            }
        };

        self.project.id = Some(id.clone());
        self.project.remote = outgoing.remote;
        self.project.modified_at = outgoing.modified_at;
        self.dirty = false;
        log::info!(
            "Saved project '{}' as {} ({} backend, {} shapes)",
            self.project.name,
            id,
            self.backend.kind(),
            outgoing.shapes.len()
        );

        if let Err(e) = self.refresh_listing().await {
            log::warn!("Project saved but listing refresh failed: {}", e);
        }
        Ok(id)
    }

    /// Make `project` the active project.
    ///
    /// Remote-backed projects are re-fetched by id first so a stale listing
    /// entry is never adopted. Shapes, research data, comments and the
    /// measurement summary are replaced wholesale and edit history is
    /// discarded.
    pub async fn load(&mut self, project: &Project) -> Result<(), ProjectError> {
        let mut incoming = if project.remote {
            let id = project.id.as_ref().ok_or(ProjectError::NotPersisted)?;
            self.backend.load_project(id).await?
        } else {
            project.clone()
        };

        if let Some(id) = incoming.id.clone().filter(|_| incoming.remote) {
            incoming.attachments = self.fetch_attachments(&id, &incoming.shapes).await;
        }

        self.adopt(incoming);
        Ok(())
    }

    /// Load a project by id from the backend.
    pub async fn load_by_id(&mut self, id: &ProjectId) -> Result<(), ProjectError> {
        let mut project = self.backend.load_project(id).await?;
        if project.remote {
            project.attachments = self.fetch_attachments(id, &project.shapes).await;
        }
        self.adopt(project);
        Ok(())
    }

    /// List projects from the backend and cache the result.
    pub async fn list_projects(&mut self) -> Result<&[Project], ProjectError> {
        self.refresh_listing().await?;
        Ok(&self.listing)
    }

    /// Update name, description and researcher.
    pub fn set_details(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        researcher: impl Into<String>,
    ) {
        self.project.name = name.into();
        self.project.description = description.into();
        self.project.researcher = researcher.into();
        self.dirty = true;
    }

    /// Change lifecycle status.
    pub fn set_status(&mut self, status: ProjectStatus) {
        self.project.status = status;
        self.dirty = true;
    }

    /// Append to the comment thread.
    pub fn add_comment(&mut self, author: impl Into<String>, text: impl Into<String>) -> &Comment {
        self.project.comments.push(Comment::new(author, text));
        self.dirty = true;
        // just pushed
        &self.project.comments[self.project.comments.len() - 1]
    }

    /// Store the latest measurement with the project.
    pub fn record_measurement(&mut self, summary: MeasurementSummary) {
        self.project.measurement = Some(summary);
        self.dirty = true;
    }

    /// Show or hide a zone-type layer.
    pub fn set_layer_visible(&mut self, zone: ZoneType, visible: bool) {
        let changed = if visible {
            self.project.active_layers.insert(zone)
        } else {
            self.project.active_layers.remove(&zone)
        };
        self.dirty |= changed;
    }

    /// Shapes on currently visible layers.
    pub fn visible_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.store
            .shapes()
            .iter()
            .filter(|s| self.project.active_layers.contains(&s.zone))
    }

    /// Ancillary research datasets.
    pub fn research_data(&self) -> &ResearchData {
        &self.project.research_data
    }

    /// Mutable access to the ancillary research datasets.
    pub fn research_data_mut(&mut self) -> &mut ResearchData {
        self.dirty = true;
        &mut self.project.research_data
    }

    /// Photo attachments fetched for a shape on load.
    pub fn attachments(&self, shape: &Shape) -> &[Attachment] {
        self.project
            .attachments
            .get(&shape.id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    async fn refresh_listing(&mut self) -> Result<(), PersistenceError> {
        self.listing = self.backend.list_projects().await?;
        log::debug!(
            "Listed {} projects from {} backend",
            self.listing.len(),
            self.backend.kind()
        );
        Ok(())
    }

    /// Fetch attachments one shape at a time; failures are logged and skipped.
    async fn fetch_attachments(
        &self,
        id: &ProjectId,
        shapes: &[Shape],
    ) -> BTreeMap<ShapeId, Vec<Attachment>> {
        let mut attachments = BTreeMap::new();
        for shape in shapes {
            match self.backend.get_attachments(id, shape.id).await {
                Ok(list) if list.is_empty() => {}
                Ok(list) => {
                    attachments.insert(shape.id, list);
                }
                Err(e) => log::warn!("Attachments for shape {} unavailable: {}", shape.id, e),
            }
        }
        attachments
    }

    fn adopt(&mut self, mut project: Project) {
        let shapes = std::mem::take(&mut project.shapes);
        log::info!(
            "Loaded project '{}' ({} shapes, {} comments)",
            project.name,
            shapes.len(),
            project.comments.len()
        );
        self.store.reset(shapes);
        self.project = project;
        self.dirty = false;
    }
}

/// Errors from project lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Discarding unsaved shapes needs explicit confirmation
    #[error("Project has {shape_count} shapes; confirm to discard them")]
    ConfirmationRequired {
        /// Number of shapes that would be discarded
        shape_count: usize,
    },

    /// A remote project without an id cannot be fetched
    #[error("Project has not been saved yet")]
    NotPersisted,

    /// Backend failure
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}
