//! Local fallback project storage.
//!
//! Projects are kept as a keyed list and, when a path is configured, written
//! to a single JSON file after every save. Saving replaces the entry with
//! the same id or appends a new one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{PersistenceBackend, PersistenceError};
use crate::model::{Attachment, Project, ProjectId, ShapeId};

/// Current local project file format version.
pub const LOCAL_STORE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct LocalStoreFile {
    version: u32,
    projects: Vec<Project>,
}

/// Keyed project list, optionally backed by a JSON file.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    path: Option<PathBuf>,
    projects: Vec<Project>,
}

impl LocalStore {
    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`, reading existing projects if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let projects = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            let file: LocalStoreFile = serde_json::from_str(&json)?;
            if file.version > LOCAL_STORE_VERSION {
                return Err(PersistenceError::VersionTooNew {
                    found: file.version,
                    supported: LOCAL_STORE_VERSION,
                });
            }
            log::info!("Loaded {} local projects from {:?}", file.projects.len(), path);
            file.projects
        } else {
            log::debug!("No local project file at {:?}", path);
            Vec::new()
        };
        Ok(Self {
            path: Some(path),
            projects,
        })
    }

    /// Default location of the local project file.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .map(|dir| dir.join(crate::constants::APP_DIR_NAME).join("projects.json"))
    }

    /// File backing this store, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether no projects are stored.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn write(&self, projects: &[Project]) -> Result<(), PersistenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = LocalStoreFile {
            version: LOCAL_STORE_VERSION,
            projects: projects.to_vec(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

impl PersistenceBackend for LocalStore {
    fn kind(&self) -> &'static str {
        "local"
    }

    fn is_remote(&self) -> bool {
        false
    }

    async fn save_project(&mut self, project: &Project) -> Result<ProjectId, PersistenceError> {
        let id = project.id.clone().unwrap_or_else(ProjectId::generate);

        let mut stored = project.clone();
        stored.id = Some(id.clone());
        stored.remote = false;
        stored.attachments.clear();

        let mut projects = self.projects.clone();
        match projects.iter_mut().find(|p| p.id.as_ref() == Some(&id)) {
            Some(existing) => *existing = stored,
            None => projects.push(stored),
        }

        // Only adopt the new list once it is on disk
        self.write(&projects)?;
        self.projects = projects;
        log::info!("Saved project {} locally", id);
        Ok(id)
    }

    async fn load_project(&self, id: &ProjectId) -> Result<Project, PersistenceError> {
        self.projects
            .iter()
            .find(|p| p.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, PersistenceError> {
        Ok(self.projects.clone())
    }

    async fn get_attachments(
        &self,
        _project_id: &ProjectId,
        _shape_id: ShapeId,
    ) -> Result<Vec<Attachment>, PersistenceError> {
        Ok(Vec::new())
    }
}
