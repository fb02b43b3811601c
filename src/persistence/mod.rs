//! Project persistence backends.
//!
//! The project manager talks to exactly one [`PersistenceBackend`], chosen
//! when it is constructed:
//!
//! - [`RemoteBackend`] when an authenticated [`OwnerIdentity`] is available,
//!   wrapping an external [`DocumentStore`].
//! - [`LocalStore`] otherwise, a keyed list of projects in a JSON file.
//!
//! [`Backend::select`] performs that choice once, so no call site has to
//! branch on ambient identity state.
//!
//! All operations are `async` and runtime-agnostic; callers drive them with
//! whatever executor the host provides (`pollster::block_on` in the CLI).

mod error;
mod local;
#[cfg(test)]
mod memory;
mod remote;

pub use error::PersistenceError;
pub use local::LocalStore;
#[cfg(test)]
pub(crate) use memory::MemoryDocumentStore;
pub use remote::{DocumentStore, OwnerIdentity, RemoteBackend};

use crate::model::{Attachment, Project, ProjectId, ShapeId};

/// Storage for whole projects.
#[expect(
    async_fn_in_trait,
    reason = "backends are driven from a single-threaded session"
)]
pub trait PersistenceBackend {
    /// Short name for logs ("local", "remote").
    fn kind(&self) -> &'static str;

    /// Whether saved projects are remote-backed.
    fn is_remote(&self) -> bool;

    /// Store a project. Replaces the stored copy when `project.id` is set,
    /// otherwise creates a new entry. Returns the identifier in effect.
    async fn save_project(&mut self, project: &Project) -> Result<ProjectId, PersistenceError>;

    /// Fetch the authoritative copy of a project.
    async fn load_project(&self, id: &ProjectId) -> Result<Project, PersistenceError>;

    /// List the projects visible to this backend.
    async fn list_projects(&self) -> Result<Vec<Project>, PersistenceError>;

    /// Photo attachments recorded for one shape.
    async fn get_attachments(
        &self,
        project_id: &ProjectId,
        shape_id: ShapeId,
    ) -> Result<Vec<Attachment>, PersistenceError>;
}

/// Backend picked at construction time.
#[derive(Debug)]
pub enum Backend<D: DocumentStore> {
    /// Local fallback storage
    Local(LocalStore),
    /// Remote document store with an owner identity
    Remote(RemoteBackend<D>),
}

impl<D: DocumentStore> Backend<D> {
    /// Use the remote store when an identity is available, the local store otherwise.
    pub fn select(identity: Option<OwnerIdentity>, store: D, local: LocalStore) -> Self {
        match identity {
            Some(owner) => {
                log::info!("Using remote project store for {}", owner);
                Backend::Remote(RemoteBackend::new(store, owner))
            }
            None => {
                log::info!("No identity available, using local project store");
                Backend::Local(local)
            }
        }
    }
}

impl<D: DocumentStore> PersistenceBackend for Backend<D> {
    fn kind(&self) -> &'static str {
        match self {
            Backend::Local(b) => b.kind(),
            Backend::Remote(b) => b.kind(),
        }
    }

    fn is_remote(&self) -> bool {
        match self {
            Backend::Local(b) => b.is_remote(),
            Backend::Remote(b) => b.is_remote(),
        }
    }

    async fn save_project(&mut self, project: &Project) -> Result<ProjectId, PersistenceError> {
        match self {
            Backend::Local(b) => b.save_project(project).await,
            Backend::Remote(b) => b.save_project(project).await,
        }
    }

    async fn load_project(&self, id: &ProjectId) -> Result<Project, PersistenceError> {
        match self {
            Backend::Local(b) => b.load_project(id).await,
            Backend::Remote(b) => b.load_project(id).await,
        }
    }

    async fn list_projects(&self) -> Result<Vec<Project>, PersistenceError> {
        match self {
            Backend::Local(b) => b.list_projects().await,
            Backend::Remote(b) => b.list_projects().await,
        }
    }

    async fn get_attachments(
        &self,
        project_id: &ProjectId,
        shape_id: ShapeId,
    ) -> Result<Vec<Attachment>, PersistenceError> {
        match self {
            Backend::Local(b) => b.get_attachments(project_id, shape_id).await,
            Backend::Remote(b) => b.get_attachments(project_id, shape_id).await,
        }
    }
}
