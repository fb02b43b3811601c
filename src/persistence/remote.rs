//! Remote document store backend.

use serde::{Deserialize, Serialize};

use super::{PersistenceBackend, PersistenceError};
use crate::model::{Attachment, Project, ProjectId, ShapeId};

/// Authenticated owner of remote projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerIdentity(pub String);

impl OwnerIdentity {
    /// Wrap an owner id issued by the authentication provider.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for OwnerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contract of the cloud document store holding remote projects.
#[expect(
    async_fn_in_trait,
    reason = "document stores are driven from a single-threaded session"
)]
pub trait DocumentStore {
    /// Create or update a project for `owner`, returning its id.
    async fn save_project(
        &mut self,
        owner: &OwnerIdentity,
        project: &Project,
    ) -> Result<ProjectId, PersistenceError>;

    /// Fetch one project.
    async fn load_project(&self, id: &ProjectId) -> Result<Project, PersistenceError>;

    /// All projects owned by `owner`.
    async fn list_projects(&self, owner: &OwnerIdentity) -> Result<Vec<Project>, PersistenceError>;

    /// Attachments recorded for a shape.
    async fn get_attachments(
        &self,
        project_id: &ProjectId,
        shape_id: ShapeId,
    ) -> Result<Vec<Attachment>, PersistenceError>;
}

/// A [`DocumentStore`] bound to the identity that owns the session.
#[derive(Debug)]
pub struct RemoteBackend<D: DocumentStore> {
    store: D,
    owner: OwnerIdentity,
}

impl<D: DocumentStore> RemoteBackend<D> {
    /// Bind a store to an owner.
    pub fn new(store: D, owner: OwnerIdentity) -> Self {
        Self { store, owner }
    }

    /// The session owner.
    pub fn owner(&self) -> &OwnerIdentity {
        &self.owner
    }

    /// The wrapped document store.
    pub fn store(&self) -> &D {
        &self.store
    }

    /// Mutable access to the wrapped document store.
    pub fn store_mut(&mut self) -> &mut D {
        &mut self.store
    }
}

impl<D: DocumentStore> PersistenceBackend for RemoteBackend<D> {
    fn kind(&self) -> &'static str {
        "remote"
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn save_project(&mut self, project: &Project) -> Result<ProjectId, PersistenceError> {
        let mut outgoing = project.clone();
        outgoing.remote = true;
        outgoing.attachments.clear();
        let id = self.store.save_project(&self.owner, &outgoing).await?;
        log::info!("Saved project {} to remote store for {}", id, self.owner);
        Ok(id)
    }

    async fn load_project(&self, id: &ProjectId) -> Result<Project, PersistenceError> {
        let mut project = self.store.load_project(id).await?;
        project.id = Some(id.clone());
        project.remote = true;
        Ok(project)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, PersistenceError> {
        let mut projects = self.store.list_projects(&self.owner).await?;
        for project in &mut projects {
            project.remote = true;
        }
        Ok(projects)
    }

    async fn get_attachments(
        &self,
        project_id: &ProjectId,
        shape_id: ShapeId,
    ) -> Result<Vec<Attachment>, PersistenceError> {
        self.store.get_attachments(project_id, shape_id).await
    }
}
