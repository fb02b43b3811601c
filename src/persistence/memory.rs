//! In-process document store backing the persistence tests.

use std::collections::{BTreeMap, HashMap};

use super::{DocumentStore, OwnerIdentity, PersistenceError};
use crate::model::{Attachment, Project, ProjectId, ShapeId};

/// [`DocumentStore`] kept in memory. Can be switched offline to simulate an
/// unreachable service.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    projects: BTreeMap<ProjectId, (OwnerIdentity, Project)>,
    attachments: HashMap<(ProjectId, ShapeId), Vec<Attachment>>,
    offline: bool,
}

impl MemoryDocumentStore {
    /// Create an empty, reachable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with [`PersistenceError::Unreachable`].
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Record an attachment for a shape.
    pub fn add_attachment(&mut self, project_id: ProjectId, attachment: Attachment) {
        self.attachments
            .entry((project_id, attachment.shape_id))
            .or_default()
            .push(attachment);
    }

    /// Overwrite the stored copy, e.g. to simulate an edit from another device.
    pub fn put(&mut self, owner: OwnerIdentity, project: Project) -> Option<ProjectId> {
        let id = project.id.clone()?;
        self.projects.insert(id.clone(), (owner, project));
        Some(id)
    }

    /// Number of stored projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether no projects are stored.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn check_online(&self) -> Result<(), PersistenceError> {
        if self.offline {
            Err(PersistenceError::Unreachable(
                "document store is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn save_project(
        &mut self,
        owner: &OwnerIdentity,
        project: &Project,
    ) -> Result<ProjectId, PersistenceError> {
        self.check_online()?;

        let id = project.id.clone().unwrap_or_else(ProjectId::generate);
        let foreign = self
            .projects
            .get(&id)
            .is_some_and(|(existing_owner, _)| existing_owner != owner);
        if foreign {
            return Err(PersistenceError::Rejected(format!(
                "project {} belongs to another owner",
                id
            )));
        }

        let mut stored = project.clone();
        stored.id = Some(id.clone());
        self.projects.insert(id.clone(), (owner.clone(), stored));
        Ok(id)
    }

    async fn load_project(&self, id: &ProjectId) -> Result<Project, PersistenceError> {
        self.check_online()?;
        self.projects
            .get(id)
            .map(|(_, project)| project.clone())
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))
    }

    async fn list_projects(&self, owner: &OwnerIdentity) -> Result<Vec<Project>, PersistenceError> {
        self.check_online()?;
        Ok(self
            .projects
            .values()
            .filter(|(o, _)| o == owner)
            .map(|(_, project)| project.clone())
            .collect())
    }

    async fn get_attachments(
        &self,
        project_id: &ProjectId,
        shape_id: ShapeId,
    ) -> Result<Vec<Attachment>, PersistenceError> {
        self.check_online()?;
        Ok(self
            .attachments
            .get(&(project_id.clone(), shape_id))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_scoped_listing() {
        let mut store = MemoryDocumentStore::new();
        let alice = OwnerIdentity::new("alice");
        let bob = OwnerIdentity::new("bob");

        pollster::block_on(store.save_project(&alice, &Project::new("A"))).unwrap();
        pollster::block_on(store.save_project(&bob, &Project::new("B"))).unwrap();

        let listed = pollster::block_on(store.list_projects(&alice)).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "A");
    }

    #[test]
    fn test_foreign_overwrite_rejected() {
        let mut store = MemoryDocumentStore::new();
        let alice = OwnerIdentity::new("alice");
        let id = pollster::block_on(store.save_project(&alice, &Project::new("A"))).unwrap();

        let mut hijack = Project::new("A'");
        hijack.id = Some(id);
        let err =
            pollster::block_on(store.save_project(&OwnerIdentity::new("mallory"), &hijack))
                .unwrap_err();
        assert!(matches!(err, PersistenceError::Rejected(_)));
    }

    #[test]
    fn test_offline() {
        let mut store = MemoryDocumentStore::new();
        store.set_offline(true);
        let owner = OwnerIdentity::new("a");
        let err = pollster::block_on(store.save_project(&owner, &Project::new("A"))).unwrap_err();
        assert!(matches!(err, PersistenceError::Unreachable(_)));
        assert!(store.is_empty());
    }
}
