use async_trait::async_trait;
use conngroups_application::ports::GroupRepository;
use conngroups_domain::{
    ConnectionGroup, DomainError, GroupOutcome, GroupPatch, NewConnectionGroup,
};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

type OwnerGroups = Arc<RwLock<Vec<ConnectionGroup>>>;

/// Process-local group store with one lock per owner.
///
/// The map shard lock is only held long enough to clone the owner's handle,
/// never across an await, so owners never contend with each other. Within an
/// owner, readers share the lock and every write is exclusive, which makes the
/// conditional writes atomic.
#[derive(Default)]
pub struct InMemoryGroupRepository {
    owners: DashMap<Arc<str>, OwnerGroups>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn owner(&self, owner_id: &str) -> Option<OwnerGroups> {
        self.owners.get(owner_id).map(|entry| entry.value().clone())
    }

    fn owner_or_insert(&self, owner_id: &str) -> OwnerGroups {
        if let Some(existing) = self.owner(owner_id) {
            return existing;
        }
        self.owners
            .entry(Arc::from(owner_id))
            .or_default()
            .value()
            .clone()
    }

    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }
}

fn not_found(group_id: &str) -> DomainError {
    DomainError::GroupNotFound(format!("Group {} not found", group_id))
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    #[instrument(skip(self))]
    async fn get_by_id(
        &self,
        owner_id: &str,
        group_id: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError> {
        let Some(groups) = self.owner(owner_id) else {
            return Ok(None);
        };
        let groups = groups.read().await;
        Ok(groups.iter().find(|g| &*g.id == group_id).cloned())
    }

    #[instrument(skip(self))]
    async fn get_by_name(
        &self,
        owner_id: &str,
        name: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError> {
        let Some(groups) = self.owner(owner_id) else {
            return Ok(None);
        };
        let groups = groups.read().await;
        Ok(groups.iter().find(|g| &*g.name == name).cloned())
    }

    #[instrument(skip(self))]
    async fn list_all(&self, owner_id: &str) -> Result<Option<Vec<ConnectionGroup>>, DomainError> {
        let Some(groups) = self.owner(owner_id) else {
            return Ok(None);
        };
        let groups = groups.read().await.clone();
        debug!(owner_id = owner_id, count = groups.len(), "Owner groups loaded");
        Ok(Some(groups))
    }

    #[instrument(skip(self, group), fields(name = %group.name))]
    async fn create_if_absent(
        &self,
        owner_id: &str,
        group: NewConnectionGroup,
    ) -> Result<GroupOutcome, DomainError> {
        let handle = self.owner_or_insert(owner_id);
        let mut groups = handle.write().await;

        if let Some(existing) = groups.iter().find(|g| g.name == group.name) {
            return Ok(GroupOutcome::Conflict {
                group_id: existing.id.clone(),
                group_name: existing.name.clone(),
            });
        }

        let group_id: Arc<str> = Arc::from(Uuid::new_v4().to_string().as_str());
        groups.push(ConnectionGroup::from_new(group_id.clone(), group));

        Ok(GroupOutcome::Created { group_id })
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        owner_id: &str,
        group_id: &str,
        patch: GroupPatch,
    ) -> Result<GroupOutcome, DomainError> {
        let handle = self.owner(owner_id).ok_or_else(|| not_found(group_id))?;
        let mut groups = handle.write().await;

        let idx = groups
            .iter()
            .position(|g| &*g.id == group_id)
            .ok_or_else(|| not_found(group_id))?;

        if let Some(new_name) = patch.rename_of(&groups[idx]) {
            if let Some(other) = groups.iter().find(|g| &*g.name == new_name) {
                return Ok(GroupOutcome::Conflict {
                    group_id: other.id.clone(),
                    group_name: other.name.clone(),
                });
            }
        }

        patch.apply(&mut groups[idx]);

        Ok(GroupOutcome::Updated {
            group_id: groups[idx].id.clone(),
        })
    }

    #[instrument(skip(self))]
    async fn delete_if_present(&self, owner_id: &str, group_id: &str) -> Result<(), DomainError> {
        let handle = self.owner(owner_id).ok_or_else(|| not_found(group_id))?;
        let mut groups = handle.write().await;

        let idx = groups
            .iter()
            .position(|g| &*g.id == group_id)
            .ok_or_else(|| not_found(group_id))?;
        groups.remove(idx);

        Ok(())
    }
}
