#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use conngroups_application::ports::GroupRepository;
use conngroups_domain::{
    ConnectionGroup, DomainError, GroupOutcome, GroupPatch, NewConnectionGroup,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock GroupRepository
// ============================================================================

pub struct MockGroupRepository {
    groups: Arc<RwLock<HashMap<String, Vec<ConnectionGroup>>>>,
    next_id: Arc<AtomicU64>,
    list_calls: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockGroupRepository {
    pub fn new() -> Self {
        Self {
            groups: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            list_calls: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn with_groups(owner_id: &str, groups: Vec<ConnectionGroup>) -> Self {
        let repo = Self::new();
        repo.groups
            .write()
            .await
            .insert(owner_id.to_string(), groups);
        repo
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub async fn count(&self, owner_id: &str) -> usize {
        self.groups
            .read()
            .await
            .get(owner_id)
            .map(|g| g.len())
            .unwrap_or(0)
    }

    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::Relaxed)
    }

    async fn check_fail(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError("mock store failure".to_string()));
        }
        Ok(())
    }
}

impl Default for MockGroupRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupRepository for MockGroupRepository {
    async fn get_by_id(
        &self,
        owner_id: &str,
        group_id: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError> {
        self.check_fail().await?;
        Ok(self
            .groups
            .read()
            .await
            .get(owner_id)
            .and_then(|groups| groups.iter().find(|g| g.id.as_ref() == group_id).cloned()))
    }

    async fn get_by_name(
        &self,
        owner_id: &str,
        name: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError> {
        self.check_fail().await?;
        Ok(self
            .groups
            .read()
            .await
            .get(owner_id)
            .and_then(|groups| groups.iter().find(|g| g.name.as_ref() == name).cloned()))
    }

    async fn list_all(&self, owner_id: &str) -> Result<Option<Vec<ConnectionGroup>>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        self.check_fail().await?;
        Ok(self.groups.read().await.get(owner_id).cloned())
    }

    async fn create_if_absent(
        &self,
        owner_id: &str,
        group: NewConnectionGroup,
    ) -> Result<GroupOutcome, DomainError> {
        self.check_fail().await?;
        let mut map = self.groups.write().await;
        let groups = map.entry(owner_id.to_string()).or_default();

        if let Some(existing) = groups.iter().find(|g| g.name == group.name) {
            return Ok(GroupOutcome::Conflict {
                group_id: existing.id.clone(),
                group_name: existing.name.clone(),
            });
        }

        let id: Arc<str> = Arc::from(format!(
            "group_id_{}",
            self.next_id.fetch_add(1, Ordering::Relaxed)
        ));
        groups.push(ConnectionGroup::from_new(id.clone(), group));
        Ok(GroupOutcome::Created { group_id: id })
    }

    async fn update(
        &self,
        owner_id: &str,
        group_id: &str,
        patch: GroupPatch,
    ) -> Result<GroupOutcome, DomainError> {
        self.check_fail().await?;
        let mut map = self.groups.write().await;
        let groups = map
            .get_mut(owner_id)
            .ok_or_else(|| DomainError::GroupNotFound(group_id.to_string()))?;

        let idx = groups
            .iter()
            .position(|g| g.id.as_ref() == group_id)
            .ok_or_else(|| DomainError::GroupNotFound(group_id.to_string()))?;

        if let Some(new_name) = patch.rename_of(&groups[idx]) {
            if let Some(other) = groups.iter().find(|g| g.name.as_ref() == new_name) {
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

    async fn delete_if_present(&self, owner_id: &str, group_id: &str) -> Result<(), DomainError> {
        self.check_fail().await?;
        let mut map = self.groups.write().await;
        let groups = map
            .get_mut(owner_id)
            .ok_or_else(|| DomainError::GroupNotFound(group_id.to_string()))?;
        let before = groups.len();
        groups.retain(|g| g.id.as_ref() != group_id);
        if groups.len() == before {
            return Err(DomainError::GroupNotFound(group_id.to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Helper Builders
// ============================================================================

pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, hour, 0, 0).unwrap()
}

pub fn make_group(id: &str, name: &str, hour: u32) -> ConnectionGroup {
    ConnectionGroup {
        id: Arc::from(id),
        name: Arc::from(name),
        member_user_ids: vec![Arc::from("1ca26428-98eb-4aa3-8943-5f459873ef85")],
        picture: None,
        last_interaction_time: at(hour),
    }
}
