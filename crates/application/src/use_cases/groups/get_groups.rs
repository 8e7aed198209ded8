use conngroups_domain::{ConnectionGroup, DomainError};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::GroupRepository;

/// Point lookups of a single group.
pub struct GetGroupsUseCase {
    group_repo: Arc<dyn GroupRepository>,
}

impl GetGroupsUseCase {
    pub fn new(group_repo: Arc<dyn GroupRepository>) -> Self {
        Self { group_repo }
    }

    /// # Errors
    ///
    /// * `DomainError::GroupNotFound` - If the owner has no group with this ID
    #[instrument(skip(self))]
    pub async fn get_by_id(
        &self,
        owner_id: &str,
        group_id: &str,
    ) -> Result<ConnectionGroup, DomainError> {
        self.group_repo
            .get_by_id(owner_id, group_id)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(format!("Group {} not found", group_id)))
    }

    /// # Errors
    ///
    /// * `DomainError::GroupNotFound` - If the owner has no group with this name
    #[instrument(skip(self))]
    pub async fn get_by_name(
        &self,
        owner_id: &str,
        name: &str,
    ) -> Result<ConnectionGroup, DomainError> {
        self.group_repo
            .get_by_name(owner_id, name)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(format!("Group '{}' not found", name)))
    }
}
