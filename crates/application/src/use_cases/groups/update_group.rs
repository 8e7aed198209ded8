use chrono::{DateTime, Utc};
use conngroups_domain::config::PictureConfig;
use conngroups_domain::{
    normalize_picture, ConnectionGroup, DomainError, GroupOutcome, GroupPatch,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::ports::GroupRepository;

/// Raw update input. Every field is optional and only supplied ones change.
#[derive(Debug, Clone, Default)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub member_to_add: Option<String>,
    pub member_to_remove: Option<String>,
    /// Base64 payload, optionally wrapped in a data URL. An empty payload
    /// removes the current picture.
    pub picture: Option<String>,
    pub last_interaction_time: Option<DateTime<Utc>>,
}

/// Use case for updating a group.
///
/// This use case enforces business rules:
/// - A new name must be valid and not used by another of the owner's groups
/// - A new picture must be valid base64 within the configured size
/// - Nothing is written when the request carries no changes
pub struct UpdateGroupUseCase {
    group_repo: Arc<dyn GroupRepository>,
    pictures: PictureConfig,
}

impl UpdateGroupUseCase {
    pub fn new(group_repo: Arc<dyn GroupRepository>, pictures: PictureConfig) -> Self {
        Self {
            group_repo,
            pictures,
        }
    }

    /// Updates a group.
    ///
    /// # Returns
    ///
    /// * `Ok(GroupOutcome::Updated)` - The changes were written
    /// * `Ok(GroupOutcome::Conflict)` - The new name belongs to another group
    /// * `Ok(GroupOutcome::Rejected)` - The picture was refused
    ///
    /// # Errors
    ///
    /// * `DomainError::GroupNotFound` - If the group doesn't exist
    /// * `DomainError::InvalidGroupName` - If the new name is malformed
    /// * `DomainError::DatabaseError` - If a database error occurs
    #[instrument(skip(self, request))]
    pub async fn execute(
        &self,
        owner_id: &str,
        group_id: &str,
        request: UpdateGroupRequest,
    ) -> Result<GroupOutcome, DomainError> {
        if let Some(ref n) = request.name {
            ConnectionGroup::validate_name(n)?;
        }
        for member in [&request.member_to_add, &request.member_to_remove]
            .into_iter()
            .flatten()
        {
            ConnectionGroup::validate_member_id(member)?;
        }

        // Soft outcomes are only reported for an existing group.
        let current = self
            .group_repo
            .get_by_id(owner_id, group_id)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(format!("Group {} not found", group_id)))?;

        if let Some(ref n) = request.name {
            if n.as_str() != current.name.as_ref() {
                if let Some(existing) = self.group_repo.get_by_name(owner_id, n).await? {
                    warn!(
                        owner_id = owner_id,
                        group_id = group_id,
                        taken_by = %existing.id,
                        name = %n,
                        "Group name already in use"
                    );
                    return Ok(GroupOutcome::Conflict {
                        group_id: existing.id,
                        group_name: existing.name,
                    });
                }
            }
        }

        let picture = match request.picture {
            Some(raw) => match normalize_picture(&raw, self.pictures.max_bytes) {
                Ok(p) => Some(p),
                Err(rejection) => {
                    warn!(
                        owner_id = owner_id,
                        group_id = group_id,
                        reason = %rejection,
                        "Group picture rejected"
                    );
                    return Ok(GroupOutcome::Rejected {
                        reason: rejection.to_string(),
                    });
                }
            },
            None => None,
        };

        let patch = GroupPatch {
            name: request.name.map(|n| Arc::from(n.as_str())),
            member_to_add: request.member_to_add.map(|m| Arc::from(m.as_str())),
            member_to_remove: request.member_to_remove.map(|m| Arc::from(m.as_str())),
            picture,
            last_interaction_time: request.last_interaction_time,
        };

        let outcome = self.group_repo.update(owner_id, group_id, patch).await?;

        if let GroupOutcome::Updated { .. } = outcome {
            info!(
                owner_id = owner_id,
                group_id = group_id,
                "Group updated successfully"
            );
        }

        Ok(outcome)
    }
}
