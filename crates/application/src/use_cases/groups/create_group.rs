use chrono::Utc;
use conngroups_domain::config::PictureConfig;
use conngroups_domain::{
    normalize_picture, ConnectionGroup, DomainError, GroupOutcome, NewConnectionGroup,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::ports::GroupRepository;

pub struct CreateGroupUseCase {
    group_repo: Arc<dyn GroupRepository>,
    pictures: PictureConfig,
}

impl CreateGroupUseCase {
    pub fn new(group_repo: Arc<dyn GroupRepository>, pictures: PictureConfig) -> Self {
        Self {
            group_repo,
            pictures,
        }
    }

    /// Creates a group for `owner_id`, stamping its last interaction as now.
    ///
    /// A duplicate name yields `GroupOutcome::Conflict` with the existing
    /// group's identity; an unusable picture yields `GroupOutcome::Rejected`.
    /// Neither creates a record.
    #[instrument(skip(self, picture))]
    pub async fn execute(
        &self,
        owner_id: &str,
        name: String,
        member_user_ids: Vec<String>,
        picture: Option<String>,
    ) -> Result<GroupOutcome, DomainError> {
        ConnectionGroup::validate_name(&name)?;
        for member in &member_user_ids {
            ConnectionGroup::validate_member_id(member)?;
        }

        // Name clashes are reported ahead of picture problems. The store
        // re-checks atomically on insert.
        if let Some(existing) = self.group_repo.get_by_name(owner_id, &name).await? {
            warn!(
                owner_id = owner_id,
                group_id = %existing.id,
                name = %name,
                "Group already exists"
            );
            return Ok(GroupOutcome::Conflict {
                group_id: existing.id,
                group_name: existing.name,
            });
        }

        let picture = match picture {
            Some(raw) => match normalize_picture(&raw, self.pictures.max_bytes) {
                Ok(p) => p,
                Err(rejection) => {
                    warn!(owner_id = owner_id, reason = %rejection, "Group picture rejected");
                    return Ok(GroupOutcome::Rejected {
                        reason: rejection.to_string(),
                    });
                }
            },
            None => None,
        };

        let group = NewConnectionGroup {
            name: Arc::from(name.as_str()),
            member_user_ids: member_user_ids
                .iter()
                .map(|m| Arc::from(m.as_str()))
                .collect(),
            picture,
            last_interaction_time: Utc::now(),
        };

        let outcome = self.group_repo.create_if_absent(owner_id, group).await?;

        match &outcome {
            GroupOutcome::Created { group_id } => info!(
                owner_id = owner_id,
                group_id = %group_id,
                name = %name,
                "Group created successfully"
            ),
            other => warn!(owner_id = owner_id, outcome = ?other, "Group not created"),
        }

        Ok(outcome)
    }
}
