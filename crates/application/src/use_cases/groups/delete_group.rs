use conngroups_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::GroupRepository;

pub struct DeleteGroupUseCase {
    group_repo: Arc<dyn GroupRepository>,
}

impl DeleteGroupUseCase {
    pub fn new(group_repo: Arc<dyn GroupRepository>) -> Self {
        Self { group_repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, owner_id: &str, group_id: &str) -> Result<(), DomainError> {
        self.group_repo
            .delete_if_present(owner_id, group_id)
            .await?;

        info!(
            owner_id = owner_id,
            group_id = group_id,
            "Group deleted successfully"
        );

        Ok(())
    }
}
