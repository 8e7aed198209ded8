use conngroups_domain::config::PaginationConfig;
use conngroups_domain::query::{self, Page, PageRequest};
use conngroups_domain::{ConnectionGroup, DomainError};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::GroupRepository;

/// Paginated, filterable, sortable listing of one owner's groups.
pub struct ListGroupsUseCase {
    group_repo: Arc<dyn GroupRepository>,
    pagination: PaginationConfig,
}

impl ListGroupsUseCase {
    pub fn new(group_repo: Arc<dyn GroupRepository>, pagination: PaginationConfig) -> Self {
        Self {
            group_repo,
            pagination,
        }
    }

    /// Runs filter, sort and page over the owner's collection.
    ///
    /// # Errors
    ///
    /// * `DomainError::InvalidRange` - If the time window is inverted
    /// * `DomainError::InvalidArgument` - If the limit is zero
    /// * `DomainError::OwnerNotFound` - If the owner has no collection at all;
    ///   a collection with nothing matching is an empty page instead
    #[instrument(skip(self), fields(owner_id = %request.owner_id))]
    pub async fn execute(&self, request: &PageRequest) -> Result<Page<ConnectionGroup>, DomainError> {
        let limit = self.pagination.effective_limit(request.limit);

        // Reject malformed requests before touching the store.
        request.window.bounds()?;
        if limit == 0 {
            return Err(DomainError::InvalidArgument(
                "limit must be a positive integer".to_string(),
            ));
        }

        let groups = self
            .group_repo
            .list_all(&request.owner_id)
            .await?
            .ok_or_else(|| DomainError::OwnerNotFound(request.owner_id.to_string()))?;

        let page = query::execute(groups, request, limit)?;

        debug!(
            returned = page.items.len(),
            result_count = page.metadata.result_count,
            current_page = page.metadata.current_page,
            "Groups page retrieved"
        );

        Ok(page)
    }
}
