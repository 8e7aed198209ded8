use async_trait::async_trait;
use conngroups_domain::{
    ConnectionGroup, DomainError, GroupOutcome, GroupPatch, NewConnectionGroup,
};

/// Per-owner store of connection groups.
///
/// Every method is scoped to one owner; operations on different owners must
/// not block one another. The conditional writes (`create_if_absent`,
/// `update`, `delete_if_present`) are atomic with respect to other writes on
/// the same owner.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Retrieves a group by its ID.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ConnectionGroup))` - If the group exists
    /// * `Ok(None)` - If the owner has no group with this ID
    /// * `Err(DomainError)` - If retrieval fails
    async fn get_by_id(
        &self,
        owner_id: &str,
        group_id: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError>;

    /// Retrieves a group by its exact, case-sensitive name.
    async fn get_by_name(
        &self,
        owner_id: &str,
        name: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError>;

    /// Retrieves every group of an owner in insertion order.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(groups))` - The owner's collection, possibly empty
    /// * `Ok(None)` - The owner has never had a collection
    /// * `Err(DomainError)` - If retrieval fails
    async fn list_all(&self, owner_id: &str) -> Result<Option<Vec<ConnectionGroup>>, DomainError>;

    /// Inserts the group unless the owner already has one with the same name.
    ///
    /// # Returns
    ///
    /// * `Ok(GroupOutcome::Created)` - With the newly assigned ID
    /// * `Ok(GroupOutcome::Conflict)` - Carrying the existing group's ID and name
    /// * `Err(DomainError::DatabaseError)` - If a database error occurs
    async fn create_if_absent(
        &self,
        owner_id: &str,
        group: NewConnectionGroup,
    ) -> Result<GroupOutcome, DomainError>;

    /// Merges `patch` into the group.
    ///
    /// # Returns
    ///
    /// * `Ok(GroupOutcome::Updated)` - The patch was written (an empty patch writes nothing)
    /// * `Ok(GroupOutcome::Conflict)` - The new name belongs to another group
    ///
    /// # Errors
    ///
    /// * `DomainError::GroupNotFound` - If the group doesn't exist
    /// * `DomainError::DatabaseError` - If a database error occurs
    async fn update(
        &self,
        owner_id: &str,
        group_id: &str,
        patch: GroupPatch,
    ) -> Result<GroupOutcome, DomainError>;

    /// Deletes the group.
    ///
    /// # Errors
    ///
    /// * `DomainError::GroupNotFound` - If the group doesn't exist
    /// * `DomainError::DatabaseError` - If a database error occurs
    async fn delete_if_present(&self, owner_id: &str, group_id: &str) -> Result<(), DomainError>;
}
