use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Owner has no connection groups: {0}")]
    OwnerNotFound(String),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid group name: {0}")]
    InvalidGroupName(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// True for both "no such group" and "no such owner collection".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GroupNotFound(_) | Self::OwnerNotFound(_))
    }
}
