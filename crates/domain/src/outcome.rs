use serde::Serialize;
use std::sync::Arc;

pub const GROUP_EXISTS_MESSAGE: &str = "Group Already Exists";
pub const NAME_IN_USE_MESSAGE: &str = "Group name is already in use, choose another group name.";

/// Result of a create or update that reached the store.
///
/// `Conflict` and `Rejected` are business-rule outcomes, not errors: the call
/// succeeded and the caller is expected to surface the advisory to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GroupOutcome {
    Created {
        group_id: Arc<str>,
    },
    Updated {
        group_id: Arc<str>,
    },
    Conflict {
        group_id: Arc<str>,
        group_name: Arc<str>,
    },
    Rejected {
        reason: String,
    },
}

impl GroupOutcome {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    pub fn is_soft_failure(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::Rejected { .. })
    }

    /// Advisory text for the user, `None` on success.
    ///
    /// The conflict wording depends on the write, so callers pass
    /// [`GROUP_EXISTS_MESSAGE`] for creates and [`NAME_IN_USE_MESSAGE`] for
    /// renames.
    pub fn message<'a>(&'a self, conflict_message: &'a str) -> Option<&'a str> {
        match self {
            Self::Conflict { .. } => Some(conflict_message),
            Self::Rejected { reason } => Some(reason.as_str()),
            Self::Created { .. } | Self::Updated { .. } => None,
        }
    }

    pub fn group_id(&self) -> Option<&str> {
        match self {
            Self::Created { group_id }
            | Self::Updated { group_id }
            | Self::Conflict { group_id, .. } => Some(group_id),
            Self::Rejected { .. } => None,
        }
    }
}
