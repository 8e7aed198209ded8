use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::DomainError;

const MAX_NAME_LEN: usize = 100;

/// A named list of member user ids owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionGroup {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub member_user_ids: Vec<Arc<str>>,
    pub picture: Option<Arc<str>>,
    pub last_interaction_time: DateTime<Utc>,
}

impl ConnectionGroup {
    pub fn from_new(id: Arc<str>, new: NewConnectionGroup) -> Self {
        Self {
            id,
            name: new.name,
            member_user_ids: new.member_user_ids,
            picture: new.picture,
            last_interaction_time: new.last_interaction_time,
        }
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.member_user_ids.iter().any(|m| m.as_ref() == user_id)
    }

    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidGroupName(
                "Group name cannot be empty".to_string(),
            ));
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidGroupName(format!(
                "Group name cannot exceed {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(())
    }

    pub fn validate_member_id(user_id: &str) -> Result<(), DomainError> {
        if user_id.trim().is_empty() {
            return Err(DomainError::InvalidArgument(
                "Member user id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fields for a group that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewConnectionGroup {
    pub name: Arc<str>,
    pub member_user_ids: Vec<Arc<str>>,
    pub picture: Option<Arc<str>>,
    pub last_interaction_time: DateTime<Utc>,
}

/// Partial update. Only the supplied fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub name: Option<Arc<str>>,
    pub member_to_add: Option<Arc<str>>,
    pub member_to_remove: Option<Arc<str>>,
    /// `Some(None)` clears the stored picture.
    pub picture: Option<Option<Arc<str>>>,
    pub last_interaction_time: Option<DateTime<Utc>>,
}

impl GroupPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.member_to_add.is_none()
            && self.member_to_remove.is_none()
            && self.picture.is_none()
            && self.last_interaction_time.is_none()
    }

    /// Merges the patch into `group`.
    ///
    /// The member addition is applied before the removal, so a patch that adds
    /// and removes the same id leaves the list unchanged. Removal drops the
    /// first matching entry only; removing a non-member is a no-op.
    pub fn apply(&self, group: &mut ConnectionGroup) {
        if let Some(name) = &self.name {
            group.name = name.clone();
        }

        if let Some(member) = &self.member_to_add {
            group.member_user_ids.push(member.clone());
        }

        if let Some(member) = &self.member_to_remove {
            if let Some(pos) = group
                .member_user_ids
                .iter()
                .position(|m| m.as_ref() == member.as_ref())
            {
                group.member_user_ids.remove(pos);
            }
        }

        if let Some(picture) = &self.picture {
            group.picture = picture.clone();
        }

        if let Some(at) = self.last_interaction_time {
            group.last_interaction_time = at;
        }
    }

    /// The new name, if this patch renames `group` to something different.
    pub fn rename_of<'a>(&'a self, group: &ConnectionGroup) -> Option<&'a str> {
        self.name
            .as_deref()
            .filter(|name| *name != group.name.as_ref())
    }
}
