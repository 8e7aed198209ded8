use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::errors::DomainError;
use crate::group::ConnectionGroup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    GroupName,
    LastInteractionTime,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GroupName => "group_name",
            Self::LastInteractionTime => "last_interaction_time",
        }
    }

    fn compare(&self, a: &ConnectionGroup, b: &ConnectionGroup) -> Ordering {
        match self {
            Self::GroupName => a.name.cmp(&b.name),
            Self::LastInteractionTime => a.last_interaction_time.cmp(&b.last_interaction_time),
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group_name" | "name" => Ok(Self::GroupName),
            "last_interaction_time" | "latest_interaction_time" => Ok(Self::LastInteractionTime),
            other => Err(DomainError::InvalidArgument(format!(
                "Unknown order-by field: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Lenient parse: anything but `asc`/`desc` means "no ordering".
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Stable sort by `field`. Without a direction the input order is kept.
pub fn sort(groups: &mut [ConnectionGroup], field: SortField, direction: Option<SortDirection>) {
    match direction {
        Some(SortDirection::Asc) => groups.sort_by(|a, b| field.compare(a, b)),
        Some(SortDirection::Desc) => groups.sort_by(|a, b| field.compare(b, a)),
        None => {}
    }
}
