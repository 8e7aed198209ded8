use chrono::{DateTime, Utc};

use crate::errors::DomainError;
use crate::group::ConnectionGroup;

/// Window on `last_interaction_time`. Only applied when both bounds are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn between(after: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        Self {
            after: Some(after),
            before: Some(before),
        }
    }

    /// Returns the active bounds, or an error if `after` is later than `before`.
    pub fn bounds(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>, DomainError> {
        match (self.after, self.before) {
            (Some(after), Some(before)) if after > before => Err(DomainError::InvalidRange(
                format!("after time {} can't come after before time {}", after, before),
            )),
            (Some(after), Some(before)) => Ok(Some((after, before))),
            _ => Ok(None),
        }
    }

    /// Both bounds are exclusive.
    pub fn contains(after: DateTime<Utc>, before: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        at > after && at < before
    }
}

/// Keeps the groups matching every supplied predicate.
///
/// The window is checked before anything else, so an inverted range fails
/// even for an empty collection.
pub fn filter(
    groups: Vec<ConnectionGroup>,
    group_name: Option<&str>,
    window: &TimeWindow,
) -> Result<Vec<ConnectionGroup>, DomainError> {
    let bounds = window.bounds()?;

    if group_name.is_none() && bounds.is_none() {
        return Ok(groups);
    }

    Ok(groups
        .into_iter()
        .filter(|g| group_name.map_or(true, |name| g.name.as_ref() == name))
        .filter(|g| {
            bounds.map_or(true, |(after, before)| {
                TimeWindow::contains(after, before, g.last_interaction_time)
            })
        })
        .collect())
}
