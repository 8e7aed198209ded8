//! Paginated listing of an owner's connection groups.
//!
//! A listing runs four stages in a fixed order: [`filter`] narrows the owner's
//! collection, [`sort`] orders it, [`paginate`] slices it and reports the
//! pre-slice total, and [`PageMetadata::calculate`] summarizes that total.

pub mod filter;
pub mod metadata;
pub mod page;
pub mod sort;

pub use filter::{filter, TimeWindow};
pub use metadata::PageMetadata;
pub use page::{paginate, Page};
pub use sort::{sort, SortDirection, SortField};

use std::sync::Arc;

use crate::errors::DomainError;
use crate::group::ConnectionGroup;

/// Caller-supplied listing parameters, already validated for shape.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub owner_id: Arc<str>,
    pub group_name: Option<Arc<str>>,
    pub window: TimeWindow,
    pub offset: u64,
    /// Falls back to the configured default when unset.
    pub limit: Option<u32>,
    pub order_by: Option<SortField>,
    pub order: Option<SortDirection>,
}

impl PageRequest {
    pub fn for_owner(owner_id: impl Into<Arc<str>>) -> Self {
        Self {
            owner_id: owner_id.into(),
            ..Default::default()
        }
    }
}

/// Runs filter, sort, page and metadata over one owner's collection.
pub fn execute(
    groups: Vec<ConnectionGroup>,
    request: &PageRequest,
    limit: u32,
) -> Result<Page<ConnectionGroup>, DomainError> {
    let mut matching = filter(groups, request.group_name.as_deref(), &request.window)?;
    sort(
        &mut matching,
        request.order_by.unwrap_or_default(),
        request.order,
    );
    let (items, result_count) = paginate(matching, request.offset, limit)?;
    let metadata = PageMetadata::calculate(result_count, limit, request.offset)?;

    Ok(Page { items, metadata })
}
