use serde::Serialize;

use super::metadata::PageMetadata;
use crate::errors::DomainError;

/// One page of results plus metadata describing the whole matching set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub metadata: PageMetadata,
}

/// Slices `[offset, offset + limit)` out of `items`, clipped to its bounds.
///
/// Returns the slice together with the number of items before slicing.
/// An offset past the end yields an empty slice.
pub fn paginate<T>(items: Vec<T>, offset: u64, limit: u32) -> Result<(Vec<T>, u64), DomainError> {
    if limit == 0 {
        return Err(DomainError::InvalidArgument(
            "limit must be a positive integer".to_string(),
        ));
    }

    let result_count = items.len() as u64;
    let skip = usize::try_from(offset).unwrap_or(usize::MAX);

    let page = items.into_iter().skip(skip).take(limit as usize).collect();

    Ok((page, result_count))
}
