use serde::Serialize;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    /// Matching records before slicing.
    pub result_count: u64,
    pub page_limit: u32,
    pub page_count: u64,
    pub current_page: u64,
}

impl PageMetadata {
    /// `result_count` must be the pre-slice total, not the returned page size.
    pub fn calculate(result_count: u64, limit: u32, offset: u64) -> Result<Self, DomainError> {
        if limit == 0 {
            return Err(DomainError::InvalidArgument(
                "page limit must be greater than zero".to_string(),
            ));
        }

        let limit_wide = u64::from(limit);
        let page_count = result_count.div_ceil(limit_wide);
        let current_page = if offset == 0 {
            1
        } else {
            offset.saturating_add(1).div_ceil(limit_wide)
        };

        Ok(Self {
            result_count,
            page_limit: limit,
            page_count,
            current_page,
        })
    }
}
