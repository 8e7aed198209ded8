use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginationConfig {
    /// Page size used when the caller does not supply one (default: 25)
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Larger requested limits are clamped to this (default: 500)
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl PaginationConfig {
    /// Resolves the effective page size. Zero is passed through so the
    /// query stages can reject it.
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u32 {
    25
}

fn default_max_limit() -> u32 {
    500
}
