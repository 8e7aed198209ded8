use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PictureConfig {
    /// Largest decoded picture accepted, in bytes (default: 1 MiB)
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for PictureConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_max_bytes() -> usize {
    1024 * 1024
}
