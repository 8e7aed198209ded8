//! Configuration module
//!
//! - `root`: Main configuration and CLI overrides
//! - `database`: SQLite store settings
//! - `logging`: Logging settings
//! - `pagination`: Listing defaults and ceilings
//! - `pictures`: Group picture limits
//! - `errors`: Configuration errors

pub mod database;
pub mod errors;
pub mod logging;
pub mod pagination;
pub mod pictures;
pub mod root;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use pagination::PaginationConfig;
pub use pictures::PictureConfig;
pub use root::{CliOverrides, Config};
