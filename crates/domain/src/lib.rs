//! Connection Groups Domain Layer
pub mod config;
pub mod errors;
pub mod group;
pub mod outcome;
pub mod picture;
pub mod query;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use group::{ConnectionGroup, GroupPatch, NewConnectionGroup};
pub use outcome::{GroupOutcome, GROUP_EXISTS_MESSAGE, NAME_IN_USE_MESSAGE};
pub use picture::{normalize_picture, PictureRejection};
pub use query::{
    Page, PageMetadata, PageRequest, SortDirection, SortField, TimeWindow,
};
