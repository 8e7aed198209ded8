//! Connection Groups Infrastructure Layer
pub mod database;
pub mod repositories;

pub use repositories::{InMemoryGroupRepository, SqliteGroupRepository};
