pub mod memory_group_repository;
pub mod sqlite_group_repository;

pub use memory_group_repository::InMemoryGroupRepository;
pub use sqlite_group_repository::SqliteGroupRepository;
