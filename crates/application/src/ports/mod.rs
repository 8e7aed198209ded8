mod group_repository;

pub use group_repository::GroupRepository;
