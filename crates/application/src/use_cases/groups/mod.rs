mod create_group;
mod delete_group;
mod get_groups;
mod list_groups;
mod update_group;

pub use create_group::CreateGroupUseCase;
pub use delete_group::DeleteGroupUseCase;
pub use get_groups::GetGroupsUseCase;
pub use list_groups::ListGroupsUseCase;
pub use update_group::{UpdateGroupRequest, UpdateGroupUseCase};
