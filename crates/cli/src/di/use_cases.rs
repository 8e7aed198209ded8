use super::Repositories;
use conngroups_application::use_cases::{
    CreateGroupUseCase, DeleteGroupUseCase, GetGroupsUseCase, ListGroupsUseCase,
    UpdateGroupUseCase,
};
use conngroups_domain::Config;

pub struct UseCases {
    pub create_group: CreateGroupUseCase,
    pub get_groups: GetGroupsUseCase,
    pub list_groups: ListGroupsUseCase,
    pub update_group: UpdateGroupUseCase,
    pub delete_group: DeleteGroupUseCase,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: &Config) -> Self {
        Self {
            create_group: CreateGroupUseCase::new(repos.group.clone(), config.pictures.clone()),
            get_groups: GetGroupsUseCase::new(repos.group.clone()),
            list_groups: ListGroupsUseCase::new(repos.group.clone(), config.pagination.clone()),
            update_group: UpdateGroupUseCase::new(repos.group.clone(), config.pictures.clone()),
            delete_group: DeleteGroupUseCase::new(repos.group.clone()),
        }
    }
}
