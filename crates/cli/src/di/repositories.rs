use conngroups_application::ports::GroupRepository;
use conngroups_infrastructure::SqliteGroupRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub group: Arc<dyn GroupRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            group: Arc::new(SqliteGroupRepository::new(pool)),
        }
    }
}
