use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use conngroups_application::ports::GroupRepository;
use conngroups_domain::{
    ConnectionGroup, DomainError, GroupOutcome, GroupPatch, NewConnectionGroup,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use uuid::Uuid;

type GroupRow = (String, String, String, Option<String>, String);

const SELECT_COLUMNS: &str =
    "SELECT group_id, group_name, member_user_ids, group_picture, last_interaction_time
     FROM connection_groups";

pub struct SqliteGroupRepository {
    pool: SqlitePool,
}

impl SqliteGroupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_group(row: GroupRow) -> Result<ConnectionGroup, DomainError> {
        let (group_id, group_name, members, picture, last_interaction_time) = row;

        let member_user_ids: Vec<String> = serde_json::from_str(&members).map_err(|e| {
            error!(error = %e, group_id = %group_id, "Corrupt member list");
            DomainError::Serialization(e.to_string())
        })?;

        let last_interaction_time = DateTime::parse_from_rfc3339(&last_interaction_time)
            .map_err(|e| {
                error!(error = %e, group_id = %group_id, "Corrupt interaction timestamp");
                DomainError::Serialization(e.to_string())
            })?
            .with_timezone(&Utc);

        Ok(ConnectionGroup {
            id: Arc::from(group_id.as_str()),
            name: Arc::from(group_name.as_str()),
            member_user_ids: member_user_ids
                .iter()
                .map(|m| Arc::from(m.as_str()))
                .collect(),
            picture: picture.map(|p| Arc::from(p.as_str())),
            last_interaction_time,
        })
    }

    fn encode_members(members: &[Arc<str>]) -> Result<String, DomainError> {
        let members: Vec<&str> = members.iter().map(|m| m.as_ref()).collect();
        serde_json::to_string(&members).map_err(|e| DomainError::Serialization(e.to_string()))
    }

    fn encode_time(at: DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
        move |e| {
            error!(error = %e, "{}", context);
            DomainError::DatabaseError(e.to_string())
        }
    }

    async fn fetch_by_name(
        tx: &mut Transaction<'_, Sqlite>,
        owner_id: &str,
        name: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "{} WHERE owner_id = ? AND group_name = ?",
            SELECT_COLUMNS
        ))
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Self::db_error("Failed to query group by name"))?;

        row.map(Self::row_to_group).transpose()
    }

    async fn fetch_by_id(
        tx: &mut Transaction<'_, Sqlite>,
        owner_id: &str,
        group_id: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "{} WHERE owner_id = ? AND group_id = ?",
            SELECT_COLUMNS
        ))
        .bind(owner_id)
        .bind(group_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Self::db_error("Failed to query group by id"))?;

        row.map(Self::row_to_group).transpose()
    }

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(Self::db_error("Failed to begin transaction"))
    }

    /// Write lock is taken before the first read; waits honour `busy_timeout`.
    async fn begin_immediate(&self) -> Result<Transaction<'static, Sqlite>, DomainError> {
        self.pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(Self::db_error("Failed to begin write transaction"))
    }

    async fn commit(tx: Transaction<'_, Sqlite>) -> Result<(), DomainError> {
        tx.commit()
            .await
            .map_err(Self::db_error("Failed to commit transaction"))
    }
}

#[async_trait]
impl GroupRepository for SqliteGroupRepository {
    #[instrument(skip(self))]
    async fn get_by_id(
        &self,
        owner_id: &str,
        group_id: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "{} WHERE owner_id = ? AND group_id = ?",
            SELECT_COLUMNS
        ))
        .bind(owner_id)
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_error("Failed to query group by id"))?;

        row.map(Self::row_to_group).transpose()
    }

    #[instrument(skip(self))]
    async fn get_by_name(
        &self,
        owner_id: &str,
        name: &str,
    ) -> Result<Option<ConnectionGroup>, DomainError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "{} WHERE owner_id = ? AND group_name = ?",
            SELECT_COLUMNS
        ))
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_error("Failed to query group by name"))?;

        row.map(Self::row_to_group).transpose()
    }

    #[instrument(skip(self))]
    async fn list_all(&self, owner_id: &str) -> Result<Option<Vec<ConnectionGroup>>, DomainError> {
        let mut tx = self.begin().await?;

        let owner: Option<(String,)> =
            sqlx::query_as("SELECT owner_id FROM owners WHERE owner_id = ?")
                .bind(owner_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(Self::db_error("Failed to query owner"))?;

        if owner.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, GroupRow>(&format!(
            "{} WHERE owner_id = ? ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(Self::db_error("Failed to query owner groups"))?;

        Self::commit(tx).await?;

        let groups = rows
            .into_iter()
            .map(Self::row_to_group)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(owner_id = owner_id, count = groups.len(), "Owner groups loaded");
        Ok(Some(groups))
    }

    #[instrument(skip(self, group), fields(name = %group.name))]
    async fn create_if_absent(
        &self,
        owner_id: &str,
        group: NewConnectionGroup,
    ) -> Result<GroupOutcome, DomainError> {
        let members = Self::encode_members(&group.member_user_ids)?;
        let group_id = Uuid::new_v4().to_string();
        let now = Self::encode_time(Utc::now());

        let mut tx = self.begin_immediate().await?;

        sqlx::query("INSERT OR IGNORE INTO owners (owner_id, created_at) VALUES (?, ?)")
            .bind(owner_id)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(Self::db_error("Failed to register owner"))?;

        let result = sqlx::query(
            "INSERT INTO connection_groups
                (owner_id, group_id, group_name, member_user_ids, group_picture, last_interaction_time)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (owner_id, group_name) DO NOTHING",
        )
        .bind(owner_id)
        .bind(&group_id)
        .bind(&*group.name)
        .bind(&members)
        .bind(group.picture.as_deref())
        .bind(Self::encode_time(group.last_interaction_time))
        .execute(&mut *tx)
        .await
        .map_err(Self::db_error("Failed to create group"))?;

        if result.rows_affected() == 0 {
            let existing = Self::fetch_by_name(&mut tx, owner_id, &group.name)
                .await?
                .ok_or_else(|| {
                    DomainError::DatabaseError(format!(
                        "Group '{}' conflicted but could not be read back",
                        group.name
                    ))
                })?;
            Self::commit(tx).await?;

            return Ok(GroupOutcome::Conflict {
                group_id: existing.id,
                group_name: existing.name,
            });
        }

        Self::commit(tx).await?;

        Ok(GroupOutcome::Created {
            group_id: Arc::from(group_id.as_str()),
        })
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        owner_id: &str,
        group_id: &str,
        patch: GroupPatch,
    ) -> Result<GroupOutcome, DomainError> {
        let mut tx = self.begin_immediate().await?;

        let mut group = Self::fetch_by_id(&mut tx, owner_id, group_id)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(format!("Group {} not found", group_id)))?;

        if patch.is_empty() {
            return Ok(GroupOutcome::Updated { group_id: group.id });
        }

        if let Some(new_name) = patch.rename_of(&group) {
            if let Some(other) = Self::fetch_by_name(&mut tx, owner_id, new_name).await? {
                return Ok(GroupOutcome::Conflict {
                    group_id: other.id,
                    group_name: other.name,
                });
            }
        }

        patch.apply(&mut group);
        let members = Self::encode_members(&group.member_user_ids)?;

        sqlx::query(
            "UPDATE connection_groups
             SET group_name = ?, member_user_ids = ?, group_picture = ?, last_interaction_time = ?
             WHERE owner_id = ? AND group_id = ?",
        )
        .bind(&*group.name)
        .bind(&members)
        .bind(group.picture.as_deref())
        .bind(Self::encode_time(group.last_interaction_time))
        .bind(owner_id)
        .bind(group_id)
        .execute(&mut *tx)
        .await
        .map_err(Self::db_error("Failed to update group"))?;

        Self::commit(tx).await?;

        Ok(GroupOutcome::Updated { group_id: group.id })
    }

    #[instrument(skip(self))]
    async fn delete_if_present(&self, owner_id: &str, group_id: &str) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM connection_groups WHERE owner_id = ? AND group_id = ?")
            .bind(owner_id)
            .bind(group_id)
            .execute(&self.pool)
            .await
            .map_err(Self::db_error("Failed to delete group"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GroupNotFound(format!(
                "Group {} not found",
                group_id
            )));
        }

        Ok(())
    }
}
