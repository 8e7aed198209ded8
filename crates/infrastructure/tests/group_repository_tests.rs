//! Behaviour both group stores must share.

use chrono::{DateTime, TimeZone, Utc};
use conngroups_application::ports::GroupRepository;
use conngroups_domain::config::DatabaseConfig;
use conngroups_domain::{DomainError, GroupOutcome, GroupPatch, NewConnectionGroup};
use conngroups_infrastructure::database::create_pool;
use conngroups_infrastructure::{InMemoryGroupRepository, SqliteGroupRepository};
use std::sync::Arc;

const OWNER: &str = "dc9dbe3e-60d5-4a07-8c9c-42027b555b01";

async fn sqlite_repo() -> Arc<dyn GroupRepository> {
    let pool = create_pool("sqlite::memory:", &DatabaseConfig::default())
        .await
        .unwrap();
    Arc::new(SqliteGroupRepository::new(pool))
}

async fn memory_repo() -> Arc<dyn GroupRepository> {
    Arc::new(InMemoryGroupRepository::new())
}

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 9, minute, 0).unwrap()
}

fn new_group(name: &str, members: &[&str], minute: u32) -> NewConnectionGroup {
    NewConnectionGroup {
        name: Arc::from(name),
        member_user_ids: members.iter().map(|m| Arc::from(*m)).collect(),
        picture: None,
        last_interaction_time: at(minute),
    }
}

async fn create(repo: &Arc<dyn GroupRepository>, owner: &str, name: &str) -> String {
    match repo
        .create_if_absent(owner, new_group(name, &["u1"], 1))
        .await
        .unwrap()
    {
        GroupOutcome::Created { group_id } => group_id.to_string(),
        other => panic!("expected Created, got {:?}", other),
    }
}

// ============================================================================
// Scenarios
// ============================================================================

async fn create_then_get(repo: Arc<dyn GroupRepository>) {
    let outcome = repo
        .create_if_absent(OWNER, new_group("Team", &["u1", "u2"], 5))
        .await
        .unwrap();
    let id = outcome.group_id().unwrap().to_string();

    let by_id = repo.get_by_id(OWNER, &id).await.unwrap().unwrap();
    let by_name = repo.get_by_name(OWNER, "Team").await.unwrap().unwrap();

    assert_eq!(by_id, by_name);
    assert_eq!(&*by_id.id, id.as_str());
    assert_eq!(by_id.member_user_ids.len(), 2);
    assert_eq!(by_id.last_interaction_time, at(5));
    assert!(by_id.picture.is_none());
}

async fn duplicate_name_conflicts(repo: Arc<dyn GroupRepository>) {
    let first = create(&repo, OWNER, "Team").await;

    let second = repo
        .create_if_absent(OWNER, new_group("Team", &[], 2))
        .await
        .unwrap();

    assert_eq!(
        second,
        GroupOutcome::Conflict {
            group_id: Arc::from(first.as_str()),
            group_name: Arc::from("Team"),
        }
    );
    assert_eq!(repo.list_all(OWNER).await.unwrap().unwrap().len(), 1);
}

async fn owners_are_isolated(repo: Arc<dyn GroupRepository>) {
    let a = create(&repo, "owner-a", "Team").await;
    create(&repo, "owner-b", "Team").await;

    assert!(repo.get_by_id("owner-b", &a).await.unwrap().is_none());
    assert_eq!(repo.list_all("owner-a").await.unwrap().unwrap().len(), 1);
    assert_eq!(repo.list_all("owner-b").await.unwrap().unwrap().len(), 1);
}

async fn ids_are_unique(repo: Arc<dyn GroupRepository>) {
    let mut ids = Vec::new();
    for name in ["one", "two", "three", "four"] {
        ids.push(create(&repo, OWNER, name).await);
    }
    // deleting and recreating must not reuse an id still in the collection
    let removed = ids.remove(1);
    repo.delete_if_present(OWNER, &removed).await.unwrap();
    ids.push(create(&repo, OWNER, "five").await);

    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
}

async fn list_preserves_insertion_order(repo: Arc<dyn GroupRepository>) {
    for name in ["C", "A", "B"] {
        create(&repo, OWNER, name).await;
    }

    let names: Vec<String> = repo
        .list_all(OWNER)
        .await
        .unwrap()
        .unwrap()
        .iter()
        .map(|g| g.name.to_string())
        .collect();

    assert_eq!(names, vec!["C", "A", "B"]);
}

async fn absent_owner_vs_empty_collection(repo: Arc<dyn GroupRepository>) {
    assert!(repo.list_all(OWNER).await.unwrap().is_none());

    let id = create(&repo, OWNER, "Team").await;
    repo.delete_if_present(OWNER, &id).await.unwrap();

    let remaining = repo.list_all(OWNER).await.unwrap();
    assert_eq!(remaining, Some(vec![]));
}

async fn update_merges_only_supplied_fields(repo: Arc<dyn GroupRepository>) {
    let id = create(&repo, OWNER, "Team").await;

    let outcome = repo
        .update(
            OWNER,
            &id,
            GroupPatch {
                member_to_add: Some(Arc::from("u9")),
                picture: Some(Some(Arc::from("aGVsbG8="))),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        GroupOutcome::Updated {
            group_id: Arc::from(id.as_str())
        }
    );

    let group = repo.get_by_id(OWNER, &id).await.unwrap().unwrap();
    assert_eq!(&*group.name, "Team");
    let members: Vec<&str> = group.member_user_ids.iter().map(|m| &**m).collect();
    assert_eq!(members, vec!["u1", "u9"]);
    assert_eq!(group.picture.as_deref(), Some("aGVsbG8="));
    assert_eq!(group.last_interaction_time, at(1));
}

async fn update_rename_and_remove(repo: Arc<dyn GroupRepository>) {
    let id = create(&repo, OWNER, "Team").await;

    repo.update(
        OWNER,
        &id,
        GroupPatch {
            name: Some(Arc::from("Crew")),
            member_to_remove: Some(Arc::from("u1")),
            last_interaction_time: Some(at(30)),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(repo.get_by_name(OWNER, "Team").await.unwrap().is_none());
    let group = repo.get_by_name(OWNER, "Crew").await.unwrap().unwrap();
    assert!(group.member_user_ids.is_empty());
    assert_eq!(group.last_interaction_time, at(30));
}

async fn update_rename_collision_conflicts(repo: Arc<dyn GroupRepository>) {
    let team = create(&repo, OWNER, "Team").await;
    let crew = create(&repo, OWNER, "Crew").await;

    let outcome = repo
        .update(
            OWNER,
            &team,
            GroupPatch {
                name: Some(Arc::from("Crew")),
                member_to_add: Some(Arc::from("u5")),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        GroupOutcome::Conflict {
            group_id: Arc::from(crew.as_str()),
            group_name: Arc::from("Crew"),
        }
    );
    // nothing from the rejected patch was written
    let unchanged = repo.get_by_id(OWNER, &team).await.unwrap().unwrap();
    assert_eq!(&*unchanged.name, "Team");
    assert_eq!(unchanged.member_user_ids.len(), 1);
}

async fn update_to_own_name_is_not_a_conflict(repo: Arc<dyn GroupRepository>) {
    let id = create(&repo, OWNER, "Team").await;

    let outcome = repo
        .update(
            OWNER,
            &id,
            GroupPatch {
                name: Some(Arc::from("Team")),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(matches!(outcome, GroupOutcome::Updated { .. }));
}

async fn update_missing_is_not_found(repo: Arc<dyn GroupRepository>) {
    create(&repo, OWNER, "Team").await;

    let missing = repo
        .update(OWNER, "group_id_5", GroupPatch::default())
        .await;
    let no_owner = repo
        .update("nobody", "group_id_5", GroupPatch::default())
        .await;

    assert!(matches!(missing, Err(DomainError::GroupNotFound(_))));
    assert!(matches!(no_owner, Err(DomainError::GroupNotFound(_))));
}

async fn delete_twice_is_not_found(repo: Arc<dyn GroupRepository>) {
    let id = create(&repo, OWNER, "Team").await;

    repo.delete_if_present(OWNER, &id).await.unwrap();
    let second = repo.delete_if_present(OWNER, &id).await;

    assert!(matches!(second, Err(DomainError::GroupNotFound(_))));
    assert!(repo.get_by_id(OWNER, &id).await.unwrap().is_none());
}

async fn concurrent_creates_admit_one_name(repo: Arc<dyn GroupRepository>) {
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.create_if_absent(OWNER, new_group("Race", &[], i % 60))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let outcomes = futures::future::join_all(handles).await;
    let created = outcomes
        .into_iter()
        .map(|r| r.unwrap())
        .filter(|o| matches!(o, GroupOutcome::Created { .. }))
        .count();

    assert_eq!(created, 1);
    assert_eq!(repo.list_all(OWNER).await.unwrap().unwrap().len(), 1);
}

macro_rules! store_suite {
    ($store:ident, $factory:ident) => {
        mod $store {
            use super::*;

            #[tokio::test]
            async fn test_create_then_get() {
                create_then_get($factory().await).await;
            }

            #[tokio::test]
            async fn test_duplicate_name_conflicts() {
                duplicate_name_conflicts($factory().await).await;
            }

            #[tokio::test]
            async fn test_owners_are_isolated() {
                owners_are_isolated($factory().await).await;
            }

            #[tokio::test]
            async fn test_ids_are_unique() {
                ids_are_unique($factory().await).await;
            }

            #[tokio::test]
            async fn test_list_preserves_insertion_order() {
                list_preserves_insertion_order($factory().await).await;
            }

            #[tokio::test]
            async fn test_absent_owner_vs_empty_collection() {
                absent_owner_vs_empty_collection($factory().await).await;
            }

            #[tokio::test]
            async fn test_update_merges_only_supplied_fields() {
                update_merges_only_supplied_fields($factory().await).await;
            }

            #[tokio::test]
            async fn test_update_rename_and_remove() {
                update_rename_and_remove($factory().await).await;
            }

            #[tokio::test]
            async fn test_update_rename_collision_conflicts() {
                update_rename_collision_conflicts($factory().await).await;
            }

            #[tokio::test]
            async fn test_update_to_own_name_is_not_a_conflict() {
                update_to_own_name_is_not_a_conflict($factory().await).await;
            }

            #[tokio::test]
            async fn test_update_missing_is_not_found() {
                update_missing_is_not_found($factory().await).await;
            }

            #[tokio::test]
            async fn test_delete_twice_is_not_found() {
                delete_twice_is_not_found($factory().await).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
            async fn test_concurrent_creates_admit_one_name() {
                concurrent_creates_admit_one_name($factory().await).await;
            }
        }
    };
}

store_suite!(sqlite, sqlite_repo);
store_suite!(memory, memory_repo);

#[tokio::test]
async fn test_sqlite_groups_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = DatabaseConfig {
        path: dir.path().join("groups.db").display().to_string(),
        ..Default::default()
    };

    let pool = create_pool(&cfg.url(), &cfg).await.unwrap();
    let repo: Arc<dyn GroupRepository> = Arc::new(SqliteGroupRepository::new(pool.clone()));
    let id = create(&repo, OWNER, "Team").await;
    repo.update(
        OWNER,
        &id,
        GroupPatch {
            last_interaction_time: Some(at(42) + chrono::Duration::nanoseconds(123_456_789)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    pool.close().await;

    let reopened = create_pool(&cfg.url(), &cfg).await.unwrap();
    let repo = SqliteGroupRepository::new(reopened);
    let group = repo.get_by_id(OWNER, &id).await.unwrap().unwrap();

    assert_eq!(&*group.name, "Team");
    assert_eq!(
        group.last_interaction_time,
        at(42) + chrono::Duration::nanoseconds(123_456_789)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sqlite_concurrent_updates_on_shared_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = DatabaseConfig {
        path: dir.path().join("groups.db").display().to_string(),
        max_connections: 4,
    };
    let pool = create_pool(&cfg.url(), &cfg).await.unwrap();
    let repo: Arc<dyn GroupRepository> = Arc::new(SqliteGroupRepository::new(pool));

    let mut targets = Vec::new();
    for n in 0..8 {
        let owner = format!("owner-{}", n);
        let outcome = repo
            .create_if_absent(&owner, new_group("Team", &[], 1))
            .await
            .unwrap();
        targets.push((owner, outcome.group_id().unwrap().to_string()));
    }

    let handles: Vec<_> = (0..200)
        .map(|i| {
            let repo = repo.clone();
            let (owner, id) = targets[i % targets.len()].clone();
            tokio::spawn(async move {
                repo.update(
                    &owner,
                    &id,
                    GroupPatch {
                        member_to_add: Some(Arc::from(format!("member-{}", i).as_str())),
                        ..Default::default()
                    },
                )
                .await
            })
        })
        .collect();

    let failures: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .filter_map(Result::err)
        .collect();
    assert!(failures.is_empty(), "updates failed: {:?}", failures.first());

    for (owner, id) in &targets {
        let group = repo.get_by_id(owner, id).await.unwrap().unwrap();
        assert_eq!(group.member_user_ids.len(), 25);
    }
}
