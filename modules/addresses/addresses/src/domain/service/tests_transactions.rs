#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};

use addresses_sdk::{
    Address, AddressOption, LifecycleTransition, ListQuery, Page, Trashed, UpdateAddress,
};
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use time::OffsetDateTime;
use tracing_test::traced_test;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::events::AddressDomainEvent;
use crate::domain::repos::AddressesRepository;
use crate::domain::validation::AddressDraft;
use crate::infra::storage::OrmAddressesRepository;
use crate::infra::storage::entity::{address_owner, city, user};
use crate::test_support::{
    build_service, build_service_with_repo, inmem_db, orm_repo, seed_address_owner, seed_fixture,
};

/// Delegates to the ORM repository but fails the second row of any transition.
struct FailingRepo {
    inner: OrmAddressesRepository,
    applied: AtomicUsize,
}

impl FailingRepo {
    fn new() -> Self {
        Self {
            inner: orm_repo(),
            applied: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AddressesRepository for FailingRepo {
    async fn find_one<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        trashed: Trashed,
    ) -> Result<Option<Address>, DomainError> {
        self.inner.find_one(conn, id, trashed).await
    }

    async fn list_page<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: &ListQuery,
    ) -> Result<Page<Address>, DomainError> {
        self.inner.list_page(conn, query).await
    }

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: &ListQuery,
    ) -> Result<Vec<Address>, DomainError> {
        self.inner.list(conn, query).await
    }

    async fn options<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        q: Option<&str>,
    ) -> Result<Vec<AddressOption>, DomainError> {
        self.inner.options(conn, user_id, q).await
    }

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        fields: &UpdateAddress,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.inner.create(conn, id, fields, now).await
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        fields: &UpdateAddress,
        now: OffsetDateTime,
    ) -> Result<bool, DomainError> {
        self.inner.update(conn, id, fields, now).await
    }

    async fn find_for_transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        ids: &[Uuid],
        kind: LifecycleTransition,
    ) -> Result<Vec<Uuid>, DomainError> {
        self.inner.find_for_transition(conn, ids, kind).await
    }

    async fn apply_transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        kind: LifecycleTransition,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if self.applied.fetch_add(1, Ordering::SeqCst) >= 1 {
            return Err(DomainError::database("simulated failure"));
        }
        self.inner.apply_transition(conn, id, kind, now).await
    }
}

async fn find_with_trashed(db: &sea_orm::DatabaseConnection, id: Uuid) -> Option<Address> {
    orm_repo().find_one(db, id, Trashed::With).await.unwrap()
}

#[tokio::test]
async fn soft_delete_marks_rows_and_skips_unknown_ids() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, events) = build_service(db.clone());

    let a = svc.create_address(fx.draft("A 1")).await.unwrap();
    let missing = Uuid::new_v4();

    let processed = svc.delete_soft(Some(vec![a.id, missing])).await.unwrap();
    assert_eq!(processed, vec![a.id]);

    let row = find_with_trashed(&db, a.id).await.unwrap();
    assert!(row.is_trashed());

    // already trashed rows are not soft-deleted twice
    let again = svc.delete_soft(Some(vec![a.id])).await.unwrap();
    assert!(again.is_empty());

    let events = events.events();
    assert_eq!(events.len(), 2, "create plus one soft delete");
    assert!(matches!(
        &events[1],
        AddressDomainEvent::SoftDeleted { ids, .. } if ids == &vec![a.id]
    ));
}

#[tokio::test]
async fn restore_clears_deletion_marker() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, events) = build_service(db.clone());

    let a = svc.create_address(fx.draft("A 1")).await.unwrap();
    svc.delete_soft(Some(vec![a.id])).await.unwrap();

    let processed = svc.restore(Some(vec![a.id])).await.unwrap();
    assert_eq!(processed, vec![a.id]);

    let restored = svc.get_address(a.id).await.unwrap();
    assert!(!restored.is_trashed());
    assert!(matches!(
        events.events().last(),
        Some(AddressDomainEvent::Restored { ids, .. }) if ids == &vec![a.id]
    ));
}

#[tokio::test]
async fn restore_leaves_live_rows_untouched() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let a = svc.create_address(fx.draft("A 1")).await.unwrap();

    let processed = svc.restore(Some(vec![a.id])).await.unwrap();
    assert_eq!(processed, vec![a.id]);

    let row = find_with_trashed(&db, a.id).await.unwrap();
    assert!(!row.is_trashed());
    assert_eq!(row.updated_at, a.updated_at);
}

#[tokio::test]
async fn force_delete_removes_trashed_and_live_rows() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, events) = build_service(db.clone());

    let live = svc.create_address(fx.draft("Live 1")).await.unwrap();
    let trashed = svc.create_address(fx.draft("Trashed 2")).await.unwrap();
    svc.delete_soft(Some(vec![trashed.id])).await.unwrap();

    let processed = svc
        .delete_force(Some(vec![trashed.id, live.id]))
        .await
        .unwrap();
    assert_eq!(processed.len(), 2);
    assert!(processed.contains(&live.id));
    assert!(processed.contains(&trashed.id));

    assert!(find_with_trashed(&db, live.id).await.is_none());
    assert!(find_with_trashed(&db, trashed.id).await.is_none());

    let before = events.events().len();
    let restored = svc.restore(Some(vec![live.id])).await.unwrap();
    assert!(restored.is_empty());
    assert_eq!(events.events().len(), before, "no event for an empty batch");
}

#[tokio::test]
async fn force_delete_cascades_to_owner_links() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let a = svc.create_address(fx.draft("A 1")).await.unwrap();
    seed_address_owner(&db, a.id, fx.user_id).await;
    assert_eq!(address_owner::Entity::find().count(&*db).await.unwrap(), 1);

    svc.delete_force(Some(vec![a.id])).await.unwrap();

    assert_eq!(address_owner::Entity::find().count(&*db).await.unwrap(), 0);
}

#[tokio::test]
async fn referenced_city_and_owner_cannot_be_deleted() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let a = svc.create_address(fx.draft("A 1")).await.unwrap();

    assert!(city::Entity::delete_by_id(fx.city_id).exec(&*db).await.is_err());
    assert!(user::Entity::delete_by_id(fx.user_id).exec(&*db).await.is_err());
    assert!(find_with_trashed(&db, a.id).await.is_some());
}

#[tokio::test]
async fn failed_row_rolls_back_whole_batch() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;

    let (seed_svc, _) = build_service(db.clone());
    let a = seed_svc.create_address(fx.draft("A 1")).await.unwrap();
    let b = seed_svc.create_address(fx.draft("B 2")).await.unwrap();

    let (svc, events) = build_service_with_repo(db.clone(), FailingRepo::new());
    let err = svc.delete_soft(Some(vec![a.id, b.id])).await.unwrap_err();
    assert_eq!(err.raw_message(), "simulated failure");

    assert!(!find_with_trashed(&db, a.id).await.unwrap().is_trashed());
    assert!(!find_with_trashed(&db, b.id).await.unwrap().is_trashed());
    assert!(events.events().is_empty());
}

#[tokio::test]
async fn create_failure_rolls_back_and_publishes_nothing() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, events) = build_service(db.clone());

    // unknown owner violates the user foreign key inside the transaction
    let draft = AddressDraft {
        user_id: Some(Uuid::new_v4()),
        ..fx.draft("A 1")
    };
    let err = svc.create_address(draft).await.unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }));

    let all = svc
        .list_addresses(&ListQuery {
            trashed: Trashed::With,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(all.is_empty());
    assert!(events.events().is_empty());
}

#[tokio::test]
async fn empty_or_missing_list_is_rejected() {
    let db = inmem_db().await;
    let (svc, events) = build_service(db.clone());

    for list in [None, Some(vec![])] {
        let err = svc.delete_soft(list).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref errors } if errors.contains("list")));
    }
    assert!(events.events().is_empty());
}

#[tokio::test]
#[traced_test]
async fn transition_logs_commit() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let a = svc.create_address(fx.draft("A 1")).await.unwrap();
    svc.delete_soft(Some(vec![a.id])).await.unwrap();

    assert!(logs_contain("Lifecycle transition committed"));
}
