#![allow(clippy::unwrap_used, clippy::expect_used)]

use addresses_sdk::Trashed;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::AddressesRepository;
use crate::domain::validation::AddressDraft;
use crate::test_support::{
    build_service, inmem_db, orm_repo, seed_city, seed_city_label, seed_fixture,
};

#[tokio::test]
async fn create_address_persists_fields_and_computes_full_address() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let mut draft = fx.draft("Gedimino pr. 9");
    draft.label = Some("Office".to_owned());

    let created = svc.create_address(draft).await.unwrap();
    assert_eq!(created.address_line, "Gedimino pr. 9");
    assert_eq!(created.postal_code, "01103");
    assert_eq!(created.label.as_deref(), Some("Office"));
    assert_eq!(created.city_id, fx.city_id);
    assert_eq!(created.user_id, fx.user_id);
    assert_eq!(created.full_address, "Gedimino pr. 9, Vilnius");
    assert_eq!(created.country_id.as_deref(), Some("LT"));
    assert_eq!(created.owner.as_ref().unwrap().email, "owner@example.com");
    assert!(!created.is_trashed());

    let stored = orm_repo()
        .find_one(&*db, created.id, Trashed::Without)
        .await
        .unwrap()
        .expect("row persisted");
    assert_eq!(stored, created);
}

#[tokio::test]
async fn create_keeps_client_supplied_id() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let id = Uuid::new_v4();
    let draft = AddressDraft {
        id: Some(id),
        ..fx.draft("Pilies g. 2")
    };

    let created = svc.create_address(draft).await.unwrap();
    assert_eq!(created.id, id);
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected_before_any_write() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, events) = build_service(db.clone());

    let draft = AddressDraft {
        address_line: None,
        postal_code: None,
        ..fx.draft("ignored")
    };

    let err = svc.create_address(draft).await.unwrap_err();
    match err {
        DomainError::Validation { errors } => {
            assert!(errors.contains("address_line"));
            assert!(errors.contains("postal_code"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let all = svc
        .list_addresses(&addresses_sdk::ListQuery {
            trashed: Trashed::With,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(all.is_empty());
    assert!(events.events().is_empty());
}

#[tokio::test]
async fn create_with_unknown_city_is_rejected() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let draft = AddressDraft {
        city_id: Some(Uuid::new_v4()),
        ..fx.draft("Pilies g. 2")
    };

    let err = svc.create_address(draft).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref errors } if errors.contains("city_id")));
}

#[tokio::test]
async fn full_address_falls_back_to_other_translation_then_to_line() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let kaunas = Uuid::new_v4();
    seed_city(&db, kaunas, "LT").await;
    seed_city_label(&db, kaunas, "lt", "Kaunas").await;

    let unnamed = Uuid::new_v4();
    seed_city(&db, unnamed, "LT").await;

    let in_kaunas = svc
        .create_address(AddressDraft {
            city_id: Some(kaunas),
            ..fx.draft("Laisves al. 1")
        })
        .await
        .unwrap();
    assert_eq!(in_kaunas.full_address, "Laisves al. 1, Kaunas");

    let nowhere = svc
        .create_address(AddressDraft {
            city_id: Some(unnamed),
            ..fx.draft("Somewhere 5")
        })
        .await
        .unwrap();
    assert_eq!(nowhere.full_address, "Somewhere 5");
    assert_eq!(nowhere.city.unwrap().label, None);
}

#[tokio::test]
async fn get_address_hides_trashed_rows() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let created = svc.create_address(fx.draft("Vokieciu g. 3")).await.unwrap();
    assert_eq!(svc.get_address(created.id).await.unwrap().id, created.id);

    svc.delete_soft(Some(vec![created.id])).await.unwrap();

    let err = svc.get_address(created.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { id } if id == created.id));
}

#[tokio::test]
async fn update_replaces_mutable_fields() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, events) = build_service(db.clone());

    let mut draft = fx.draft("Old street 1");
    draft.label = Some("Home".to_owned());
    let created = svc.create_address(draft).await.unwrap();

    let updated = svc
        .update_address(
            created.id,
            AddressDraft {
                postal_code: Some("LT-99999".to_owned()),
                ..fx.draft("New street 2")
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.address_line, "New street 2");
    assert_eq!(updated.postal_code, "LT-99999");
    // full replace: the omitted label is cleared
    assert_eq!(updated.label, None);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.full_address, "New street 2, Vilnius");
    assert_eq!(events.events().len(), 2);
}

#[tokio::test]
async fn update_of_missing_address_is_not_found() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, events) = build_service(db.clone());

    let id = Uuid::new_v4();
    let err = svc.update_address(id, fx.draft("Nowhere 1")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { id: missing } if missing == id));
    assert!(events.events().is_empty());
}

#[tokio::test]
async fn update_validates_before_lookup() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let draft = AddressDraft {
        postal_code: Some("x".repeat(21)),
        ..fx.draft("Line 1")
    };
    let err = svc.update_address(Uuid::new_v4(), draft).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}
