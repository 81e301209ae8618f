#![allow(clippy::unwrap_used, clippy::expect_used)]

use addresses_sdk::{ListQuery, OptionsQuery, SortField, SortOrder, Trashed};
use uuid::Uuid;

use crate::domain::validation::AddressDraft;
use crate::test_support::{Fixture, build_service, inmem_db, seed_fixture, seed_user};

use super::AddressesService;
use crate::infra::storage::{OrmAddressesRepository, OrmRegionsRepository};

type Svc = AddressesService<OrmAddressesRepository, OrmRegionsRepository>;

async fn seed_lines(svc: &Svc, fx: &Fixture, lines: &[&str]) -> Vec<Uuid> {
    let mut ids = Vec::with_capacity(lines.len());
    for line in lines {
        ids.push(svc.create_address(fx.draft(line)).await.unwrap().id);
    }
    ids
}

async fn list_trashed(svc: &Svc, trashed: Trashed) -> Vec<addresses_sdk::Address> {
    svc.list_addresses(&ListQuery {
        trashed,
        ..Default::default()
    })
    .await
    .unwrap()
}

fn by_line(order: SortOrder) -> ListQuery {
    ListQuery {
        sort_by: SortField::AddressLine,
        sort_order: order,
        ..Default::default()
    }
}

#[tokio::test]
async fn list_page_paginates_and_reports_last_page() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    seed_lines(&svc, &fx, &["a 1", "b 2", "c 3", "d 4", "e 5"]).await;

    let first = svc
        .list_addresses_page(&ListQuery {
            per_page: Some(2),
            ..by_line(SortOrder::Asc)
        })
        .await
        .unwrap();
    assert_eq!(first.total, 5);
    assert_eq!(first.per_page, 2);
    assert_eq!(first.last_page, 3);
    let lines: Vec<_> = first.items.iter().map(|a| a.address_line.as_str()).collect();
    assert_eq!(lines, ["a 1", "b 2"]);

    let second = svc
        .list_addresses_page(&ListQuery {
            page: Some(2),
            per_page: Some(2),
            ..by_line(SortOrder::Asc)
        })
        .await
        .unwrap();
    assert_eq!(second.page, 2);
    let lines: Vec<_> = second.items.iter().map(|a| a.address_line.as_str()).collect();
    assert_eq!(lines, ["c 3", "d 4"]);

    let beyond = svc
        .list_addresses_page(&ListQuery {
            page: Some(9),
            per_page: Some(2),
            ..by_line(SortOrder::Asc)
        })
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 5);
}

#[tokio::test]
async fn list_page_clamps_page_size() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    seed_lines(&svc, &fx, &["only 1"]).await;

    let page = svc
        .list_addresses_page(&ListQuery {
            per_page: Some(10_000),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.per_page, 50);

    let page = svc.list_addresses_page(&ListQuery::default()).await.unwrap();
    assert_eq!(page.per_page, 10);
    assert_eq!(page.page, 1);
}

#[tokio::test]
async fn huge_page_number_yields_empty_page() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    seed_lines(&svc, &fx, &["a 1", "b 2"]).await;

    let page = svc
        .list_addresses_page(&ListQuery {
            page: Some(u64::MAX),
            per_page: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 2);
    assert_eq!(page.last_page, 1);
}

#[tokio::test]
async fn trashed_filter_controls_visibility() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let ids = seed_lines(&svc, &fx, &["live 1", "gone 2"]).await;
    svc.delete_soft(Some(vec![ids[1]])).await.unwrap();

    let live = list_trashed(&svc, Trashed::Without).await;
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, ids[0]);

    assert_eq!(list_trashed(&svc, Trashed::With).await.len(), 2);

    let only = list_trashed(&svc, Trashed::Only).await;
    assert_eq!(only.len(), 1);
    assert_eq!(only[0].id, ids[1]);
    assert!(only[0].is_trashed());
}

#[tokio::test]
async fn search_is_case_insensitive_over_line_label_and_postal_code() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    seed_lines(&svc, &fx, &["Gedimino pr. 9", "Pilies g. 2"]).await;
    svc.create_address(AddressDraft {
        label: Some("Summer House".to_owned()),
        postal_code: Some("LT-55123".to_owned()),
        ..fx.draft("Kopu g. 1")
    })
    .await
    .unwrap();

    let search = |q: &str| ListQuery {
        q: Some(q.to_owned()),
        ..by_line(SortOrder::Asc)
    };

    let hits = svc.list_addresses(&search("GEDIMINO")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].address_line, "Gedimino pr. 9");

    let hits = svc.list_addresses(&search("summer")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].label.as_deref(), Some("Summer House"));

    let hits = svc.list_addresses(&search("55123")).await.unwrap();
    assert_eq!(hits.len(), 1);

    // blank query matches everything
    assert_eq!(svc.list_addresses(&search("   ")).await.unwrap().len(), 3);
}

#[tokio::test]
async fn search_treats_like_wildcards_literally() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    seed_lines(&svc, &fx, &["100% Street 1", "1000 Street 2", "Main_Road 3", "MainXRoad 4"]).await;

    let search = |q: &str| ListQuery {
        q: Some(q.to_owned()),
        ..by_line(SortOrder::Asc)
    };

    let hits = svc.list_addresses(&search("100%")).await.unwrap();
    let lines: Vec<_> = hits.iter().map(|a| a.address_line.as_str()).collect();
    assert_eq!(lines, ["100% Street 1"]);

    let hits = svc.list_addresses(&search("main_road")).await.unwrap();
    let lines: Vec<_> = hits.iter().map(|a| a.address_line.as_str()).collect();
    assert_eq!(lines, ["Main_Road 3"]);
}

#[tokio::test]
async fn sort_order_is_honoured() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    seed_lines(&svc, &fx, &["b", "c", "a"]).await;

    let asc: Vec<_> = svc
        .list_addresses(&by_line(SortOrder::Asc))
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.address_line)
        .collect();
    assert_eq!(asc, ["a", "b", "c"]);

    let desc: Vec<_> = svc
        .list_addresses(&by_line(SortOrder::Desc))
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.address_line)
        .collect();
    assert_eq!(desc, ["c", "b", "a"]);
}

#[tokio::test]
async fn list_filters_by_owner() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let other_user = Uuid::new_v4();
    seed_user(&db, other_user, "other@example.com").await;

    seed_lines(&svc, &fx, &["mine 1"]).await;
    svc.create_address(AddressDraft {
        user_id: Some(other_user),
        ..fx.draft("theirs 1")
    })
    .await
    .unwrap();

    let theirs = svc
        .list_addresses(&ListQuery {
            user_id: Some(other_user),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].address_line, "theirs 1");
}

#[tokio::test]
async fn options_are_empty_without_owner() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    seed_lines(&svc, &fx, &["a 1"]).await;

    let options = svc.options(&OptionsQuery::default()).await.unwrap();
    assert!(options.is_empty());
}

#[tokio::test]
async fn options_list_live_addresses_of_owner_with_full_address() {
    let db = inmem_db().await;
    let fx = seed_fixture(&db).await;
    let (svc, _events) = build_service(db.clone());

    let ids = seed_lines(&svc, &fx, &["Keep 1", "Trash 2"]).await;
    svc.delete_soft(Some(vec![ids[1]])).await.unwrap();

    let options = svc
        .options(&OptionsQuery {
            user_id: Some(fx.user_id),
            q: None,
        })
        .await
        .unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].id, ids[0]);
    assert_eq!(options[0].label, "Keep 1, Vilnius");

    let filtered = svc
        .options(&OptionsQuery {
            user_id: Some(fx.user_id),
            q: Some("nothing like this".to_owned()),
        })
        .await
        .unwrap();
    assert!(filtered.is_empty());
}

#[tokio::test]
async fn country_options_are_ordered_by_label() {
    let db = inmem_db().await;
    seed_fixture(&db).await;
    crate::test_support::seed_country(&db, "EE", "Estonia").await;
    let (svc, _events) = build_service(db.clone());

    let countries = svc.country_options().await.unwrap();
    assert_eq!(
        countries,
        vec![
            ("EE".to_owned(), "Estonia".to_owned()),
            ("LT".to_owned(), "Lithuania".to_owned()),
        ]
    );
}
