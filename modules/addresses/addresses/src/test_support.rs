#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use parking_lot::Mutex;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, NotSet, Set};
use sea_orm_migration::MigratorTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::events::AddressDomainEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::repos::AddressesRepository;
use crate::domain::service::AddressesService;
use crate::domain::validation::AddressDraft;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{LimitCfg, OrmAddressesRepository, OrmRegionsRepository};
use crate::module::ConcreteService;

pub const TEST_LIMITS: LimitCfg = LimitCfg {
    default: 10,
    max: 50,
};

/// Create an in-memory database for testing.
pub async fn inmem_db() -> Arc<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Arc::new(db)
}

pub async fn seed_country(db: &DatabaseConnection, id: &str, label: &str) {
    use crate::infra::storage::entity::country::ActiveModel;

    ActiveModel {
        id: Set(id.to_owned()),
        label: Set(label.to_owned()),
    }
    .insert(db)
    .await
    .expect("Failed to seed country");
}

pub async fn seed_city(db: &DatabaseConnection, id: Uuid, country_id: &str) {
    use crate::infra::storage::entity::city::ActiveModel;

    ActiveModel {
        id: Set(id),
        country_id: Set(country_id.to_owned()),
    }
    .insert(db)
    .await
    .expect("Failed to seed city");
}

pub async fn seed_city_label(db: &DatabaseConnection, city_id: Uuid, language_code: &str, label: &str) {
    use crate::infra::storage::entity::city_translation::ActiveModel;

    ActiveModel {
        record_id: Set(city_id),
        language_code: Set(language_code.to_owned()),
        label: Set(label.to_owned()),
    }
    .insert(db)
    .await
    .expect("Failed to seed city translation");
}

pub async fn seed_user(db: &DatabaseConnection, id: Uuid, email: &str) {
    use crate::infra::storage::entity::user::ActiveModel;

    ActiveModel {
        id: Set(id),
        email: Set(email.to_owned()),
    }
    .insert(db)
    .await
    .expect("Failed to seed user");
}

pub async fn seed_address_owner(db: &DatabaseConnection, record_id: Uuid, owner_id: Uuid) {
    use crate::infra::storage::entity::address_owner::ActiveModel;

    let now = OffsetDateTime::now_utc();
    ActiveModel {
        count: NotSet,
        created_at: Set(now),
        updated_at: Set(now),
        record_id: Set(record_id),
        owner_id: Set(owner_id),
        owner_type: Set("user".to_owned()),
    }
    .insert(db)
    .await
    .expect("Failed to seed address owner");
}

/// One country, one city labelled "Vilnius" in English and one user.
pub struct Fixture {
    pub city_id: Uuid,
    pub user_id: Uuid,
}

pub async fn seed_fixture(db: &DatabaseConnection) -> Fixture {
    let city_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    seed_country(db, "LT", "Lithuania").await;
    seed_city(db, city_id, "LT").await;
    seed_city_label(db, city_id, "en", "Vilnius").await;
    seed_user(db, user_id, "owner@example.com").await;

    Fixture { city_id, user_id }
}

impl Fixture {
    pub fn draft(&self, address_line: &str) -> AddressDraft {
        AddressDraft {
            id: None,
            label: None,
            address_line: Some(address_line.to_owned()),
            postal_code: Some("01103".to_owned()),
            city_id: Some(self.city_id),
            user_id: Some(self.user_id),
        }
    }
}

/// Event publisher that keeps every published event for assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<AddressDomainEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<AddressDomainEvent> {
        self.events.lock().clone()
    }
}

impl EventPublisher<AddressDomainEvent> for RecordingPublisher {
    fn publish(&self, event: &AddressDomainEvent) {
        self.events.lock().push(event.clone());
    }
}

pub fn orm_repo() -> OrmAddressesRepository {
    OrmAddressesRepository::new(TEST_LIMITS, "en")
}

pub fn build_service_with_repo<R: AddressesRepository>(
    db: Arc<DatabaseConnection>,
    repo: R,
) -> (Arc<AddressesService<R, OrmRegionsRepository>>, Arc<RecordingPublisher>) {
    let events = Arc::new(RecordingPublisher::default());
    let service = AddressesService::new(
        db,
        Arc::new(repo),
        Arc::new(OrmRegionsRepository::new()),
        events.clone(),
    );
    (Arc::new(service), events)
}

pub fn build_service(db: Arc<DatabaseConnection>) -> (Arc<ConcreteService>, Arc<RecordingPublisher>) {
    build_service_with_repo(db, orm_repo())
}
