use std::sync::Arc;

use addresses_sdk::AddressesClientV1;
use anyhow::Context;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::dto::AddressEvent;
use crate::api::rest::routes;
use crate::api::rest::sse_adapter::{SseAddressEventPublisher, SseBroadcaster};
use crate::config::AddressesConfig;
use crate::domain::events::AddressDomainEvent;
use crate::domain::local_client::client::AddressesLocalClient;
use crate::domain::ports::EventPublisher;
use crate::domain::service::AddressesService;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{LimitCfg, OrmAddressesRepository, OrmRegionsRepository};

/// Type alias for the concrete service type used with ORM repositories.
/// This lives in the composition root (module.rs) to avoid infra dependencies in domain.
pub(crate) type ConcreteService = AddressesService<OrmAddressesRepository, OrmRegionsRepository>;

/// Composition root of the addresses module: wires repositories, the
/// service, the SSE publisher and the local SDK client.
pub struct AddressesModule {
    cfg: Arc<AddressesConfig>,
    service: Arc<ConcreteService>,
    sse: SseBroadcaster<AddressEvent>,
}

impl AddressesModule {
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, cfg: AddressesConfig) -> Self {
        info!("Initializing addresses module");
        debug!(
            "Loaded addresses config: admin_prefix={}, locale={}, default_page_size={}, max_page_size={}",
            cfg.admin_prefix, cfg.locale, cfg.default_page_size, cfg.max_page_size
        );

        let sse = SseBroadcaster::new(cfg.event_buffer);

        // Create event publisher adapter that bridges domain events to SSE
        let publisher: Arc<dyn EventPublisher<AddressDomainEvent>> =
            Arc::new(SseAddressEventPublisher::new(sse.clone()));

        let limit_cfg = LimitCfg {
            default: cfg.default_page_size,
            max: cfg.max_page_size,
        };
        let repo = OrmAddressesRepository::new(limit_cfg, cfg.locale.clone());

        let service = Arc::new(AddressesService::new(
            db,
            Arc::new(repo),
            Arc::new(OrmRegionsRepository::new()),
            publisher,
        ));

        Self {
            cfg: Arc::new(cfg),
            service,
            sse,
        }
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    /// Returns an error if any migration fails.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running addresses database migrations");
        Migrator::up(db, None)
            .await
            .context("addresses migrations failed")
    }

    /// Router with every address admin route mounted under the configured prefix.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        info!(prefix = %self.cfg.admin_prefix, "Registering addresses REST routes");
        routes::register_routes(
            axum::Router::new(),
            Arc::clone(&self.cfg),
            Arc::clone(&self.service),
            self.sse.clone(),
        )
    }

    /// In-process client implementing the SDK contract.
    #[must_use]
    pub fn client(&self) -> Arc<dyn AddressesClientV1> {
        Arc::new(AddressesLocalClient::new(Arc::clone(&self.service)))
    }
}
