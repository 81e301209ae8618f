use std::sync::Arc;

use addresses_sdk::{
    Address, AddressOption, LifecycleTransition, ListQuery, OptionsQuery, Page, Trashed,
    UpdateAddress,
};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use time::OffsetDateTime;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::events::AddressDomainEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::repos::{AddressesRepository, RegionsRepository};
use crate::domain::validation::{AddressDraft, check_ids};

pub struct AddressesService<R: AddressesRepository, G: RegionsRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
    regions: Arc<G>,
    events: Arc<dyn EventPublisher<AddressDomainEvent>>,
}

impl<R: AddressesRepository, G: RegionsRepository> AddressesService<R, G> {
    pub fn new(
        db: Arc<DatabaseConnection>,
        repo: Arc<R>,
        regions: Arc<G>,
        events: Arc<dyn EventPublisher<AddressDomainEvent>>,
    ) -> Self {
        Self {
            db,
            repo,
            regions,
            events,
        }
    }
}

async fn rollback(txn: DatabaseTransaction, cause: &DomainError) {
    error!(error = %cause, "Address operation failed, rolling back");
    if let Err(e) = txn.rollback().await {
        warn!(error = %e, "Rollback failed; the transaction is discarded on drop");
    }
}

// Business logic methods
impl<R: AddressesRepository, G: RegionsRepository> AddressesService<R, G> {
    #[instrument(skip(self), fields(address_id = %id))]
    pub async fn get_address(&self, id: Uuid) -> Result<Address, DomainError> {
        debug!("Getting address by id");

        self.repo
            .find_one(&*self.db, id, Trashed::Without)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    #[instrument(skip(self, query))]
    pub async fn list_addresses_page(&self, query: &ListQuery) -> Result<Page<Address>, DomainError> {
        debug!("Listing addresses page");

        let page = self.repo.list_page(&*self.db, query).await?;

        debug!("Successfully listed {} of {} addresses", page.items.len(), page.total);
        Ok(page)
    }

    #[instrument(skip(self, query))]
    pub async fn list_addresses(&self, query: &ListQuery) -> Result<Vec<Address>, DomainError> {
        debug!("Listing addresses");
        self.repo.list(&*self.db, query).await
    }

    /// Options are only produced for a query narrowed to one owner.
    #[instrument(skip(self, query), fields(user_id = ?query.user_id))]
    pub async fn options(&self, query: &OptionsQuery) -> Result<Vec<AddressOption>, DomainError> {
        let Some(user_id) = query.user_id.filter(|_| query.ready_for_options()) else {
            debug!("Options requested without user_id");
            return Ok(Vec::new());
        };

        self.repo
            .options(&*self.db, user_id, query.q.as_deref())
            .await
    }

    #[instrument(skip(self))]
    pub async fn country_options(&self) -> Result<Vec<(String, String)>, DomainError> {
        self.regions.country_options(&*self.db).await
    }

    async fn validate(&self, draft: AddressDraft) -> Result<UpdateAddress, DomainError> {
        let city_exists = match draft.city_id() {
            Some(city_id) => self.regions.city_exists(&*self.db, city_id).await?,
            None => false,
        };
        draft.validate(city_exists).map_err(DomainError::from)
    }

    #[instrument(skip(self, draft), fields(user_id = ?draft.user_id))]
    pub async fn create_address(&self, draft: AddressDraft) -> Result<Address, DomainError> {
        info!("Creating new address");

        let id = draft.id.unwrap_or_else(Uuid::now_v7);
        let fields = self.validate(draft).await?;
        let now = OffsetDateTime::now_utc();

        let txn = self.db.begin().await?;
        if let Err(e) = self.repo.create(&txn, id, &fields, now).await {
            rollback(txn, &e).await;
            return Err(e);
        }
        txn.commit().await?;

        let address = self
            .repo
            .find_one(&*self.db, id, Trashed::With)
            .await?
            .ok_or(DomainError::InternalError)?;

        self.events.publish(&AddressDomainEvent::Created {
            address: address.clone(),
            at: now,
        });

        info!(address_id = %address.id, "Successfully created address");
        Ok(address)
    }

    /// Full replace of the mutable fields. Runs without a transaction.
    #[instrument(skip(self, draft), fields(address_id = %id))]
    pub async fn update_address(&self, id: Uuid, draft: AddressDraft) -> Result<Address, DomainError> {
        info!("Updating address");

        let fields = self.validate(draft).await?;

        self.repo
            .find_one(&*self.db, id, Trashed::Without)
            .await?
            .ok_or_else(|| DomainError::not_found(id))?;

        let now = OffsetDateTime::now_utc();
        if !self.repo.update(&*self.db, id, &fields, now).await? {
            return Err(DomainError::not_found(id));
        }

        let address = self
            .repo
            .find_one(&*self.db, id, Trashed::With)
            .await?
            .ok_or_else(|| DomainError::not_found(id))?;

        self.events.publish(&AddressDomainEvent::Updated {
            address: address.clone(),
            at: now,
        });

        info!("Successfully updated address");
        Ok(address)
    }

    /// Apply a lifecycle transition to a batch of ids in one transaction.
    ///
    /// Returns the ids that were actually processed; ids that do not match
    /// a row visible to the transition are skipped.
    #[instrument(skip(self, kind, list), fields(kind = kind.as_str()))]
    pub async fn transition(
        &self,
        kind: LifecycleTransition,
        list: Option<Vec<Uuid>>,
    ) -> Result<Vec<Uuid>, DomainError> {
        let ids = check_ids(list)?;
        info!(requested = ids.len(), "Applying address lifecycle transition");

        let now = OffsetDateTime::now_utc();
        let txn = self.db.begin().await?;
        let processed = match self.repo.transition(&txn, kind, &ids, now).await {
            Ok(processed) => processed,
            Err(e) => {
                rollback(txn, &e).await;
                return Err(e);
            }
        };
        txn.commit().await?;

        if !processed.is_empty() {
            let ids = processed.clone();
            let event = match kind {
                LifecycleTransition::SoftDelete => AddressDomainEvent::SoftDeleted { ids, at: now },
                LifecycleTransition::Restore => AddressDomainEvent::Restored { ids, at: now },
                LifecycleTransition::ForceDelete => AddressDomainEvent::ForceDeleted { ids, at: now },
            };
            self.events.publish(&event);
        }

        info!(processed = processed.len(), "Lifecycle transition committed");
        Ok(processed)
    }

    pub async fn delete_soft(&self, list: Option<Vec<Uuid>>) -> Result<Vec<Uuid>, DomainError> {
        self.transition(LifecycleTransition::SoftDelete, list).await
    }

    pub async fn restore(&self, list: Option<Vec<Uuid>>) -> Result<Vec<Uuid>, DomainError> {
        self.transition(LifecycleTransition::Restore, list).await
    }

    pub async fn delete_force(&self, list: Option<Vec<Uuid>>) -> Result<Vec<Uuid>, DomainError> {
        self.transition(LifecycleTransition::ForceDelete, list).await
    }
}
