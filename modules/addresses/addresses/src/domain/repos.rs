use addresses_sdk::{
    Address, AddressOption, LifecycleTransition, ListQuery, Page, Trashed, UpdateAddress,
};
use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::error::DomainError;

/// Persistence port for addresses.
///
/// Every method takes the connection to run on, so the service decides
/// whether a call joins a transaction or runs on the pool.
#[async_trait]
pub trait AddressesRepository: Send + Sync {
    async fn find_one<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        trashed: Trashed,
    ) -> Result<Option<Address>, DomainError>;

    async fn list_page<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: &ListQuery,
    ) -> Result<Page<Address>, DomainError>;

    /// Same filters and ordering as [`AddressesRepository::list_page`], without paging.
    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: &ListQuery,
    ) -> Result<Vec<Address>, DomainError>;

    /// `{id, label}` pairs of a user's live addresses.
    async fn options<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        q: Option<&str>,
    ) -> Result<Vec<AddressOption>, DomainError>;

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        fields: &UpdateAddress,
        now: OffsetDateTime,
    ) -> Result<(), DomainError>;

    /// Replace the mutable fields of a live address. Returns `false` if no
    /// live row has that id.
    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        fields: &UpdateAddress,
        now: OffsetDateTime,
    ) -> Result<bool, DomainError>;

    /// Ids from `ids` that the transition applies to; soft delete only sees
    /// live rows, restore and force delete see trashed rows too.
    async fn find_for_transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        ids: &[Uuid],
        kind: LifecycleTransition,
    ) -> Result<Vec<Uuid>, DomainError>;

    async fn apply_transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        kind: LifecycleTransition,
        now: OffsetDateTime,
    ) -> Result<(), DomainError>;

    /// Load the targeted rows and apply `kind` to each, one row at a time.
    /// Unknown ids are skipped; the processed ids are returned in load order.
    async fn transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: LifecycleTransition,
        ids: &[Uuid],
        now: OffsetDateTime,
    ) -> Result<Vec<Uuid>, DomainError> {
        let found = self.find_for_transition(conn, ids, kind).await?;
        for id in &found {
            self.apply_transition(conn, *id, kind, now).await?;
        }
        Ok(found)
    }
}

/// Read-only access to the region tables owned by another module.
#[async_trait]
pub trait RegionsRepository: Send + Sync {
    async fn city_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        city_id: Uuid,
    ) -> Result<bool, DomainError>;

    /// `(country id, label)` pairs ordered by label.
    async fn country_options<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Vec<(String, String)>, DomainError>;
}
