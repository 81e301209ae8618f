//! Public API trait for the addresses module.
//!
//! The module registers an in-process implementation of this trait so other
//! components can manage addresses without going through HTTP:
//!
//! ```ignore
//! let client: Arc<dyn AddressesClientV1> = module.client();
//!
//! let created = client.create_address(new_address).await?;
//! let processed = client.delete_soft(vec![created.id]).await?;
//! ```

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AddressesError;
use crate::models::{
    Address, AddressOption, ListQuery, NewAddress, OptionsQuery, Page, UpdateAddress,
};

/// Public API trait for the addresses module.
#[async_trait]
pub trait AddressesClientV1: Send + Sync {
    /// Get a live (not soft-deleted) address by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no live address has this id
    /// - `Internal` for storage failures
    async fn get_address(&self, id: Uuid) -> Result<Address, AddressesError>;

    /// List addresses page by page.
    ///
    /// # Errors
    ///
    /// - `Internal` for storage failures
    async fn list_addresses(&self, query: ListQuery) -> Result<Page<Address>, AddressesError>;

    /// Create an address inside a transaction.
    ///
    /// # Errors
    ///
    /// - `Validation` when required fields are missing or the city is unknown
    /// - `OperationFailed` when the insert failed and was rolled back
    async fn create_address(&self, new_address: NewAddress) -> Result<Address, AddressesError>;

    /// Replace the mutable fields of a live address.
    ///
    /// # Errors
    ///
    /// - `Validation` when required fields are missing or the city is unknown
    /// - `NotFound` if no live address has this id
    /// - `Internal` for storage failures
    async fn update_address(
        &self,
        id: Uuid,
        update: UpdateAddress,
    ) -> Result<Address, AddressesError>;

    /// Soft-delete the given addresses; returns the ids actually processed.
    ///
    /// # Errors
    ///
    /// - `Validation` when `ids` is empty
    /// - `OperationFailed` when the batch failed and was rolled back
    async fn delete_soft(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>, AddressesError>;

    /// Restore soft-deleted addresses; returns the ids actually processed.
    ///
    /// # Errors
    ///
    /// Same as [`AddressesClientV1::delete_soft`].
    async fn restore(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>, AddressesError>;

    /// Permanently remove addresses; returns the ids actually processed.
    ///
    /// # Errors
    ///
    /// Same as [`AddressesClientV1::delete_soft`].
    async fn delete_force(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>, AddressesError>;

    /// `{id, label}` projection of an owner's addresses.
    ///
    /// Returns an empty list when the query is not narrowed by `user_id`.
    ///
    /// # Errors
    ///
    /// - `Internal` for storage failures
    async fn options(&self, query: OptionsQuery) -> Result<Vec<AddressOption>, AddressesError>;
}
