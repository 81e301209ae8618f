use std::sync::Arc;

use addresses_sdk::{
    Address, AddressOption, AddressesClientV1, AddressesError, ListQuery, NewAddress,
    OptionsQuery, Page, UpdateAddress,
};
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::repos::{AddressesRepository, RegionsRepository};
use crate::domain::service::AddressesService;

/// In-process implementation of [`AddressesClientV1`] backed by the domain service.
pub struct AddressesLocalClient<R: AddressesRepository, G: RegionsRepository> {
    service: Arc<AddressesService<R, G>>,
}

impl<R: AddressesRepository, G: RegionsRepository> AddressesLocalClient<R, G> {
    #[must_use]
    pub fn new(service: Arc<AddressesService<R, G>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, G> AddressesClientV1 for AddressesLocalClient<R, G>
where
    R: AddressesRepository + 'static,
    G: RegionsRepository + 'static,
{
    async fn get_address(&self, id: Uuid) -> Result<Address, AddressesError> {
        self.service.get_address(id).await.map_err(Into::into)
    }

    async fn list_addresses(&self, query: ListQuery) -> Result<Page<Address>, AddressesError> {
        self.service
            .list_addresses_page(&query)
            .await
            .map_err(Into::into)
    }

    async fn create_address(&self, new_address: NewAddress) -> Result<Address, AddressesError> {
        self.service
            .create_address(new_address.into())
            .await
            .map_err(Into::into)
    }

    async fn update_address(
        &self,
        id: Uuid,
        update: UpdateAddress,
    ) -> Result<Address, AddressesError> {
        self.service
            .update_address(id, update.into())
            .await
            .map_err(Into::into)
    }

    async fn delete_soft(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>, AddressesError> {
        self.service.delete_soft(Some(ids)).await.map_err(Into::into)
    }

    async fn restore(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>, AddressesError> {
        self.service.restore(Some(ids)).await.map_err(Into::into)
    }

    async fn delete_force(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>, AddressesError> {
        self.service.delete_force(Some(ids)).await.map_err(Into::into)
    }

    async fn options(&self, query: OptionsQuery) -> Result<Vec<AddressOption>, AddressesError> {
        self.service.options(&query).await.map_err(Into::into)
    }
}
