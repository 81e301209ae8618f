use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::RegionsRepository;
use crate::infra::storage::entity::{city, country};

/// ORM-based implementation of the `RegionsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmRegionsRepository;

impl OrmRegionsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RegionsRepository for OrmRegionsRepository {
    async fn city_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        city_id: Uuid,
    ) -> Result<bool, DomainError> {
        let n = city::Entity::find()
            .filter(city::Column::Id.eq(city_id))
            .count(conn)
            .await?;
        Ok(n > 0)
    }

    async fn country_options<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Vec<(String, String)>, DomainError> {
        let countries = country::Entity::find()
            .order_by_asc(country::Column::Label)
            .all(conn)
            .await?;
        Ok(countries.into_iter().map(|c| (c.id, c.label)).collect())
    }
}
