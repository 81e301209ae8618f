use addresses_sdk::{
    Address, AddressOption, LifecycleTransition, ListQuery, Page, SortField, SortOrder, Trashed,
    UpdateAddress,
};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Order};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::AddressesRepository;
use crate::infra::storage::LimitCfg;
use crate::infra::storage::entity::address::{
    ActiveModel as AddressAM, Column as AddressColumn, Entity as AddressEntity,
};
use crate::infra::storage::mapper::hydrate;

/// ORM-based implementation of the `AddressesRepository` trait.
#[derive(Clone)]
pub struct OrmAddressesRepository {
    limit_cfg: LimitCfg,
    locale: String,
}

impl OrmAddressesRepository {
    #[must_use]
    pub fn new(limit_cfg: LimitCfg, locale: impl Into<String>) -> Self {
        Self {
            limit_cfg,
            locale: locale.into(),
        }
    }
}

fn with_trashed(select: Select<AddressEntity>, trashed: Trashed) -> Select<AddressEntity> {
    match trashed {
        Trashed::Without => select.filter(AddressColumn::DeletedAt.is_null()),
        Trashed::With => select,
        Trashed::Only => select.filter(AddressColumn::DeletedAt.is_not_null()),
    }
}

const LIKE_ESCAPE: char = '\\';

/// Escapes LIKE wildcards so user input matches literally.
fn escape_like(q: &str) -> String {
    let mut out = String::with_capacity(q.len());
    for c in q.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Case-insensitive substring match over label, address line and postal code.
fn search(q: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&q.to_lowercase()));
    [
        AddressColumn::Label,
        AddressColumn::AddressLine,
        AddressColumn::PostalCode,
    ]
    .into_iter()
    .fold(Condition::any(), |cond, col| {
        cond.add(
            Expr::expr(Func::lower(Expr::col(col)))
                .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
        )
    })
}

fn non_blank(q: Option<&str>) -> Option<&str> {
    q.map(str::trim).filter(|q| !q.is_empty())
}

fn filtered(query: &ListQuery) -> Select<AddressEntity> {
    let mut select = with_trashed(AddressEntity::find(), query.trashed);

    if let Some(user_id) = query.user_id {
        select = select.filter(AddressColumn::UserId.eq(user_id));
    }
    if let Some(city_id) = query.city_id {
        select = select.filter(AddressColumn::CityId.eq(city_id));
    }
    if let Some(q) = non_blank(query.q.as_deref()) {
        select = select.filter(search(q));
    }

    let column = match query.sort_by {
        SortField::CreatedAt => AddressColumn::CreatedAt,
        SortField::UpdatedAt => AddressColumn::UpdatedAt,
        SortField::Label => AddressColumn::Label,
        SortField::AddressLine => AddressColumn::AddressLine,
        SortField::PostalCode => AddressColumn::PostalCode,
    };
    let order = match query.sort_order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };

    // id as tie-breaker keeps pages stable for equal sort keys
    select
        .order_by(column, order.clone())
        .order_by(AddressColumn::Id, order)
}

#[async_trait]
impl AddressesRepository for OrmAddressesRepository {
    async fn find_one<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        trashed: Trashed,
    ) -> Result<Option<Address>, DomainError> {
        let found = with_trashed(AddressEntity::find_by_id(id), trashed)
            .one(conn)
            .await?;

        let Some(row) = found else {
            return Ok(None);
        };
        Ok(hydrate(conn, &self.locale, vec![row]).await?.pop())
    }

    async fn list_page<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: &ListQuery,
    ) -> Result<Page<Address>, DomainError> {
        let per_page = self.limit_cfg.per_page(query.per_page);
        let page = query.page.unwrap_or(1).max(1);

        let paginator = filtered(query).paginate(conn, per_page);
        let total = paginator.num_items().await?;
        // pages past the end are empty; huge page numbers must not overflow the offset
        let rows = match (page - 1).checked_mul(per_page) {
            Some(offset) if offset < total => paginator.fetch_page(page - 1).await?,
            _ => Vec::new(),
        };

        let items = hydrate(conn, &self.locale, rows).await?;
        Ok(Page::new(items, page, per_page, total))
    }

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: &ListQuery,
    ) -> Result<Vec<Address>, DomainError> {
        let rows = filtered(query).all(conn).await?;
        Ok(hydrate(conn, &self.locale, rows).await?)
    }

    async fn options<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        q: Option<&str>,
    ) -> Result<Vec<AddressOption>, DomainError> {
        let mut select = AddressEntity::find()
            .filter(AddressColumn::DeletedAt.is_null())
            .filter(AddressColumn::UserId.eq(user_id));
        if let Some(q) = non_blank(q) {
            select = select.filter(search(q));
        }

        let rows = select
            .order_by_desc(AddressColumn::CreatedAt)
            .all(conn)
            .await?;
        let addresses = hydrate(conn, &self.locale, rows).await?;
        Ok(addresses.iter().map(AddressOption::from).collect())
    }

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        fields: &UpdateAddress,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let m = AddressAM {
            id: Set(id),
            label: Set(fields.label.clone()),
            address_line: Set(fields.address_line.clone()),
            postal_code: Set(fields.postal_code.clone()),
            city_id: Set(fields.city_id),
            user_id: Set(fields.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let _ = AddressEntity::insert(m).exec_without_returning(conn).await?;
        Ok(())
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        fields: &UpdateAddress,
        now: OffsetDateTime,
    ) -> Result<bool, DomainError> {
        let result = AddressEntity::update_many()
            .col_expr(AddressColumn::Label, Expr::value(fields.label.clone()))
            .col_expr(
                AddressColumn::AddressLine,
                Expr::value(fields.address_line.clone()),
            )
            .col_expr(
                AddressColumn::PostalCode,
                Expr::value(fields.postal_code.clone()),
            )
            .col_expr(AddressColumn::CityId, Expr::value(fields.city_id))
            .col_expr(AddressColumn::UserId, Expr::value(fields.user_id))
            .col_expr(AddressColumn::UpdatedAt, Expr::value(now))
            .filter(AddressColumn::Id.eq(id))
            .filter(AddressColumn::DeletedAt.is_null())
            .exec(conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn find_for_transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        ids: &[Uuid],
        kind: LifecycleTransition,
    ) -> Result<Vec<Uuid>, DomainError> {
        let trashed = if kind.includes_trashed() {
            Trashed::With
        } else {
            Trashed::Without
        };

        let found = with_trashed(AddressEntity::find(), trashed)
            .select_only()
            .column(AddressColumn::Id)
            .filter(AddressColumn::Id.is_in(ids.iter().copied()))
            .order_by_asc(AddressColumn::CreatedAt)
            .order_by_asc(AddressColumn::Id)
            .into_tuple::<Uuid>()
            .all(conn)
            .await?;

        Ok(found)
    }

    async fn apply_transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        kind: LifecycleTransition,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        match kind {
            LifecycleTransition::SoftDelete => {
                AddressEntity::update_many()
                    .col_expr(AddressColumn::DeletedAt, Expr::value(Some(now)))
                    .col_expr(AddressColumn::UpdatedAt, Expr::value(now))
                    .filter(AddressColumn::Id.eq(id))
                    .exec(conn)
                    .await?;
            }
            LifecycleTransition::Restore => {
                AddressEntity::update_many()
                    .col_expr(
                        AddressColumn::DeletedAt,
                        Expr::value(Option::<OffsetDateTime>::None),
                    )
                    .col_expr(AddressColumn::UpdatedAt, Expr::value(now))
                    .filter(AddressColumn::Id.eq(id))
                    .filter(AddressColumn::DeletedAt.is_not_null())
                    .exec(conn)
                    .await?;
            }
            LifecycleTransition::ForceDelete => {
                AddressEntity::delete_many()
                    .filter(AddressColumn::Id.eq(id))
                    .exec(conn)
                    .await?;
            }
        }
        Ok(())
    }
}
