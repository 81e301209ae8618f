use addresses_sdk::{
    Address, AddressOption, CitySummary, ListQuery, OptionsQuery, OwnerSummary, Page, SortField,
    SortOrder, Trashed,
};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::events::AddressDomainEvent;
use crate::domain::validation::AddressDraft;

/// REST DTO for address representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddressDto {
    pub id: Uuid,
    pub label: Option<String>,
    pub address_line: String,
    pub postal_code: String,
    pub city_id: Uuid,
    pub user_id: Uuid,
    pub full_address: String,
    pub country_id: Option<String>,
    pub city: Option<CityDto>,
    pub user: Option<OwnerDto>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CityDto {
    pub id: Uuid,
    pub country_id: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OwnerDto {
    pub id: Uuid,
    pub email: String,
}

/// Owner reference as sent by the searchable user dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OwnerRef {
    pub id: Uuid,
}

/// REST DTO for creating or replacing an address.
///
/// Fields are optional at the wire level; required ones are enforced by
/// the domain validator so that all violations are reported together.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AddressReq {
    pub id: Option<Uuid>,
    pub label: Option<String>,
    pub address_line: Option<String>,
    pub postal_code: Option<String>,
    pub city_id: Option<Uuid>,
    pub user: Option<OwnerRef>,
    /// When present, a successful create answers with the `{id, label}` projection.
    /// The key counts even when its value is `null`.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Object>)]
    pub hc_options: Option<serde_json::Value>,
}

/// Maps any present value, `null` included, to `Some`.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<serde_json::Value>, D::Error> {
    serde_json::Value::deserialize(d).map(Some)
}

impl AddressReq {
    #[must_use]
    pub fn wants_options(&self) -> bool {
        self.hc_options.is_some()
    }

    /// Draft for create; a client-supplied id is kept.
    #[must_use]
    pub fn into_new_draft(self) -> AddressDraft {
        AddressDraft {
            id: self.id,
            ..self.into_update_draft()
        }
    }

    /// Draft for update; the id comes from the path, never from the body.
    #[must_use]
    pub fn into_update_draft(self) -> AddressDraft {
        AddressDraft {
            id: None,
            label: self.label,
            address_line: self.address_line,
            postal_code: self.postal_code,
            city_id: self.city_id,
            user_id: self.user.map(|u| u.id),
        }
    }
}

/// REST DTO for batch lifecycle requests.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListIdsReq {
    pub list: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortFieldDto {
    CreatedAt,
    UpdatedAt,
    Label,
    AddressLine,
    PostalCode,
}

impl From<SortFieldDto> for SortField {
    fn from(value: SortFieldDto) -> Self {
        match value {
            SortFieldDto::CreatedAt => SortField::CreatedAt,
            SortFieldDto::UpdatedAt => SortField::UpdatedAt,
            SortFieldDto::Label => SortField::Label,
            SortFieldDto::AddressLine => SortField::AddressLine,
            SortFieldDto::PostalCode => SortField::PostalCode,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrderDto {
    Asc,
    Desc,
}

impl From<SortOrderDto> for SortOrder {
    fn from(value: SortOrderDto) -> Self {
        match value {
            SortOrderDto::Asc => SortOrder::Asc,
            SortOrderDto::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrashedDto {
    Without,
    With,
    Only,
}

impl From<TrashedDto> for Trashed {
    fn from(value: TrashedDto) -> Self {
        match value {
            TrashedDto::Without => Trashed::Without,
            TrashedDto::With => Trashed::With,
            TrashedDto::Only => Trashed::Only,
        }
    }
}

/// Query parameters of the list endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Substring matched against label, address line and postal code
    pub q: Option<String>,
    pub sort_by: Option<SortFieldDto>,
    pub sort_order: Option<SortOrderDto>,
    pub trashed: Option<TrashedDto>,
    pub user_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
}

impl From<ListParams> for ListQuery {
    fn from(p: ListParams) -> Self {
        Self {
            page: p.page,
            per_page: p.per_page,
            q: p.q,
            sort_by: p.sort_by.map(Into::into).unwrap_or_default(),
            sort_order: p.sort_order.map(Into::into).unwrap_or_default(),
            trashed: p.trashed.map(Into::into).unwrap_or_default(),
            user_id: p.user_id,
            city_id: p.city_id,
        }
    }
}

/// Query parameters of the options endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OptionsParams {
    pub user_id: Option<Uuid>,
    pub q: Option<String>,
}

impl From<OptionsParams> for OptionsQuery {
    fn from(p: OptionsParams) -> Self {
        Self {
            user_id: p.user_id,
            q: p.q,
        }
    }
}

/// Query parameters of the create endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateParams {
    pub hc_options: Option<String>,
}

/// Query parameters of the form descriptor endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FormParams {
    /// Build the edit variant of the form
    pub edit: Option<bool>,
    /// Append the hidden `hc_new` marker field
    pub hc_new: Option<String>,
}

impl FormParams {
    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.edit.unwrap_or(false)
    }

    #[must_use]
    pub fn wants_new_marker(&self) -> bool {
        self.hc_new
            .as_deref()
            .is_some_and(|v| !v.is_empty() && v != "0" && v != "false")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OptionDto {
    pub id: Uuid,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddressPageDto {
    pub items: Vec<AddressDto>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

/// Processed ids of a batch operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProcessedIdsDto {
    pub ids: Vec<Uuid>,
}

/// SSE payload describing one address change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressEvent {
    pub kind: String,
    pub ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressDto>,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

impl From<CitySummary> for CityDto {
    fn from(c: CitySummary) -> Self {
        Self {
            id: c.id,
            country_id: c.country_id,
            label: c.label,
        }
    }
}

impl From<OwnerSummary> for OwnerDto {
    fn from(o: OwnerSummary) -> Self {
        Self {
            id: o.id,
            email: o.email,
        }
    }
}

impl From<Address> for AddressDto {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            label: a.label,
            address_line: a.address_line,
            postal_code: a.postal_code,
            city_id: a.city_id,
            user_id: a.user_id,
            full_address: a.full_address,
            country_id: a.country_id,
            city: a.city.map(Into::into),
            user: a.owner.map(Into::into),
            created_at: a.created_at,
            updated_at: a.updated_at,
            deleted_at: a.deleted_at,
        }
    }
}

impl From<AddressOption> for OptionDto {
    fn from(o: AddressOption) -> Self {
        Self {
            id: o.id,
            label: o.label,
        }
    }
}

impl From<Page<Address>> for AddressPageDto {
    fn from(page: Page<Address>) -> Self {
        let page = page.map(AddressDto::from);
        Self {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            last_page: page.last_page,
        }
    }
}

impl From<&AddressDomainEvent> for AddressEvent {
    fn from(e: &AddressDomainEvent) -> Self {
        use AddressDomainEvent::{Created, ForceDeleted, Restored, SoftDeleted, Updated};
        match e {
            Created { address, at } => Self {
                kind: "created".into(),
                ids: vec![address.id],
                address: Some(address.clone().into()),
                at: *at,
            },
            Updated { address, at } => Self {
                kind: "updated".into(),
                ids: vec![address.id],
                address: Some(address.clone().into()),
                at: *at,
            },
            SoftDeleted { ids, at } => Self {
                kind: "deleted".into(),
                ids: ids.clone(),
                address: None,
                at: *at,
            },
            Restored { ids, at } => Self {
                kind: "restored".into(),
                ids: ids.clone(),
                address: None,
                at: *at,
            },
            ForceDeleted { ids, at } => Self {
                kind: "force_deleted".into(),
                ids: ids.clone(),
                address: None,
                at: *at,
            },
        }
    }
}
