//! Public models for the addresses module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the addresses module and its consumers. They carry no serde or
//! schema derives; REST DTOs live in the module's API layer.

use time::OffsetDateTime;
use uuid::Uuid;

/// Postal address owned by a user and located in a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: Uuid,
    pub label: Option<String>,
    pub address_line: String,
    pub postal_code: String,
    pub city_id: Uuid,
    pub user_id: Uuid,
    /// `"{address_line}, {city label}"`, or the bare address line when the
    /// city has no translation.
    pub full_address: String,
    /// Country of the address, resolved through its city.
    pub country_id: Option<String>,
    pub city: Option<CitySummary>,
    pub owner: Option<OwnerSummary>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl Address {
    /// Whether the address is currently soft-deleted.
    #[must_use]
    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// City reference as loaded alongside an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitySummary {
    pub id: Uuid,
    pub country_id: String,
    /// Localized city label, if a translation exists.
    pub label: Option<String>,
}

/// Owner (user) reference as loaded alongside an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub email: String,
}

/// Data for creating a new address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    /// Optional client-supplied id; generated when absent.
    pub id: Option<Uuid>,
    pub label: Option<String>,
    pub address_line: String,
    pub postal_code: String,
    pub city_id: Uuid,
    pub user_id: Uuid,
}

/// Full replacement of an address's mutable fields.
///
/// Unlike a patch, every field is applied; `label: None` clears the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAddress {
    pub label: Option<String>,
    pub address_line: String,
    pub postal_code: String,
    pub city_id: Uuid,
    pub user_id: Uuid,
}

impl From<NewAddress> for UpdateAddress {
    fn from(new: NewAddress) -> Self {
        Self {
            label: new.label,
            address_line: new.address_line,
            postal_code: new.postal_code,
            city_id: new.city_id,
            user_id: new.user_id,
        }
    }
}

/// Minimal `{id, label}` projection used to populate selection widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressOption {
    pub id: Uuid,
    pub label: String,
}

impl From<&Address> for AddressOption {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id,
            label: address.full_address.clone(),
        }
    }
}

/// Batch lifecycle transition applied to a set of address ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleTransition {
    /// Set the deletion timestamp on live rows.
    SoftDelete,
    /// Clear the deletion timestamp, trashed rows included.
    Restore,
    /// Remove rows permanently, trashed rows included.
    ForceDelete,
}

impl LifecycleTransition {
    /// Whether rows are looked up including soft-deleted ones.
    #[must_use]
    pub fn includes_trashed(self) -> bool {
        !matches!(self, Self::SoftDelete)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SoftDelete => "soft_delete",
            Self::Restore => "restore",
            Self::ForceDelete => "force_delete",
        }
    }
}

/// Soft-delete visibility for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trashed {
    /// Live rows only.
    #[default]
    Without,
    /// Live and soft-deleted rows.
    With,
    /// Soft-deleted rows only.
    Only,
}

/// Sortable address columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Label,
    AddressLine,
    PostalCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter, sort and paging parameters for address listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    /// 1-based page number; `None` means the first page.
    pub page: Option<u64>,
    /// Page size; `None` means the configured default.
    pub per_page: Option<u64>,
    /// Case-insensitive substring matched against label, address line and postal code.
    pub q: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub trashed: Trashed,
    pub user_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
}

/// Parameters of an options lookup.
///
/// The lookup is only answered once the caller has narrowed it to an owner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionsQuery {
    pub user_id: Option<Uuid>,
    pub q: Option<String>,
}

impl OptionsQuery {
    /// True iff the query is narrowed by `user_id`.
    #[must_use]
    pub fn ready_for_options(&self) -> bool {
        self.user_id.is_some()
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let last_page = if per_page == 0 {
            1
        } else {
            total.div_ceil(per_page).max(1)
        };
        Self {
            items,
            page,
            per_page,
            total,
            last_page,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
        }
    }
}
