//! Addresses SDK
//!
//! This crate provides the public API for the addresses module:
//!
//! - [`AddressesClientV1`] - Public API trait for consumers
//! - [`Address`], [`NewAddress`], [`UpdateAddress`], [`AddressOption`] - Models
//! - [`LifecycleTransition`] - Soft delete / restore / force delete kinds
//! - [`AddressesError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use addresses_sdk::{AddressesClientV1, OptionsQuery};
//!
//! let options = client
//!     .options(OptionsQuery { user_id: Some(owner_id), q: None })
//!     .await?;
//! ```

pub mod api;
pub mod errors;
pub mod models;

// Re-export main types at crate root
pub use api::AddressesClientV1;
pub use errors::AddressesError;
pub use models::{
    Address, AddressOption, CitySummary, LifecycleTransition, ListQuery, NewAddress,
    OptionsQuery, OwnerSummary, Page, SortField, SortOrder, Trashed, UpdateAddress,
};
