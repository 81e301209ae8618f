//! Addresses Module
//!
//! Admin management of postal addresses owned by users and located in
//! cities: create, replace, soft delete, restore and force delete, plus an
//! options projection, a form descriptor and a live event stream.
//!
//! ## Architecture
//!
//! ### Contract Layer (`addresses-sdk`)
//! - `AddressesClientV1` trait, models (`Address`, `NewAddress`, ...) and
//!   the public `AddressesError`.
//!
//! ### API Layer (`addresses::api`)
//! - `rest/handlers.rs` - request extraction, envelope and problem mapping
//! - `rest/dto.rs` - REST DTOs and serialization
//! - `rest/form.rs` - form descriptor and index page configuration
//! - `rest/error.rs` - HTTP error mapping (domain errors → RFC9457 Problem)
//! - **Rule:** may import `domain::service` and `domain::error` for orchestration
//!
//! ### Domain Layer (`addresses::domain`)
//! - `service/` - business operations, transactions and event emission
//! - `validation.rs` - request rules
//! - `repos.rs` / `ports.rs` - interfaces for storage and event publishing
//! - **Rule:** MUST NOT import `api::*`
//!
//! ### Infrastructure Layer (`addresses::infra`)
//! - `storage/entity/` - `SeaORM` entities
//! - `storage/migrations/` - schema migrations
//! - `storage/mapper.rs` - entity → SDK model conversion with computed fields
//!
//! Other modules should depend on `addresses-sdk` and receive a
//! `dyn AddressesClientV1` from [`AddressesModule::client`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use addresses_sdk::{
    Address, AddressOption, AddressesClientV1, AddressesError, LifecycleTransition, ListQuery,
    NewAddress, OptionsQuery, Page, UpdateAddress,
};

// === MODULE DEFINITION ===
pub mod module;
pub use config::AddressesConfig;
pub use module::AddressesModule;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
// Only use the SDK types for stable public APIs.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
