//! Domain service layer - business logic and rules.
//!
//! ## Transactions
//!
//! Create, soft delete, restore and force delete run inside one database
//! transaction each. The transaction is committed before the domain event is
//! published; on failure it is rolled back and nothing is published.
//! Update runs directly on the pool.
//!
//! ## Layering Rules
//!
//! The domain layer:
//! - **MAY** import: `addresses_sdk` (contract types), `sea_orm` connection traits
//! - **MUST NOT** import: `api::*` (one-way dependency: API → Domain)

mod addresses;

pub use addresses::AddressesService;

#[cfg(test)]
mod tests_entities;

#[cfg(test)]
mod tests_listing;

#[cfg(test)]
mod tests_transactions;
