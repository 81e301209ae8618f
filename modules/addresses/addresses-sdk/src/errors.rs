//! Public error types for the addresses module.
//!
//! These errors are safe to expose to other modules and consumers.

use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

/// Errors that can be returned by the `AddressesClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressesError {
    /// Address with the specified ID was not found.
    #[error("Address not found: {id}")]
    NotFound { id: Uuid },

    /// The request failed validation; `errors` maps field names to messages.
    #[error("Validation error: {}", render_fields(.errors))]
    Validation {
        errors: BTreeMap<String, Vec<String>>,
    },

    /// A mutating operation failed and was rolled back.
    #[error("Operation failed: {message}")]
    OperationFailed { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

fn render_fields(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AddressesError {
    /// Create a `NotFound` error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    /// Create a Validation error.
    #[must_use]
    pub fn validation(errors: BTreeMap<String, Vec<String>>) -> Self {
        Self::Validation { errors }
    }

    /// Create an `OperationFailed` error.
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: message.into(),
        }
    }

    /// Create an Internal error.
    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
