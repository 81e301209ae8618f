use addresses_sdk::AddressesError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::validation::ValidationErrors;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {errors}")]
    Validation { errors: ValidationErrors },

    #[error("Address not found: {id}")]
    NotFound { id: Uuid },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error")]
    InternalError,
}

impl DomainError {
    #[must_use]
    pub fn validation(errors: ValidationErrors) -> Self {
        Self::Validation { errors }
    }

    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// The underlying message without the variant prefix, as shown to
    /// admin users when a transactional operation is rolled back.
    #[must_use]
    pub fn raw_message(&self) -> String {
        match self {
            Self::Database { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors)
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        DomainError::database(e.to_string())
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for AddressesError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::Validation { errors } => AddressesError::validation(errors.into_map()),
            DomainError::NotFound { id } => AddressesError::not_found(id),
            DomainError::Database { message } => AddressesError::operation_failed(message),
            DomainError::InternalError => AddressesError::internal(),
        }
    }
}
