//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database drivers).

use thiserror::Error;

use crate::constants::{
    MSG_INVALID_DATE, MSG_INVALID_FIELD, MSG_REQUIRED_FIELDS, MSG_STORE_UNSPECIFIED,
};
use crate::store::StoreKind;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("{0}")]
    Validation(String),

    /// Selector missing or not recognized
    #[error("{}", MSG_STORE_UNSPECIFIED)]
    StoreUnspecified,

    /// Identifier does not resolve in the given store
    #[error("Usuario no encontrado en {0}")]
    NotFound(StoreKind),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create-time presence check failed
    pub fn required_fields() -> Self {
        DomainError::Validation(MSG_REQUIRED_FIELDS.to_string())
    }

    /// Date field could not be parsed
    pub fn invalid_date(raw: &str) -> Self {
        DomainError::Validation(format!("{}: {}", MSG_INVALID_DATE, raw))
    }

    /// Body field is not a scalar
    pub fn invalid_field(name: &str) -> Self {
        DomainError::Validation(format!("{}: {}", MSG_INVALID_FIELD, name))
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
