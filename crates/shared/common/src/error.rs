//! Unified error handling for the HTTP surface.
//!
//! Every failure becomes a JSON body with a `message`; store failures also
//! carry the driver's `error` text, unhandled failures never do.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, StoreKind, MSG_INTERNAL_ERROR, MSG_STORE_UNSPECIFIED};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("{0}")]
    Validation(String),

    #[error("Usuario no encontrado en {0}")]
    NotFound(StoreKind),

    // Store errors
    #[error("Error en {store}: {detail}")]
    Store { store: StoreKind, detail: String },

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(_) => self.to_string(),
            AppError::Store { store, detail } => {
                tracing::error!(store = store.selector(), "Store error: {}", detail);
                format!("Error en {}", store)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                MSG_INTERNAL_ERROR.to_string()
            }
        }
    }

    /// Driver detail exposed to the client (store errors only)
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Store { detail, .. } => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Render the error, optionally tagging the body with `success`.
    pub fn response_with(self, success: Option<bool>) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            success,
            message: self.user_message(),
            error: self.detail().map(str::to_owned),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_with(None)
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::StoreUnspecified => AppError::Validation(MSG_STORE_UNSPECIFIED.to_string()),
            DomainError::NotFound(store) => AppError::NotFound(store),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

// =============================================================================
// Driver Error Conversion
// =============================================================================

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::store(StoreKind::Relational, err.to_string())
    }
}

#[cfg(feature = "document")]
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::store(StoreKind::Document, err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, store: StoreKind) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, store: StoreKind) -> AppResult<T> {
        self.ok_or(AppError::NotFound(store))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn store(store: StoreKind, detail: impl Into<String>) -> Self {
        AppError::Store {
            store,
            detail: detail.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
