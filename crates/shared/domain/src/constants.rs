//! Domain-level constants.
//!
//! Selector values, field names and the user-facing messages shared by every
//! route. Messages are kept verbatim because existing clients match on them.

// =============================================================================
// Store Selectors
// =============================================================================

/// Selector value for the relational store
pub const SELECTOR_MYSQL: &str = "mysql";

/// Selector value for the document store
pub const SELECTOR_MONGODB: &str = "mongodb";

/// Display label of the relational store
pub const LABEL_MYSQL: &str = "MySQL";

/// Display label of the document store
pub const LABEL_MONGODB: &str = "MongoDB";

// =============================================================================
// Storage Layout
// =============================================================================

/// Document collection holding user records
pub const USERS_COLLECTION: &str = "users";

// =============================================================================
// Upload Fields
// =============================================================================

/// Multipart field carrying the image on create
pub const FIELD_IMAGE: &str = "image";

/// Multipart field carrying the replacement image on update
pub const FIELD_EDIT_IMAGE: &str = "edit_image";

// =============================================================================
// Messages
// =============================================================================

/// Create was called without text_field or password
pub const MSG_REQUIRED_FIELDS: &str = "Los campos text_field y password son obligatorios";

/// Selector missing or not a known store
pub const MSG_STORE_UNSPECIFIED: &str = "Base de datos no especificada";

/// Generic message for unhandled failures
pub const MSG_INTERNAL_ERROR: &str = "Error interno del servidor";

/// Date could not be parsed
pub const MSG_INVALID_DATE: &str = "Fecha inválida";

/// Body field holds a list or an object instead of text
pub const MSG_INVALID_FIELD: &str = "Campo inválido";
