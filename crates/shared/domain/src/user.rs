//! User record and the payloads that create or change it.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier assigned by the store that created the record.
///
/// Serialized as a JSON number for the relational store and as the hex
/// ObjectId string for the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Auto-increment primary key
    Int(i64),
    /// Generated document identifier
    Object(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Object(id) => f.write_str(id),
        }
    }
}

/// User record as stored and returned to clients.
///
/// `password` is kept and returned in plain text; existing clients read it
/// back on the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserRecord {
    /// Store-assigned identifier (number for MySQL, hex string for MongoDB)
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "42"))]
    pub id: RecordId,
    /// Free text
    pub text_field: String,
    /// Plain-text password
    pub password: String,
    /// Stored upload filename
    pub image: Option<String>,
    /// Calendar date
    pub date_field: Option<NaiveDate>,
    /// Free-form opinion
    pub opinion: Option<String>,
}

/// Data for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub text_field: String,
    pub password: String,
    pub image: Option<String>,
    pub date_field: Option<NaiveDate>,
    pub opinion: Option<String>,
}

/// Raw update payload; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditUser {
    pub text_field: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
    pub date_field: Option<NaiveDate>,
    pub opinion: Option<String>,
}

/// Change to a nullable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Change<T> {
    /// Leave the stored value untouched
    #[default]
    Keep,
    /// Overwrite with a value
    Set(T),
    /// Overwrite with null
    Clear,
}

impl<T> Change<T> {
    /// `Set` for `Some`, `Keep` for `None`.
    pub fn keep_if_absent(value: Option<T>) -> Self {
        value.map_or(Change::Keep, Change::Set)
    }

    /// `Set` for `Some`, `Clear` for `None`.
    pub fn clear_if_absent(value: Option<T>) -> Self {
        value.map_or(Change::Clear, Change::Set)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Change<U> {
        match self {
            Change::Keep => Change::Keep,
            Change::Set(value) => Change::Set(f(value)),
            Change::Clear => Change::Clear,
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Change::Keep)
    }

    /// New column value, or `None` when the field is untouched.
    pub fn into_update(self) -> Option<Option<T>> {
        match self {
            Change::Keep => None,
            Change::Set(value) => Some(Some(value)),
            Change::Clear => Some(None),
        }
    }
}

/// Per-field change set applied by a storage adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// `None` keeps the stored value
    pub text_field: Option<String>,
    /// `None` keeps the stored value
    pub password: Option<String>,
    pub image: Change<String>,
    pub date_field: Change<NaiveDate>,
    pub opinion: Change<String>,
}

impl UserChanges {
    /// True when applying the set would not modify anything.
    pub fn is_empty(&self) -> bool {
        self.text_field.is_none()
            && self.password.is_none()
            && self.image.is_keep()
            && self.date_field.is_keep()
            && self.opinion.is_keep()
    }

    /// Apply the changes to an in-memory record.
    pub fn apply_to(self, record: &mut UserRecord) {
        if let Some(text_field) = self.text_field {
            record.text_field = text_field;
        }
        if let Some(password) = self.password {
            record.password = password;
        }
        if let Some(image) = self.image.into_update() {
            record.image = image;
        }
        if let Some(date_field) = self.date_field.into_update() {
            record.date_field = date_field;
        }
        if let Some(opinion) = self.opinion.into_update() {
            record.opinion = opinion;
        }
    }
}

/// Parse a date as sent by forms (`YYYY-MM-DD`) or JSON clients (RFC 3339).
///
/// Blank input is treated as no date.
pub fn parse_date(raw: &str) -> DomainResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| DomainError::invalid_date(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            id: RecordId::Int(1),
            text_field: "hola".to_string(),
            password: "secreto".to_string(),
            image: Some("1700000000000.png".to_string()),
            date_field: NaiveDate::from_ymd_opt(2024, 5, 1),
            opinion: Some("bien".to_string()),
        }
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_date("2024-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_parse_rfc3339_keeps_date_part() {
        assert_eq!(
            parse_date("2024-03-15T10:30:00Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_parse_blank_is_none() {
        assert_eq!(parse_date("").unwrap(), None);
        assert_eq!(parse_date("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_garbage_is_validation_error() {
        assert!(matches!(parse_date("ayer"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_date("2024-13-40"), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_record_id_serialization() {
        assert_eq!(serde_json::to_value(RecordId::Int(5)).unwrap(), serde_json::json!(5));
        assert_eq!(
            serde_json::to_value(RecordId::Object("65f0c0ffee".to_string())).unwrap(),
            serde_json::json!("65f0c0ffee")
        );
    }

    #[test]
    fn test_empty_changes_leave_record_untouched() {
        let changes = UserChanges::default();
        assert!(changes.is_empty());

        let mut user = record();
        changes.apply_to(&mut user);
        assert_eq!(user, record());
    }

    #[test]
    fn test_changes_set_and_clear() {
        let changes = UserChanges {
            text_field: Some("adiós".to_string()),
            image: Change::Clear,
            opinion: Change::Set("regular".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        let mut user = record();
        changes.apply_to(&mut user);
        assert_eq!(user.text_field, "adiós");
        assert_eq!(user.password, "secreto");
        assert_eq!(user.image, None);
        assert_eq!(user.date_field, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(user.opinion.as_deref(), Some("regular"));
    }
}
