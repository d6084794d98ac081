//! Store selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{LABEL_MONGODB, LABEL_MYSQL, SELECTOR_MONGODB, SELECTOR_MYSQL};
use crate::error::{DomainError, DomainResult};

/// Backing store a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    /// SQL table (MySQL)
    #[serde(rename = "mysql")]
    Relational,
    /// Document collection (MongoDB)
    #[serde(rename = "mongodb")]
    Document,
}

impl StoreKind {
    /// Both stores, relational first.
    pub const ALL: [StoreKind; 2] = [StoreKind::Relational, StoreKind::Document];

    /// Resolve the caller-supplied selector.
    ///
    /// Matching is exact: `"MySQL"` or `" mysql"` are rejected like a missing
    /// value.
    pub fn from_selector(selector: Option<&str>) -> DomainResult<Self> {
        selector
            .ok_or(DomainError::StoreUnspecified)?
            .parse()
    }

    /// Value accepted in the `database` field.
    pub fn selector(&self) -> &'static str {
        match self {
            StoreKind::Relational => SELECTOR_MYSQL,
            StoreKind::Document => SELECTOR_MONGODB,
        }
    }

    /// Name used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            StoreKind::Relational => LABEL_MYSQL,
            StoreKind::Document => LABEL_MONGODB,
        }
    }
}

impl FromStr for StoreKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SELECTOR_MYSQL => Ok(StoreKind::Relational),
            SELECTOR_MONGODB => Ok(StoreKind::Document),
            _ => Err(DomainError::StoreUnspecified),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
