//! Update policy: how an update payload becomes a change set.

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::store::StoreKind;
use crate::user::{Change, EditUser, UserChanges};

/// Config value for [`UpdatePolicy::PreserveAbsent`]
pub const POLICY_PRESERVE: &str = "preserve";

/// Config value for [`UpdatePolicy::LegacyPerStore`]
pub const POLICY_LEGACY: &str = "legacy";

/// Treatment of fields missing from an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Absent fields are no-ops on both stores; the image changes only when
    /// a new file is supplied.
    #[default]
    PreserveAbsent,
    /// Per-store behavior of the first deployment.
    ///
    /// Relational: full replacement, absent text becomes `""` and absent
    /// image, date and opinion become null. Document: absent text fields and
    /// opinion are kept, absent date becomes null, the image is kept unless a
    /// new file is supplied.
    ///
    /// One exception: updating a relational row that does not exist is a
    /// not-found error here, where the first deployment answered success.
    LegacyPerStore,
}

impl UpdatePolicy {
    /// Build the change set for `store` from a raw update.
    pub fn changes(&self, store: StoreKind, edit: EditUser) -> UserChanges {
        match (self, store) {
            (UpdatePolicy::PreserveAbsent, _) => UserChanges {
                text_field: edit.text_field,
                password: edit.password,
                image: Change::keep_if_absent(edit.image),
                date_field: Change::keep_if_absent(edit.date_field),
                opinion: Change::keep_if_absent(edit.opinion),
            },
            (UpdatePolicy::LegacyPerStore, StoreKind::Relational) => UserChanges {
                text_field: Some(edit.text_field.unwrap_or_default()),
                password: Some(edit.password.unwrap_or_default()),
                image: Change::clear_if_absent(edit.image),
                date_field: Change::clear_if_absent(edit.date_field),
                opinion: Change::clear_if_absent(edit.opinion),
            },
            (UpdatePolicy::LegacyPerStore, StoreKind::Document) => UserChanges {
                text_field: edit.text_field,
                password: edit.password,
                image: Change::keep_if_absent(edit.image),
                date_field: Change::clear_if_absent(edit.date_field),
                opinion: Change::keep_if_absent(edit.opinion),
            },
        }
    }

    /// Config value naming this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdatePolicy::PreserveAbsent => POLICY_PRESERVE,
            UpdatePolicy::LegacyPerStore => POLICY_LEGACY,
        }
    }
}

impl FromStr for UpdatePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            POLICY_PRESERVE => Ok(UpdatePolicy::PreserveAbsent),
            POLICY_LEGACY => Ok(UpdatePolicy::LegacyPerStore),
            other => Err(DomainError::validation(format!(
                "Unknown update policy '{}', expected '{}' or '{}'",
                other, POLICY_PRESERVE, POLICY_LEGACY
            ))),
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
