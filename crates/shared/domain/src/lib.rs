//! Domain layer - Core entities, the store selector and the update policy.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod policy;
pub mod store;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use policy::UpdatePolicy;
pub use store::StoreKind;
pub use user::{parse_date, Change, EditUser, NewUser, RecordId, UserChanges, UserRecord};
