//! Repository layer for data access.

mod document;
pub mod entities;
mod relational;
mod user_repository;

pub use document::DocumentUserStore;
pub use relational::RelationalUserStore;
pub use user_repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
