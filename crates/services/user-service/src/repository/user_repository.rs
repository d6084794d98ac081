//! Storage adapter contract shared by both stores.

use async_trait::async_trait;

use common::AppResult;
use domain::{NewUser, UserChanges, UserRecord};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Identifiers arrive as the raw path segment. An identifier that cannot be
/// parsed into the store's key type never matches a record, so lookups return
/// `None` and deletes return `false` instead of an error.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a record and return it with its generated id
    async fn insert(&self, user: NewUser) -> AppResult<UserRecord>;

    /// All records in the store's natural order
    async fn find_all(&self) -> AppResult<Vec<UserRecord>>;

    /// Find a record by id
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>>;

    /// Apply a change set; `None` if the record does not exist
    async fn update(&self, id: &str, changes: UserChanges) -> AppResult<Option<UserRecord>>;

    /// Delete a record; `false` if nothing was deleted
    async fn delete_by_id(&self, id: &str) -> AppResult<bool>;

    /// Check connectivity
    async fn ping(&self) -> AppResult<()>;
}
