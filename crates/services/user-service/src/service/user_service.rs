//! User service - Routes each use case to the selected store.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{EditUser, NewUser, StoreKind, UpdatePolicy, UserRecord};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Every operation names the store it runs against. Lookups that miss
/// resolve to `AppError::NotFound` for that store.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a record in the selected store
    async fn create_user(&self, store: StoreKind, user: NewUser) -> AppResult<UserRecord>;

    /// List every record of the selected store
    async fn list_users(&self, store: StoreKind) -> AppResult<Vec<UserRecord>>;

    /// Get record by id
    async fn get_user(&self, store: StoreKind, id: &str) -> AppResult<UserRecord>;

    /// Update a record according to the configured update policy
    async fn update_user(&self, store: StoreKind, id: &str, edit: EditUser)
        -> AppResult<UserRecord>;

    /// Delete record by id
    async fn delete_user(&self, store: StoreKind, id: &str) -> AppResult<()>;

    /// Check store connectivity
    async fn ping(&self, store: StoreKind) -> AppResult<()>;
}

/// Concrete implementation of UserService over one repository per store.
pub struct UserManager {
    relational: Arc<dyn UserRepository>,
    document: Arc<dyn UserRepository>,
    policy: UpdatePolicy,
}

impl UserManager {
    /// Create new user service instance with repositories
    pub fn new(
        relational: Arc<dyn UserRepository>,
        document: Arc<dyn UserRepository>,
        policy: UpdatePolicy,
    ) -> Self {
        Self {
            relational,
            document,
            policy,
        }
    }

    fn repo(&self, store: StoreKind) -> &dyn UserRepository {
        match store {
            StoreKind::Relational => self.relational.as_ref(),
            StoreKind::Document => self.document.as_ref(),
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, store: StoreKind, user: NewUser) -> AppResult<UserRecord> {
        let record = self.repo(store).insert(user).await?;
        tracing::debug!(%store, id = %record.id, "user created");
        Ok(record)
    }

    async fn list_users(&self, store: StoreKind) -> AppResult<Vec<UserRecord>> {
        self.repo(store).find_all().await
    }

    async fn get_user(&self, store: StoreKind, id: &str) -> AppResult<UserRecord> {
        self.repo(store)
            .find_by_id(id)
            .await?
            .ok_or_not_found(store)
    }

    async fn update_user(
        &self,
        store: StoreKind,
        id: &str,
        edit: EditUser,
    ) -> AppResult<UserRecord> {
        let changes = self.policy.changes(store, edit);

        self.repo(store)
            .update(id, changes)
            .await?
            .ok_or_not_found(store)
    }

    async fn delete_user(&self, store: StoreKind, id: &str) -> AppResult<()> {
        if self.repo(store).delete_by_id(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(store))
        }
    }

    async fn ping(&self, store: StoreKind) -> AppResult<()> {
        self.repo(store).ping().await
    }
}
