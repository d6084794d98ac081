//! Process-wide store connections.

use std::sync::Arc;

use common::AppResult;
use domain::UpdatePolicy;

use super::{Database, DocumentDatabase};
use crate::config::UserServiceConfig;
use crate::repository::{DocumentUserStore, RelationalUserStore};
use crate::service::{UserManager, UserService};

/// Both store connections, opened once at startup.
#[derive(Clone)]
pub struct Stores {
    relational: Database,
    document: DocumentDatabase,
}

impl Stores {
    /// Connect to both stores.
    pub async fn connect(config: &UserServiceConfig) -> AppResult<Self> {
        let relational = Database::connect(&config.mysql).await?;
        let document = DocumentDatabase::connect(&config.mongodb).await?;

        Ok(Self {
            relational,
            document,
        })
    }

    /// User service backed by both stores.
    pub fn user_service(&self, policy: UpdatePolicy) -> Arc<dyn UserService> {
        let relational = Arc::new(RelationalUserStore::new(self.relational.get_connection()));
        let document = Arc::new(DocumentUserStore::new(self.document.database()));

        Arc::new(UserManager::new(relational, document, policy))
    }

    /// Close both connections. Call after the server has drained.
    pub async fn shutdown(self) -> AppResult<()> {
        self.document.shutdown().await;
        self.relational.close().await?;
        tracing::info!("Store connections closed");
        Ok(())
    }
}
