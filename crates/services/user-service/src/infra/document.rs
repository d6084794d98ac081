//! Document database connection.

use mongodb::{error::Error as MongoError, Client, Database};

use common::DocumentStoreConfig;

/// Database used when neither the config nor the URI names one
const DEFAULT_DOCUMENT_DATABASE: &str = "users_db";

/// MongoDB client plus the selected database.
#[derive(Clone)]
pub struct DocumentDatabase {
    client: Client,
    database: Database,
}

impl DocumentDatabase {
    /// Build the client. The driver connects lazily on first use.
    pub async fn connect(config: &DocumentStoreConfig) -> Result<Self, MongoError> {
        let client = Client::with_uri_str(&config.uri).await?;

        let database = match config.database.as_deref() {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DOCUMENT_DATABASE)),
        };
        tracing::info!(database = database.name(), "Document store client ready");

        Ok(Self { client, database })
    }

    /// Selected database handle.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Close pooled connections and end server sessions.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}
