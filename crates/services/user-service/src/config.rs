//! User service configuration.

use std::env;

use common::{DatabaseConfig, DocumentStoreConfig};
use domain::UpdatePolicy;

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Relational store (MySQL)
    pub mysql: DatabaseConfig,
    /// Document store (MongoDB)
    pub mongodb: DocumentStoreConfig,
    /// Treatment of fields missing from an update
    pub update_policy: UpdatePolicy,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            mysql: DatabaseConfig {
                url: env::var("MYSQL_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.mysql.url),
                max_connections: env::var("MYSQL_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.mysql.max_connections),
                min_connections: env::var("MYSQL_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.mysql.min_connections),
            },
            mongodb: DocumentStoreConfig {
                uri: env::var("MONGODB_URI").unwrap_or(defaults.mongodb.uri),
                database: env::var("MONGODB_DATABASE").ok().filter(|v| !v.is_empty()),
            },
            update_policy: env::var("UPDATE_POLICY")
                .ok()
                .map(|raw| {
                    raw.parse().unwrap_or_else(|e| {
                        tracing::warn!("{}; using '{}'", e, defaults.update_policy);
                        defaults.update_policy
                    })
                })
                .unwrap_or(defaults.update_policy),
        }
    }
}
