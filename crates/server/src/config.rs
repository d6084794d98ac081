//! Server configuration.

use std::env;
use std::path::PathBuf;

use crate::uploads::UploadNaming;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Static assets served for unmatched paths
    pub public_dir: PathBuf,
    /// Where uploaded files are written and served from
    pub uploads_dir: PathBuf,
    /// Stored filename scheme
    pub upload_naming: UploadNaming,
    /// Request body cap in bytes; `None` disables the limit
    pub body_limit: Option<usize>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            uploads_dir: env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.uploads_dir),
            upload_naming: env::var("UPLOAD_NAMING")
                .ok()
                .map(|raw| {
                    raw.parse().unwrap_or_else(|e| {
                        tracing::warn!("{}; using '{}'", e, defaults.upload_naming);
                        defaults.upload_naming
                    })
                })
                .unwrap_or(defaults.upload_naming),
            body_limit: env::var("UPLOAD_BODY_LIMIT_BYTES")
                .ok()
                .and_then(|b| b.parse().ok()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            public_dir: PathBuf::from("public"),
            uploads_dir: PathBuf::from("uploads"),
            upload_naming: UploadNaming::default(),
            body_limit: None,
        }
    }
}
