//! File intake for the optional image part of user forms.
//!
//! Files are written to a single flat directory. Nothing is ever removed:
//! replacing or deleting a user leaves the previous file behind.

mod clock;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use axum::body::Bytes;
use uuid::Uuid;

use common::{AppError, AppResult};

pub use clock::{Clock, FixedClock, SystemClock};

/// Stored filename scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadNaming {
    /// `{millis}-{uuid}{ext}`
    #[default]
    Unique,
    /// `{millis}{ext}`; two uploads in the same millisecond share a name and
    /// the later write wins.
    Timestamp,
}

impl UploadNaming {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadNaming::Unique => "unique",
            UploadNaming::Timestamp => "timestamp",
        }
    }
}

impl FromStr for UploadNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unique" => Ok(UploadNaming::Unique),
            "timestamp" => Ok(UploadNaming::Timestamp),
            other => Err(format!(
                "Unknown upload naming '{}', expected 'unique' or 'timestamp'",
                other
            )),
        }
    }
}

impl fmt::Display for UploadNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File part received with a form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-side filename, used only for its extension
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// Writes uploaded files to the upload directory.
#[derive(Debug, Clone)]
pub struct FileIntake {
    dir: PathBuf,
    naming: UploadNaming,
    clock: Arc<dyn Clock>,
}

impl FileIntake {
    /// Intake using the system clock.
    pub fn new(dir: impl Into<PathBuf>, naming: UploadNaming) -> Self {
        Self::with_clock(dir, naming, Arc::new(SystemClock))
    }

    pub fn with_clock(dir: impl Into<PathBuf>, naming: UploadNaming, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            naming,
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Name under which a file with the given client name would be stored.
    pub fn stored_name(&self, file_name: Option<&str>) -> String {
        let ext = file_name
            .and_then(|name| Path::new(name).extension())
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let millis = self.clock.now_millis();

        match self.naming {
            UploadNaming::Unique => format!("{}-{}{}", millis, Uuid::new_v4().simple(), ext),
            UploadNaming::Timestamp => format!("{}{}", millis, ext),
        }
    }

    /// Write the file and return its stored name.
    pub async fn persist(&self, file: UploadedFile) -> AppResult<String> {
        let name = self.stored_name(file.file_name.as_deref());

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::internal(format!(
                "Cannot create upload directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        tokio::fs::write(self.dir.join(&name), &file.bytes)
            .await
            .map_err(|e| AppError::internal(format!("Cannot write upload {}: {}", name, e)))?;

        tracing::info!(file = %name, bytes = file.bytes.len(), "Upload stored");
        Ok(name)
    }
}
