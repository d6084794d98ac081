//! Shared test harness: the real router over in-memory repositories.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use common::{AppError, AppResult};
use domain::{NewUser, RecordId, StoreKind, UpdatePolicy, UserChanges, UserRecord};
use server_lib::config::ServerConfig;
use server_lib::routes::create_router;
use server_lib::state::AppState;
use server_lib::uploads::{FileIntake, FixedClock, UploadNaming};
use user_service_lib::{UserManager, UserRepository};

// =============================================================================
// In-memory repository
// =============================================================================

/// Repository keeping records in insertion order, with ids shaped like the
/// real store's (integers for MySQL, 24-char hex for MongoDB).
pub struct InMemoryRepository {
    store: StoreKind,
    rows: Mutex<Vec<UserRecord>>,
    next_id: AtomicI64,
    failing: bool,
}

impl InMemoryRepository {
    pub fn new(store: StoreKind) -> Self {
        Self {
            store,
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            failing: false,
        }
    }

    /// Repository whose every call fails like a lost connection
    pub fn failing(store: StoreKind) -> Self {
        Self {
            failing: true,
            ..Self::new(store)
        }
    }

    fn check(&self) -> AppResult<()> {
        if self.failing {
            Err(AppError::store(self.store, "connection refused"))
        } else {
            Ok(())
        }
    }

    fn next_id(&self) -> RecordId {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        match self.store {
            StoreKind::Relational => RecordId::Int(n),
            StoreKind::Document => RecordId::Object(format!("{:024x}", n)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert(&self, user: NewUser) -> AppResult<UserRecord> {
        self.check()?;
        let record = UserRecord {
            id: self.next_id(),
            text_field: user.text_field,
            password: user.password,
            image: user.image,
            date_field: user.date_field,
            opinion: user.opinion,
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> AppResult<Vec<UserRecord>> {
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id.to_string() == id).cloned())
    }

    async fn update(&self, id: &str, changes: UserChanges) -> AppResult<Option<UserRecord>> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(record) = rows.iter_mut().find(|r| r.id.to_string() == id) else {
            return Ok(None);
        };
        changes.apply_to(record);
        Ok(Some(record.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id.to_string() != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}

// =============================================================================
// Test application
// =============================================================================

/// Router plus the directories it serves from.
pub struct TestApp {
    pub router: Router,
    pub uploads: TempDir,
    pub public: TempDir,
}

pub struct TestAppBuilder {
    relational: InMemoryRepository,
    document: InMemoryRepository,
    policy: UpdatePolicy,
    naming: UploadNaming,
    clock: Option<i64>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            relational: InMemoryRepository::new(StoreKind::Relational),
            document: InMemoryRepository::new(StoreKind::Document),
            policy: UpdatePolicy::default(),
            naming: UploadNaming::default(),
            clock: None,
        }
    }

    pub fn policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn relational(mut self, repo: InMemoryRepository) -> Self {
        self.relational = repo;
        self
    }

    pub fn document(mut self, repo: InMemoryRepository) -> Self {
        self.document = repo;
        self
    }

    pub fn naming(mut self, naming: UploadNaming, fixed_millis: i64) -> Self {
        self.naming = naming;
        self.clock = Some(fixed_millis);
        self
    }

    pub fn build(self) -> TestApp {
        let uploads = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        std::fs::write(public.path().join("index.html"), "<h1>Registro</h1>").unwrap();

        let intake = match self.clock {
            Some(millis) => {
                FileIntake::with_clock(uploads.path(), self.naming, Arc::new(FixedClock(millis)))
            }
            None => FileIntake::new(uploads.path(), self.naming),
        };

        let users = Arc::new(UserManager::new(
            Arc::new(self.relational),
            Arc::new(self.document),
            self.policy,
        ));

        let config = ServerConfig {
            public_dir: public.path().to_path_buf(),
            uploads_dir: uploads.path().to_path_buf(),
            ..ServerConfig::default()
        };

        let router = create_router(AppState::new(users, intake), &config);

        TestApp {
            router,
            uploads,
            public,
        }
    }
}

pub fn app() -> TestApp {
    TestAppBuilder::new().build()
}

// =============================================================================
// Requests
// =============================================================================

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

const BOUNDARY: &str = "----registro-boundary";

/// Multipart part: text field or file
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Send a request and decode the JSON body (`Null` when empty).
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, request).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn send_raw(app: &TestApp, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// Files currently in the upload directory.
pub fn uploaded_files(app: &TestApp) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(app.uploads.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
