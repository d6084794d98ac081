//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::UserService;

use crate::uploads::FileIntake;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub uploads: Arc<FileIntake>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserService>, uploads: FileIntake) -> Self {
        Self {
            users,
            uploads: Arc::new(uploads),
        }
    }
}
