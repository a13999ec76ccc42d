//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from an established database connection.
    ///
    /// Wires the concrete repository and service implementations; this is
    /// the composition used by the `serve` command.
    pub fn from_database(database: Arc<Database>) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        let user_service = Arc::new(UserManager::new(repo));

        Self {
            user_service,
            database,
        }
    }

    /// Create application state with a manually injected service.
    ///
    /// Used by tests to substitute mock implementations.
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<Database>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
