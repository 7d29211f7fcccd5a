//! HTTP API for the clinic backend.
//!
//! Wraps the `clinic-core` use cases in axum handlers. A single SQLite
//! connection is shared behind a mutex; each handler holds the lock for the
//! duration of one use case.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use clinic_core::{Database, DbError};

pub use config::{ApiConfig, ConfigError, CorsOrigins};
pub use error::{ApiError, ApiResult};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Lock the store for one operation.
    pub fn db(&self) -> ApiResult<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }
}

/// Open the store named by the configuration and ensure its schema.
pub fn open_database(config: &ApiConfig) -> Result<Database, DbError> {
    if config.uses_in_memory_database() {
        Database::open_in_memory()
    } else {
        Database::open(&config.database_path)
    }
}

pub fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(list.clone()))
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

/// Build the full application router.
pub fn router(state: AppState, origins: &CorsOrigins) -> Router {
    routes::routes()
        .layer(cors_layer(origins))
        .with_state(state)
}
