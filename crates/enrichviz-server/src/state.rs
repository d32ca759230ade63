//! Application state with shared `EnrichmentService` for concurrent access.
//!
//! [`AppState`] wraps the service in `Arc<tokio::sync::Mutex<>>` for use with
//! axum handlers. The service holds a `rusqlite::Connection`, which is
//! `!Sync`, so it sits behind a `Mutex` rather than an `RwLock`. The view
//! registry and the request engine live outside the lock.

use std::sync::Arc;

use crate::error::ApiError;
use crate::request_engine::HttpRequestEngine;
use crate::service::EnrichmentService;
use crate::views::ViewRegistry;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The shared enrichment service (async Mutex, awaited without blocking).
    pub service: Arc<tokio::sync::Mutex<EnrichmentService>>,
    /// Client for the remote enrichment service.
    pub engine: Arc<HttpRequestEngine>,
    /// Render views, readable without the service lock.
    pub views: Arc<ViewRegistry>,
}

impl AppState {
    /// Creates a new `AppState` backed by the SQLite database at `db_path`,
    /// querying the enrichment service at `service_url`.
    pub fn new(db_path: &str, service_url: &str) -> Result<Self, ApiError> {
        let views = Arc::new(ViewRegistry::new());
        let service = EnrichmentService::new(db_path, Arc::clone(&views))?;
        Ok(Self::assemble(service, service_url, views))
    }

    /// Creates a new `AppState` with an in-memory database (for testing).
    pub fn in_memory(service_url: &str) -> Result<Self, ApiError> {
        let views = Arc::new(ViewRegistry::new());
        let service = EnrichmentService::in_memory(Arc::clone(&views))?;
        Ok(Self::assemble(service, service_url, views))
    }

    fn assemble(service: EnrichmentService, service_url: &str, views: Arc<ViewRegistry>) -> Self {
        AppState {
            service: Arc::new(tokio::sync::Mutex::new(service)),
            engine: Arc::new(HttpRequestEngine::new(service_url)),
            views,
        }
    }
}
