//! ftv-web library - Worker verification portal service
//!
//! One axum service carries both surfaces of the portal: the public
//! verification API (factory selector, NIK/KTP verification, reference
//! document) and the passkey-gated dashboard API (stats, progress chart,
//! filtered listing, export row sets). Both derive from the worker
//! collection loaded once at startup.

use std::sync::Arc;

use axum::Router;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use ftv_common::config::ServerConfig;
use ftv_common::model::WorkerRecord;
use ftv_common::session::SessionGate;
use ftv_common::store::WorkerStore;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// In-memory worker collection; confined to this process, patched only
    /// after a confirmed remote update
    pub records: Arc<RwLock<Vec<WorkerRecord>>>,
    /// Remote table client
    pub store: Arc<WorkerStore>,
    /// Dashboard session gate
    pub gate: Arc<SessionGate>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state from a loaded collection
    pub fn new(records: Vec<WorkerRecord>, store: WorkerStore, config: ServerConfig) -> Self {
        let gate = SessionGate::new(config.passkey.clone(), config.session_ttl());
        Self {
            records: Arc::new(RwLock::new(records)),
            store: Arc::new(store),
            gate: Arc::new(gate),
            config: Arc::new(config),
        }
    }
}

/// Build application router
///
/// Dashboard routes sit behind the session-token middleware; the portal
/// routes and the health endpoint are public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require a dashboard session token)
    let protected = Router::new()
        .route("/api/stats", get(api::get_stats))
        .route("/api/progress", get(api::get_progress))
        .route("/api/workers", get(api::list_workers))
        .route("/api/departments", get(api::list_departments))
        .route("/api/export/workers", get(api::export_workers))
        .route("/api/export/progress", get(api::export_progress))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::session_middleware,
        ));

    // Public routes (no session)
    let public = Router::new()
        .route("/api/factories", get(api::list_factories))
        .route("/api/verify", post(api::verify_worker))
        .route("/api/session", post(api::open_session))
        .route("/api/document", get(api::document_redirect))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
