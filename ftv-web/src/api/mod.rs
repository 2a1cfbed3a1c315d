//! HTTP API handlers for ftv-web

pub mod auth;
pub mod document;
pub mod export;
pub mod health;
pub mod session;
pub mod stats;
pub mod verify;
pub mod workers;

pub use auth::session_middleware;
pub use document::document_redirect;
pub use export::{export_progress, export_workers};
pub use health::health_routes;
pub use session::open_session;
pub use stats::{get_progress, get_stats};
pub use verify::{list_factories, verify_worker};
pub use workers::{list_departments, list_workers};
