//! HTTP service for the CBOT requirements assistant.
//!
//! Serves the questionnaire-to-report pipeline from `cbot-core` over a JSON
//! API, keeps generated documents for download, exposes the administrative
//! views and relays chat messages to the assistant webhook.

mod admin;
mod chat;
mod config;
mod error;
mod registry;
mod requirements;
mod state;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub use config::{Config, CONFIG_ENV, PORT_ENV, WEBHOOK_ENV};
pub use error::ApiError;
pub use registry::{Registry, StoredDocument};
pub use state::AppState;

/// Routes of the service, bound to the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/chatbot/message", post(chat::post_message))
        .route("/api/requirements/generate", post(requirements::generate))
        .route("/api/requirements/{id}", get(requirements::download))
        .route("/api/admin/modules", get(admin::list_modules))
        .route("/api/admin/modules/{id}", put(admin::update_module))
        .route("/api/admin/services", get(admin::list_services))
        .route("/api/admin/databases", get(admin::list_databases))
        .route("/api/admin/requirements", get(admin::list_requirements))
        .route(
            "/api/admin/requirements/{id}",
            delete(admin::delete_requirement),
        )
        .with_state(state)
}
