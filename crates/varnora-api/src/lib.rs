pub mod contact;
pub mod error;
pub mod health;
pub mod notifier;
pub mod subscribe;
pub mod users;
pub mod validate;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use varnora_store::RecordStore;

use crate::notifier::Notifier;

/// Form payloads are small; anything larger is not a real submission.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: RecordStore,
    pub notifier: Arc<dyn Notifier>,
}

impl AppStateInner {
    pub fn new(store: RecordStore, notifier: Arc<dyn Notifier>) -> AppState {
        Arc::new(Self { store, notifier })
    }
}

/// API routes plus `/health`. Static file serving, CORS and tracing layers
/// are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/contact", post(contact::submit_contact))
        .route("/api/subscribe", post(subscribe::subscribe))
        .route("/api/users", post(users::register))
        .route("/api/users/{id}", get(users::get_user))
        .route("/health", get(health::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
