use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let counts = state.store.counts();
    Json(json!({
        "status": "ok",
        "users": counts.users,
        "contactMessages": counts.contact_messages,
        "subscribers": counts.subscribers,
    }))
}
