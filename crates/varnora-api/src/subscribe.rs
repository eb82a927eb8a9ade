use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use varnora_types::api::{SubscribeRequest, SubscribeResponse};

use crate::AppState;
use crate::error::ApiResult;
use crate::validate;

/// POST /api/subscribe. Idempotent: a repeat signup returns the existing record.
pub async fn subscribe(
    State(state): State<AppState>,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> ApiResult<Json<SubscribeResponse>> {
    let Json(req) = body?;
    let email = req.email.trim();
    validate::email(email)?;

    let subscriber = state.store.add_subscriber(email);

    Ok(Json(SubscribeResponse {
        success: true,
        data: subscriber,
    }))
}
