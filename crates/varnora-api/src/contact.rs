use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use varnora_types::api::{ContactRelayFailure, ContactRequest, ContactResponse};

use crate::AppState;
use crate::error::ApiResult;
use crate::validate;

/// POST /api/contact: stores the message, then hands it to the notifier.
///
/// The store write is final once it succeeds. If the email relay fails the
/// caller gets 502 along with the stored record, so it can tell "we have
/// your message" apart from "nobody was emailed".
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body?;
    validate::contact(&req)?;

    let record = state.store.save_contact_message(
        req.name.trim(),
        req.email.trim(),
        req.subject.as_deref(),
        &req.message,
    );
    info!(id = record.id, "Contact message stored");

    match state.notifier.notify(&record).await {
        Ok(()) => Ok((
            StatusCode::CREATED,
            Json(ContactResponse {
                success: true,
                data: record,
                email_sent: true,
            }),
        )
            .into_response()),
        Err(e) => {
            error!(id = record.id, error = %e, "Failed to relay contact message");
            Ok((
                StatusCode::BAD_GATEWAY,
                Json(ContactRelayFailure {
                    message: "Email sending failed.".into(),
                    data: record,
                }),
            )
                .into_response())
        }
    }
}
