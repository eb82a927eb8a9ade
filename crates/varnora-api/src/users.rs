use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use rand_core::OsRng;

use varnora_types::RecordId;
use varnora_types::api::{RegisterRequest, UserResponse};

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::validate;

/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = body?;
    validate::register(&req)?;

    // Skip the hash for an obvious conflict; the insert below re-checks.
    if state.store.get_user_by_username(&req.username).is_some() {
        return Err(taken());
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))?
        .to_string();

    let user = state
        .store
        .create_user_unless_taken(&req.username, &password_hash)
        .ok_or_else(taken)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

fn taken() -> ApiError {
    ApiError::Conflict("Username is already taken".into())
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Path(id) = id?;
    state
        .store
        .get_user_by_id(id)
        .map(|user| Json(user.into()))
        .ok_or_else(|| ApiError::NotFound(format!("User {id} not found")))
}
