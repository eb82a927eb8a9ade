use std::sync::LazyLock;

use regex::Regex;

use varnora_types::api::{ContactRequest, RegisterRequest};

use crate::error::{ApiError, ApiResult};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const MAX_EMAIL_LEN: usize = 254;
const NAME_LEN: (usize, usize) = (2, 100);
const MAX_SUBJECT_LEN: usize = 200;
const MESSAGE_LEN: (usize, usize) = (10, 5000);
const USERNAME_LEN: (usize, usize) = (3, 32);
const MIN_PASSWORD_LEN: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LEN && EMAIL_RE.is_match(email)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_len(field: &str, value: &str, (min, max): (usize, usize)) -> ApiResult<()> {
    let len = char_len(value.trim());
    if len < min {
        return Err(ApiError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn email(email: &str) -> ApiResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::Validation("Please enter a valid email address".into()))
    }
}

pub fn contact(req: &ContactRequest) -> ApiResult<()> {
    check_len("name", &req.name, NAME_LEN)?;
    email(req.email.trim())?;
    // An empty subject is allowed and kept as-is; only the upper bound applies.
    if let Some(subject) = &req.subject {
        if char_len(subject) > MAX_SUBJECT_LEN {
            return Err(ApiError::Validation(format!(
                "subject must be at most {MAX_SUBJECT_LEN} characters"
            )));
        }
    }
    check_len("message", &req.message, MESSAGE_LEN)
}

pub fn register(req: &RegisterRequest) -> ApiResult<()> {
    let len = char_len(&req.username);
    if len < USERNAME_LEN.0 || len > USERNAME_LEN.1 {
        return Err(ApiError::Validation(format!(
            "username must be {}-{} characters",
            USERNAME_LEN.0, USERNAME_LEN.1
        )));
    }
    if char_len(&req.password) < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
