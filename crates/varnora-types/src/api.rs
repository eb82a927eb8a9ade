use serde::{Deserialize, Serialize};

use crate::models::{ContactMessage, RecordId, Subscriber, User};

// -- Contact --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    /// Missing and `null` both land here as `None`; `""` stays `Some("")`.
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub data: ContactMessage,
    pub email_sent: bool,
}

/// Returned with 502 when the message was stored but the email relay failed.
#[derive(Debug, Serialize)]
pub struct ContactRelayFailure {
    pub message: String,
    pub data: ContactMessage,
}

// -- Newsletter --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub data: Subscriber,
}

// -- Users --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: RecordId,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_subject_is_tri_state() {
        let missing: ContactRequest = serde_json::from_str(
            r#"{"name":"Jo","email":"jo@x.com","message":"Hi there!!"}"#,
        )
        .unwrap();
        assert_eq!(missing.subject, None);

        let null: ContactRequest = serde_json::from_str(
            r#"{"name":"Jo","email":"jo@x.com","subject":null,"message":"Hi there!!"}"#,
        )
        .unwrap();
        assert_eq!(null.subject, None);

        let empty: ContactRequest = serde_json::from_str(
            r#"{"name":"Jo","email":"jo@x.com","subject":"","message":"Hi there!!"}"#,
        )
        .unwrap();
        assert_eq!(empty.subject.as_deref(), Some(""));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res = serde_json::from_str::<SubscribeRequest>(r#"{"email":"a@x.com","id":7}"#);
        assert!(res.is_err());
    }

    #[test]
    fn user_response_drops_password() {
        let user = User {
            id: 3,
            username: "studio".into(),
            password: "$argon2id$opaque".into(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "username": "studio" }));
    }
}
