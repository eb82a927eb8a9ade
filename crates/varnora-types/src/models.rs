use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier. Each record kind has its own sequence starting at 1.
pub type RecordId = u64;

/// An account record. `password` is opaque to the store; the API layer
/// hands it an Argon2 hash and never serializes it back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub password: String,
}

/// A submission from the site's contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    /// `None` when the sender omitted the field. Serializes as `null`,
    /// which is not the same thing as an empty subject.
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A newsletter subscription, unique by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: RecordId,
    pub email: String,
    pub active: bool,
    pub subscribed_at: DateTime<Utc>,
}
