pub mod api;
pub mod models;

pub use models::{ContactMessage, RecordId, Subscriber, User};
