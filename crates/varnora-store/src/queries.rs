use chrono::Utc;
use tracing::debug;

use varnora_types::{ContactMessage, RecordId, Subscriber, User};

use crate::RecordStore;

impl RecordStore {
    // -- Users --

    /// Does not check for an existing username; callers that need uniqueness
    /// look up first and treat a hit as a conflict.
    pub fn create_user(&self, username: &str, password: &str) -> User {
        self.with_tables(|t| {
            let id = t.user_ids.next_id();
            let user = User {
                id,
                username: username.to_string(),
                password: password.to_string(),
            };
            t.users.insert(id, user.clone());
            debug!(id, username, "user created");
            user
        })
    }

    /// Lookup and insert under one lock: returns `None` if the username is
    /// already present, otherwise the newly created user.
    pub fn create_user_unless_taken(&self, username: &str, password: &str) -> Option<User> {
        self.with_tables(|t| {
            if t.users.values().any(|u| u.username == username) {
                debug!(username, "username already taken");
                return None;
            }
            let id = t.user_ids.next_id();
            let user = User {
                id,
                username: username.to_string(),
                password: password.to_string(),
            };
            t.users.insert(id, user.clone());
            debug!(id, username, "user created");
            Some(user)
        })
    }

    pub fn get_user_by_id(&self, id: RecordId) -> Option<User> {
        self.with_tables(|t| t.users.get(&id).cloned())
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.with_tables(|t| t.users.values().find(|u| u.username == username).cloned())
    }

    // -- Contact messages --

    pub fn save_contact_message(
        &self,
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: &str,
    ) -> ContactMessage {
        self.with_tables(|t| {
            let id = t.message_ids.next_id();
            let record = ContactMessage {
                id,
                name: name.to_string(),
                email: email.to_string(),
                subject: subject.map(str::to_string),
                message: message.to_string(),
                created_at: Utc::now(),
            };
            t.contact_messages.insert(id, record.clone());
            debug!(id, email, "contact message saved");
            record
        })
    }

    /// All messages in insertion order, as of this call.
    pub fn get_contact_messages(&self) -> Vec<ContactMessage> {
        self.with_tables(|t| t.contact_messages.values().cloned().collect())
    }

    // -- Subscribers --

    /// Idempotent by email: a repeat signup returns the existing record
    /// untouched instead of creating a duplicate or reporting a conflict.
    pub fn add_subscriber(&self, email: &str) -> Subscriber {
        self.with_tables(|t| {
            if let Some(existing) = t.subscribers.values().find(|s| s.email == email) {
                debug!(id = existing.id, email, "subscriber already present");
                return existing.clone();
            }

            let id = t.subscriber_ids.next_id();
            let subscriber = Subscriber {
                id,
                email: email.to_string(),
                active: true,
                subscribed_at: Utc::now(),
            };
            t.subscribers.insert(id, subscriber.clone());
            debug!(id, email, "subscriber added");
            subscriber
        })
    }

    pub fn get_subscriber_by_email(&self, email: &str) -> Option<Subscriber> {
        self.with_tables(|t| t.subscribers.values().find(|s| s.email == email).cloned())
    }

    /// All subscribers in insertion order, as of this call.
    pub fn get_subscribers(&self) -> Vec<Subscriber> {
        self.with_tables(|t| t.subscribers.values().cloned().collect())
    }
}
