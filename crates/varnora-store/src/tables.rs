use std::collections::BTreeMap;

use varnora_types::{ContactMessage, RecordId, Subscriber, User};

/// Per-kind id sequence. Ids start at 1 and are never reused.
#[derive(Debug)]
pub(crate) struct Sequence {
    next: RecordId,
}

impl Sequence {
    pub(crate) fn next_id(&mut self) -> RecordId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

/// Raw collections behind the store lock. Keys are assigned in increasing
/// order, so iterating a map yields records in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<RecordId, User>,
    pub(crate) contact_messages: BTreeMap<RecordId, ContactMessage>,
    pub(crate) subscribers: BTreeMap<RecordId, Subscriber>,

    pub(crate) user_ids: Sequence,
    pub(crate) message_ids: Sequence,
    pub(crate) subscriber_ids: Sequence,
}
