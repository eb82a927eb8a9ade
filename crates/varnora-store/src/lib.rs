mod queries;
mod tables;

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::tables::Tables;

/// In-process record store for users, contact messages and newsletter
/// subscribers. Nothing is persisted; the store lives as long as the value.
///
/// Every operation takes the single table lock for its whole duration, so
/// id assignment and the lookup-then-insert in `add_subscriber` cannot
/// interleave with another request.
///
/// The tables are only reachable through the operations below; callers
/// cannot rewrite records or rewind an id sequence.
///
/// ```compile_fail
/// let store = varnora_store::RecordStore::new();
/// store.with_tables(|_| ());
/// ```
pub struct RecordStore {
    tables: Mutex<Tables>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    pub users: usize,
    pub contact_messages: usize,
    pub subscribers: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        info!("Record store initialized (in-memory, non-persistent)");
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }

    pub(crate) fn with_tables<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Tables) -> T,
    {
        // Tables are append-only and each insert is a single map write, so a
        // panic in another holder cannot leave a partial record behind.
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut tables)
    }

    pub fn counts(&self) -> StoreCounts {
        self.with_tables(|t| StoreCounts {
            users: t.users.len(),
            contact_messages: t.contact_messages.len(),
            subscribers: t.subscribers.len(),
        })
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
