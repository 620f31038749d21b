//! Snapshot storage: a flat string key-value interface the session writes to.
//!
//! The worker cannot reach `localStorage` itself. `BridgeStore` keeps an
//! in-memory mirror and queues every write as a [`StorageOp`]; the route
//! layer drains the queue and ships the ops to the main thread as a
//! `<script>` appended to the response fragment.

use std::collections::HashMap;

/// Flat key-value storage for serialized snapshots.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: String);
    fn delete(&mut self, key: &str);
}

/// Plain in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// A write that still has to be applied to the page's localStorage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Put { key: String, value: String },
    Delete { key: String },
}

/// Mirror of the page's localStorage plus an outbox of pending writes.
#[derive(Debug, Clone, Default)]
pub struct BridgeStore {
    mirror: MemoryStore,
    pending: Vec<StorageOp>,
}

impl BridgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a value the page already holds. Queues nothing.
    pub fn seed(&mut self, key: &str, value: String) {
        self.mirror.put(key, value);
    }

    /// Take all queued writes, oldest first.
    pub fn drain(&mut self) -> Vec<StorageOp> {
        std::mem::take(&mut self.pending)
    }

    #[cfg(test)]
    pub fn pending(&self) -> &[StorageOp] {
        &self.pending
    }
}

impl SnapshotStore for BridgeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.mirror.get(key)
    }

    fn put(&mut self, key: &str, value: String) {
        self.mirror.put(key, value.clone());
        // Only the latest full snapshot for a key matters.
        self.pending.retain(|op| !matches!(op, StorageOp::Put { key: k, .. } if k == key));
        self.pending.push(StorageOp::Put {
            key: key.to_string(),
            value,
        });
    }

    fn delete(&mut self, key: &str) {
        self.mirror.delete(key);
        self.pending.retain(|op| !matches!(op, StorageOp::Put { key: k, .. } if k == key));
        self.pending.push(StorageOp::Delete {
            key: key.to_string(),
        });
    }
}
