//! Session-scoped key/value storage with change notification
//!
//! Stands in for the external persistence collaborator at its interface
//! boundary: string payloads under string keys, and a broadcast of every
//! mutation so other parts of the session can react to data changing out
//! from under them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// One storage mutation, as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that changed
    pub key: String,

    /// The new raw value, or `None` when the key was cleared
    pub value: Option<String>,
}

/// In-process session storage.
///
/// Cheap to clone; clones share entries and the event channel. Events are
/// discrete per mutation - subscribers that fall behind the channel capacity
/// lose the oldest events, which for permission payloads is safe because
/// each event carries the full new value.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
    events: broadcast::Sender<StorageEvent>,
}

impl SessionStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        let (events, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            events,
        }
    }

    /// Read the current value under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Store `value` under `key` and notify subscribers.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.clone(), value.clone());
        }
        let _ = self.events.send(StorageEvent {
            key,
            value: Some(value),
        });
    }

    /// Clear `key` and notify subscribers with an absent value.
    pub fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
        let _ = self.events.send(StorageEvent {
            key: key.to_string(),
            value: None,
        });
    }

    /// Subscribe to mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}

impl Default for SessionStorage {
    fn default() -> Self {
        Self::new()
    }
}
