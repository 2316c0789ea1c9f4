//! Storage change watcher
//!
//! Bridges the session storage's event channel to the ability store: one
//! event on the watched key yields exactly one recompilation. The
//! subscription runs as a cancellable background task and is released when
//! the watcher is shut down or dropped, so a finished session stops
//! reacting to storage noise.

use crate::session::{SessionStorage, StorageEvent};
use crate::store::AbilityStore;
use tokio::sync::broadcast;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Background subscription that keeps an [`AbilityStore`] in step with one
/// storage key.
#[derive(Debug)]
pub struct AbilityWatcher {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl AbilityWatcher {
    /// Subscribe `store` to changes of `key` in `storage`.
    ///
    /// Events for unrelated keys are ignored. Must be called from within a
    /// tokio runtime.
    pub fn spawn(storage: &SessionStorage, store: AbilityStore, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut events = storage.subscribe();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    event = events.recv() => match event {
                        Ok(StorageEvent { key: changed, value }) if changed == key => {
                            store.update(value.as_deref());
                        }
                        Ok(StorageEvent { key: changed, .. }) => {
                            tracing::debug!(key = %changed, "ignoring storage event for unrelated key");
                        }
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            // Each event carries the full payload, so only
                            // the latest one matters; resync from storage
                            // is not required.
                            tracing::warn!(missed, "storage events lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stop reacting to storage changes.
    ///
    /// Idempotent; the store keeps its last published rule set.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for AbilityWatcher {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        self.handle.abort();
    }
}
