use std::sync::Arc;

use evcal_core::config::StoreConfig;
use evcal_core::{EventStore, Snapshot};
use tokio::sync::{Mutex, MutexGuard};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // Every check-then-mutate sequence runs under this one lock, so two
    // concurrent adds can't both pass the overlap check.
    store: Arc<Mutex<EventStore>>,
}

impl AppState {
    pub fn new(config: StoreConfig) -> Self {
        AppState {
            store: Arc::new(Mutex::new(EventStore::with_seed(config))),
        }
    }

    /// Exclusive access to the store for the lifetime of the guard.
    pub async fn store(&self) -> MutexGuard<'_, EventStore> {
        self.store.lock().await
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.store.lock().await.list_events()
    }
}
