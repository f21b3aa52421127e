//! Application state shared across handlers.

use std::sync::Arc;

use oxcart_store::Store;
use oxcart_store::events::QueueSink;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the store and the
/// notification queue producer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Store,
    events: QueueSink,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Store, events: QueueSink) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, events }),
        }
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the notification queue producer.
    #[must_use]
    pub fn events(&self) -> &QueueSink {
        &self.inner.events
    }
}
