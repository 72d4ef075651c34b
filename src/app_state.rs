use std::sync::Arc;

use crate::store::{LedgerStore, MemoryLedgerStore};

/// Shared handler state. The store is the only persistence handle a handler
/// ever sees.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// State over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryLedgerStore::new()))
    }
}
