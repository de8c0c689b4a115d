mod connection;
pub use connection::Connection;

mod fault;
pub use fault::Fault;
use fault::Faults;

mod store;
use store::Store;

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};
use vellum_core::{driver, Result};

/// In-process driver. Every connection shares the same tables.
///
/// A connection holds the store lock for the whole lifetime of a
/// transaction, so transactions are serialized. Nested transactions and
/// rollbacks are implemented with snapshots of the store.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    store: Arc<tokio::sync::Mutex<Store>>,
    faults: Arc<Mutex<Faults>>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Makes matching statements fail until the fault is used up.
    pub fn inject_fault(&self, fault: Fault) {
        tracing::debug!(?fault, "injecting fault");
        self.faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(fault);
    }

    pub fn clear_faults(&self) {
        self.faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Number of rows in every table, keyed by table name. Waits for any
    /// open transaction to finish.
    pub async fn row_counts(&self) -> BTreeMap<String, usize> {
        self.store.lock().await.row_counts()
    }
}

#[vellum_core::async_trait]
impl vellum_core::Driver for Memory {
    async fn connect(&self) -> Result<Box<dyn driver::Connection>> {
        Ok(Box::new(Connection::new(
            self.store.clone(),
            self.faults.clone(),
        )))
    }
}
