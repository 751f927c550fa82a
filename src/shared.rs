//! Shared Store handle
//!
//! `Store` itself is single-threaded. `SharedStore` wraps it for callers
//! that hand one configuration to several threads.
//!
//! ## Concurrency:
//! - `read`: shared lock, many concurrent readers
//! - `write`: exclusive lock, one writer at a time
//! - Closures run with the lock held; keep them short and never re-enter

use std::sync::Arc;

use parking_lot::RwLock;

use crate::store::Store;

/// Cloneable, lock-protected handle to a `Store`
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` with shared access
    pub fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access
    pub fn write<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        f(&mut self.inner.write())
    }

    /// Clone the current state out of the lock
    pub fn snapshot(&self) -> Store {
        self.inner.read().clone()
    }
}

impl From<Store> for SharedStore {
    fn from(store: Store) -> Self {
        Self::new(store)
    }
}
