//! Cursor over a store's variables
//!
//! Walks a snapshot of the key set taken at creation and looks each value up
//! as it goes. `remove_current` deletes the entry last returned by `next`.
//!
//! ```
//! use gitcfg::Store;
//!
//! let mut store = Store::new();
//! store.set("core.editor", "vim").unwrap();
//! store.set("core.pager", "less").unwrap();
//!
//! let mut cursor = store.cursor();
//! while let Some((key, _)) = cursor.next() {
//!     if key == "core.pager" {
//!         cursor.remove_current().unwrap();
//!     }
//! }
//! assert_eq!(store.get("core.pager").unwrap(), "");
//! ```

use std::collections::btree_set;

use crate::error::{ConfigError, Result};
use crate::store::Store;

/// Single-pass cursor with delete-current support
pub struct Cursor<'a> {
    store: &'a mut Store,
    keys: btree_set::IntoIter<String>,
    current: Option<String>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(store: &'a mut Store) -> Self {
        let keys = store.key_set().into_iter();
        Self {
            store,
            keys,
            current: None,
        }
    }

    /// Key of the entry last returned, unless it was removed
    pub fn current_key(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Remove the entry last returned by `next`
    ///
    /// Fails with `NoCurrentEntry` before the first advance or when the
    /// current entry has already been removed.
    pub fn remove_current(&mut self) -> Result<()> {
        let key = self.current.take().ok_or(ConfigError::NoCurrentEntry)?;
        self.store.remove(&key)
    }
}

impl Iterator for Cursor<'_> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        let Some(key) = self.keys.next() else {
            self.current = None;
            return None;
        };
        // Snapshot keys come from key_set, so they always parse
        let value = self.store.get(&key).unwrap_or_default();
        self.current = Some(key.clone());
        Some((key, value))
    }
}
