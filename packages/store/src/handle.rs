//! Shared, swappable reference to the current [`RecordStore`].
//!
//! Queries clone the inner `Arc` and run without holding the lock. A reload
//! builds the new store completely before taking the write lock, so a failed
//! reload leaves the previous store in place and readers never observe a
//! partially loaded table.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::{RecordStore, StoreError};

/// Holds the store currently used to answer queries.
#[derive(Debug)]
pub struct StoreHandle {
    current: RwLock<Arc<RecordStore>>,
}

impl StoreHandle {
    /// Wraps an already-loaded store.
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// Returns the store currently in service.
    #[must_use]
    pub fn current(&self) -> Arc<RecordStore> {
        // The lock only guards an `Arc` assignment, so a poisoned lock still
        // holds a complete store.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Puts `store` in service and returns the one it replaced.
    pub fn replace(&self, store: RecordStore) -> Arc<RecordStore> {
        self.swap(Arc::new(store))
    }

    /// Puts `store` in service and returns it.
    ///
    /// The returned `Arc` is the store this call installed, even if another
    /// publish has replaced it since.
    pub fn publish(&self, store: RecordStore) -> Arc<RecordStore> {
        let store = Arc::new(store);
        self.swap(Arc::clone(&store));
        store
    }

    /// Loads a fresh store from `path` and swaps it in.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the load fails; the current store is kept.
    pub fn reload(&self, path: &Path) -> Result<Arc<RecordStore>, StoreError> {
        let store = RecordStore::load(path)?;
        Ok(self.publish(store))
    }

    fn swap(&self, store: Arc<RecordStore>) -> Arc<RecordStore> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "lat,lon,rep_date,source,fuel,fwi,ros,hfi,estarea\n";

    fn store(body: &str) -> RecordStore {
        RecordStore::from_reader(format!("{HEADER}{body}").as_bytes()).unwrap()
    }

    #[test]
    fn replace_swaps_without_touching_readers() {
        let handle = StoreHandle::new(store("50,-100,2024-01-01,A,X,1,1,1,1\n"));
        let before = handle.current();

        let old = handle.replace(store(
            "50,-100,2024-02-01,B,Y,1,1,1,1\n51,-101,2024-02-02,B,Y,1,1,1,1\n",
        ));

        assert!(Arc::ptr_eq(&before, &old));
        assert_eq!(before.len(), 1);
        assert_eq!(handle.current().len(), 2);
        assert_eq!(handle.current().source_types(), ["B"]);
    }

    #[test]
    fn publish_returns_the_store_it_installed() {
        let handle = StoreHandle::new(store("50,-100,2024-01-01,A,X,1,1,1,1\n"));

        let published = handle.publish(store("50,-100,2024-02-01,B,Y,1,1,1,1\n"));
        assert!(Arc::ptr_eq(&published, &handle.current()));

        let displaced = handle.replace(store("50,-100,2024-03-01,C,Z,1,1,1,1\n"));
        assert!(Arc::ptr_eq(&published, &displaced));
        assert_eq!(published.source_types(), ["B"]);
        assert_eq!(handle.current().source_types(), ["C"]);
    }

    #[test]
    fn reload_returns_the_loaded_store() {
        let path = std::env::temp_dir().join(format!(
            "hotspot_map_store_reload_{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, format!("{HEADER}50,-100,2024-04-01,D,W,1,1,1,1\n")).unwrap();

        let handle = StoreHandle::new(store("50,-100,2024-01-01,A,X,1,1,1,1\n"));
        let loaded = handle.reload(&path);
        std::fs::remove_file(&path).ok();

        let loaded = loaded.unwrap();
        assert_eq!(loaded.source_types(), ["D"]);
        assert!(Arc::ptr_eq(&loaded, &handle.current()));
    }

    #[test]
    fn failed_reload_keeps_current_store() {
        let handle = StoreHandle::new(store("50,-100,2024-01-01,A,X,1,1,1,1\n"));
        let before = handle.current();

        assert!(handle.reload(Path::new("/nonexistent/hotspots.csv")).is_err());
        assert!(Arc::ptr_eq(&before, &handle.current()));
    }
}
