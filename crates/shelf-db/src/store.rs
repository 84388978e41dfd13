//! # Document Store
//!
//! The in-memory, collection-partitioned key-value store and its configuration.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Store                                                                  │
//! │  └── Arc<RwLock<Option<StoreData>>>                                     │
//! │         │                                                               │
//! │         │  None          → not started (every operation: NotConnected) │
//! │         │  Some(data)    → started                                     │
//! │         ▼                                                               │
//! │      "product" ──► Collection                                          │
//! │                     ├── "1" ──► Document { "name": "Test", ... }       │
//! │                     └── "2" ──► Document { "name": "Mug",  ... }       │
//! │      "other"   ──► Collection                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! - `start()` allocates an empty mapping. Starting again wipes all data.
//! - `stop()` drops the mapping. Clones of the handle see the same state.
//!
//! A missing collection is always read as empty, never as an error.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;

/// A flat mapping of field names to untyped values.
pub type Document = serde_json::Map<String, Value>;

/// Documents of one collection keyed by document id, iterated in id order.
pub type Collection = BTreeMap<String, Document>;

type StoreData = HashMap<String, Collection>;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use shelf_db::StoreConfig;
///
/// let config = StoreConfig::new("catalog").auto_start(true);
/// assert!(config.auto_start);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Name reported in log fields.
    /// Default: "shelf"
    pub name: String,

    /// Whether `Store::new` starts the store right away.
    /// Default: false (callers pair `start`/`stop` themselves)
    pub auto_start: bool,
}

impl StoreConfig {
    /// Creates a configuration with the given store name.
    pub fn new(name: impl Into<String>) -> Self {
        StoreConfig {
            name: name.into(),
            auto_start: false,
        }
    }

    /// Sets whether to start the store on construction.
    pub fn auto_start(mut self, start: bool) -> Self {
        self.auto_start = start;
        self
    }

    /// Default configuration for isolated tests.
    pub fn in_memory() -> Self {
        StoreConfig::new("shelf")
    }

    /// Loads configuration from environment variables.
    ///
    /// ## Environment Variables
    /// - `SHELF_STORE_NAME` - store name (default: "shelf")
    /// - `SHELF_AUTO_START` - `true` / `false` (default: false)
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = StoreConfig::in_memory();

        if let Ok(name) = std::env::var("SHELF_STORE_NAME") {
            if !name.trim().is_empty() {
                config.name = name;
            }
        }

        if let Ok(flag) = std::env::var("SHELF_AUTO_START") {
            match flag.trim().parse::<bool>() {
                Ok(start) => config.auto_start = start,
                Err(_) => warn!(value = %flag, "Ignoring invalid SHELF_AUTO_START"),
            }
        }

        config
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::in_memory()
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to an in-memory document store.
///
/// Cloning is cheap and every clone shares the same data, the way repositories
/// share one store. Separate `Store::new` calls are fully independent.
///
/// Each operation takes the lock once, so single operations are atomic.
/// A read followed by a write (as in the repositories) is not.
#[derive(Debug, Clone)]
pub struct Store {
    name: String,
    data: Arc<RwLock<Option<StoreData>>>,
}

impl Store {
    /// Creates a store handle, starting it when `config.auto_start` is set.
    pub fn new(config: StoreConfig) -> Self {
        let store = Store {
            name: config.name,
            data: Arc::new(RwLock::new(None)),
        };

        if config.auto_start {
            store.start();
        }

        store
    }

    /// Creates an isolated, not yet started store (for tests).
    pub fn in_memory() -> Self {
        Store::new(StoreConfig::in_memory())
    }

    /// Returns the configured store name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initializes empty storage, discarding anything stored before.
    pub fn start(&self) {
        // start replaces the whole mapping, so a poisoned guard is safe to reuse
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            warn!(store = %self.name, "Restarting store, existing data is discarded");
        }
        *guard = Some(StoreData::new());
        info!(store = %self.name, "Store started");
    }

    /// Releases all storage. Every later operation fails until `start`.
    pub fn stop(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        info!(store = %self.name, "Store stopped");
    }

    /// Returns whether the store is started.
    pub fn is_started(&self) -> bool {
        self.data.read().is_ok_and(|guard| guard.is_some())
    }

    /// Upserts `data` under `doc_id`, creating the collection if needed.
    ///
    /// ## Returns
    /// * `Ok(true)` - Document stored
    /// * `Err(DbError::NotConnected)` - Store not started
    pub fn insert(&self, collection: &str, doc_id: &str, data: Document) -> DbResult<bool> {
        let mut guard = self.write()?;
        let store = guard.as_mut().ok_or(DbError::NotConnected)?;

        store
            .entry(collection.to_string())
            .or_default()
            .insert(doc_id.to_string(), data);

        debug!(store = %self.name, collection, id = %doc_id, "Inserted document");
        Ok(true)
    }

    /// Deletes `doc_id` from `collection`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Document existed and was removed
    /// * `Ok(false)` - No such document (or no such collection)
    /// * `Err(DbError::NotConnected)` - Store not started
    pub fn remove(&self, collection: &str, doc_id: &str) -> DbResult<bool> {
        let mut guard = self.write()?;
        let store = guard.as_mut().ok_or(DbError::NotConnected)?;

        let removed = store
            .get_mut(collection)
            .is_some_and(|documents| documents.remove(doc_id).is_some());

        debug!(store = %self.name, collection, id = %doc_id, removed, "Remove document");
        Ok(removed)
    }

    /// Returns a snapshot of `collection`, empty if it does not exist.
    pub fn fetch_collection(&self, collection: &str) -> DbResult<Collection> {
        let guard = self.read()?;
        let store = guard.as_ref().ok_or(DbError::NotConnected)?;

        Ok(store.get(collection).cloned().unwrap_or_default())
    }

    /// Returns a copy of one document, `None` if it is absent.
    pub(crate) fn fetch_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> DbResult<Option<Document>> {
        let guard = self.read()?;
        let store = guard.as_ref().ok_or(DbError::NotConnected)?;

        Ok(store
            .get(collection)
            .and_then(|documents| documents.get(doc_id))
            .cloned())
    }

    /// Returns whether `doc_id` is stored in `collection`.
    pub(crate) fn contains(&self, collection: &str, doc_id: &str) -> DbResult<bool> {
        let guard = self.read()?;
        let store = guard.as_ref().ok_or(DbError::NotConnected)?;

        Ok(store
            .get(collection)
            .is_some_and(|documents| documents.contains_key(doc_id)))
    }

    /// Returns the number of documents in `collection`.
    pub(crate) fn collection_len(&self, collection: &str) -> DbResult<usize> {
        let guard = self.read()?;
        let store = guard.as_ref().ok_or(DbError::NotConnected)?;

        Ok(store.get(collection).map_or(0, |documents| documents.len()))
    }

    /// Returns the product repository bound to this store.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_db::{Repository, Store};
    ///
    /// let store = Store::in_memory();
    /// store.start();
    /// assert!(!store.products().delete("missing").unwrap());
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    fn read(&self) -> DbResult<RwLockReadGuard<'_, Option<StoreData>>> {
        self.data
            .read()
            .map_err(|e| DbError::Internal(e.to_string()))
    }

    fn write(&self) -> DbResult<RwLockWriteGuard<'_, Option<StoreData>>> {
        self.data
            .write()
            .map_err(|e| DbError::Internal(e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
