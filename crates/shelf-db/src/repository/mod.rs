//! # Repository Module
//!
//! The generic repository contract and its implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Caller                                                                 │
//! │       │  store.products().find_by_id("1")                              │
//! │       ▼                                                                 │
//! │  ProductRepository: Repository<Product>                                │
//! │  ├── create(&self, entity)                                             │
//! │  ├── update(&self, id, entity)                                         │
//! │  ├── delete(&self, id)                                                 │
//! │  ├── find_by_id(&self, id)                                             │
//! │  └── find_all(&self)                                                   │
//! │       │                                                                 │
//! │       │  to_document / from_document (serde_json)                      │
//! │       ▼                                                                 │
//! │  Store: insert / remove / fetch_collection                             │
//! │                                                                         │
//! │  The repository enforces uniqueness and existence.                     │
//! │  The store only knows strings and untyped documents.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD over the
//!   `"product"` collection

pub mod product;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{DbError, DbResult};
use crate::store::Document;

/// CRUD contract over one entity type.
pub trait Repository<T> {
    /// Stores a new entity. Fails if its id is already taken.
    fn create(&self, entity: T) -> DbResult<T>;

    /// Replaces the entity stored under `id`. Fails if `id` is unknown.
    fn update(&self, id: &str, entity: T) -> DbResult<T>;

    /// Removes the entity stored under `id`, returning whether it existed.
    fn delete(&self, id: &str) -> DbResult<bool>;

    /// Loads the entity stored under `id`.
    fn find_by_id(&self, id: &str) -> DbResult<T>;

    /// Loads every stored entity. Fails if there are none.
    fn find_all(&self) -> DbResult<Vec<T>>;
}

/// Flattens an entity into a document, one field per struct member.
pub fn to_document<T: Serialize>(entity: &T) -> DbResult<Document> {
    match serde_json::to_value(entity)? {
        Value::Object(fields) => Ok(fields),
        other => Err(DbError::InvalidDocument(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Rebuilds an entity from a stored document.
pub fn from_document<T: DeserializeOwned>(document: Document) -> DbResult<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

// =============================================================================
// Unit Tests
// =============================================================================
