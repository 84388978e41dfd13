//! # Store Error Types
//!
//! Error types for store and repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Store (not started)        ──► DbError::NotConnected                  │
//! │  Repository (id checks)     ──► DocumentAlreadyExists / DocumentNotFound│
//! │  Product::validate()        ──► DbError::Validation                    │
//! │  serde_json (encode/decode) ──► DbError::InvalidDocument               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller matches on the variant. Nothing is retried.                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shelf_core::ValidationError;
use thiserror::Error;

/// Store and repository errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The store has not been started, or has been stopped.
    #[error("Store is not connected")]
    NotConnected,

    /// A document with the same id already exists.
    ///
    /// ## When This Occurs
    /// - `create` with a `product_id` that is already stored
    #[error("Document '{id}' already exists in '{collection}'")]
    DocumentAlreadyExists { collection: String, id: String },

    /// No document matched.
    ///
    /// ## When This Occurs
    /// - `find_by_id` / `update` with an unknown id (`id` is set)
    /// - `find_all` on an empty collection (`id` is `None`)
    #[error(
        "Document not found in '{collection}': {}",
        .id.as_deref().unwrap_or("no documents are present")
    )]
    DocumentNotFound {
        collection: String,
        id: Option<String>,
    },

    /// An update targeted one id but carried an entity with another.
    #[error("Entity id '{entity_id}' does not match document id '{id}'")]
    IdMismatch { id: String, entity_id: String },

    /// Entity failed validation before being written.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A document could not be converted to or from an entity.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Internal store error (poisoned lock).
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a DocumentNotFound error for a given id.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::DocumentNotFound {
            collection: collection.into(),
            id: Some(id.into()),
        }
    }

    /// Creates a DocumentNotFound error for an empty collection.
    pub fn empty(collection: impl Into<String>) -> Self {
        DbError::DocumentNotFound {
            collection: collection.into(),
            id: None,
        }
    }

    /// Creates a DocumentAlreadyExists error.
    pub fn duplicate(collection: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::DocumentAlreadyExists {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::InvalidDocument(err.to_string())
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(DbError::NotConnected.to_string(), "Store is not connected");
        assert_eq!(
            DbError::duplicate("product", "1").to_string(),
            "Document '1' already exists in 'product'"
        );
        assert_eq!(
            DbError::not_found("product", "2").to_string(),
            "Document not found in 'product': 2"
        );
        assert_eq!(
            DbError::empty("product").to_string(),
            "Document not found in 'product': no documents are present"
        );
    }

    #[test]
    fn test_validation_converts_to_db_error() {
        let err: DbError = ValidationError::NotFinite {
            field: "price".to_string(),
        }
        .into();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
