//! # shelf-db: Storage Layer for Shelf
//!
//! This crate provides the in-memory document store and the repositories
//! built on it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shelf Data Flow                                  │
//! │                                                                         │
//! │  Caller (repo.find_by_id("1"))                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shelf-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐                   │   │
//! │  │   │    Store      │    │   Repositories    │                   │   │
//! │  │   │  (store.rs)   │    │ (repository/*.rs) │                   │   │
//! │  │   │               │    │                   │                   │   │
//! │  │   │ start / stop  │◄───│ Repository<T>     │                   │   │
//! │  │   │ collections   │    │ ProductRepository │                   │   │
//! │  │   └───────────────┘    └───────────────────┘                   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store handle, configuration, document/collection types
//! - [`error`] - Store error types
//! - [`repository`] - Repository contract and implementations
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use shelf_core::Product;
//! use shelf_db::{DbError, Repository, Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("catalog").auto_start(true));
//! let products = store.products();
//!
//! let now = Utc::now();
//! products.create(Product::new("1", "Test", "Test", 10.0, now, now))?;
//! assert_eq!(products.find_all()?.len(), 1);
//!
//! store.stop();
//! assert!(matches!(products.find_all(), Err(DbError::NotConnected)));
//! # Ok::<(), DbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use store::{Collection, Document, Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::product::{ProductRepository, PRODUCT_COLLECTION};
pub use repository::Repository;
