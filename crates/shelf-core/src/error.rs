//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  └── ValidationError  - Entity field validation failures               │
//! │                                                                         │
//! │  shelf-db errors (separate crate)                                      │
//! │  └── DbError          - Store and repository failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → DbError::Validation → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Entity validation errors.
///
/// Raised before anything is written to the store, so a rejected entity
/// never leaves a partial document behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A floating point field is NaN or infinite.
    ///
    /// ## When This Occurs
    /// - `price` computed from a division by zero
    /// - `price` parsed from "NaN" / "inf"
    ///
    /// Such values have no document representation and would not survive
    /// a round trip through the store.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
