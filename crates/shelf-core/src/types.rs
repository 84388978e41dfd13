//! # Domain Types
//!
//! Entity types stored by Shelf.
//!
//! ## Product Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Product                                        │
//! │                                                                         │
//! │  product_id  : String          ← document id in the "product" collection│
//! │  name        : String                                                   │
//! │  description : String                                                   │
//! │  price       : f64                                                      │
//! │  created     : DateTime<Utc>                                            │
//! │  updated     : DateTime<Utc>                                            │
//! │                                                                         │
//! │  Stored as a flat document: one field per struct member.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{validate_price, ValidationResult};

// =============================================================================
// Product
// =============================================================================

/// A product kept in the store.
///
/// No field is optional. The value is owned by the caller; repositories only
/// copy it in and out of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, also used as the document id.
    pub product_id: String,

    /// Display name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Unit price.
    pub price: f64,

    /// When the product was created.
    pub created: DateTime<Utc>,

    /// When the product was last updated.
    pub updated: DateTime<Utc>,
}

impl Product {
    /// Creates a product from all of its fields.
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        Product {
            product_id: product_id.into(),
            name: name.into(),
            description: description.into(),
            price,
            created,
            updated,
        }
    }

    /// Bumps `updated` to the given instant.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated = at;
    }

    /// Checks the fields that must hold before the product is stored.
    ///
    /// Any string is a valid `product_id`, including the empty one.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_price(self.price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
