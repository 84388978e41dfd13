//! # Validation Module
//!
//! Field validation for entities before they are written to the store.
//!
//! ## Usage
//! ```rust
//! use shelf_core::validation::validate_price;
//!
//! assert!(validate_price(10.0).is_ok());
//! assert!(validate_price(f64::NAN).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a price.
///
/// ## Rules
/// - Must be finite. Negative and zero prices are accepted.
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
