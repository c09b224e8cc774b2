//! # Error Types
//!
//! Domain-specific error types for kiosk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kiosk-core errors (this file)                                          │
//! │  ├── CoreError        - Catalog construction failures                   │
//! │  └── ValidationError  - Field-level data problems                       │
//! │                                                                         │
//! │  kiosk-session errors (separate crate)                                  │
//! │  ├── SessionError     - Config, catalog loading, payment                │
//! │  └── PaymentError     - Gateway outcomes                                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Console output      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order transitions never produce errors. A transition invoked from the
//! wrong state is reported as [`Transition::Ignored`](crate::order::Transition).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while building the catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog has no categories, so there is no initial menu page.
    #[error("Catalog must contain at least one category")]
    EmptyCatalog,

    /// Two entries of the same table share an id.
    #[error("Duplicate {table} id: {id}")]
    DuplicateId { table: &'static str, id: String },

    /// A product points at a category that does not exist.
    ///
    /// ## When This Occurs
    /// - A hand-edited catalog file renames a category but not its products
    #[error("Product {product_id} references unknown category {category_id}")]
    UnknownCategory {
        product_id: String,
        category_id: String,
    },

    /// A drink discount larger than the cheapest product would let a cart
    /// line, and so an order total, drop below zero.
    #[error("Drink {drink_id} discount of {discount_cents} cents exceeds the cheapest product price of {cheapest_cents} cents")]
    DrinkDiscountTooLarge {
        drink_id: String,
        discount_cents: i64,
        cheapest_cents: i64,
    },

    /// Catalog JSON could not be parsed.
    #[error("Invalid catalog data: {0}")]
    InvalidData(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., an id with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownCategory {
            product_id: "b1".to_string(),
            category_id: "burgerz".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Product b1 references unknown category burgerz"
        );

        let err = CoreError::DuplicateId {
            table: "drink",
            id: "d1".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate drink id: d1");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: name is required");
    }
}
