//! # Validation Module
//!
//! Rules for catalog data supplied at start-up.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                       │
//! │  └── Shape and types of the catalog file                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - field rules                                     │
//! │  ├── ids, names, prices, calories                                       │
//! │  └── tax rate from configuration                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog::new - table rules                                    │
//! │  ├── unique ids per table                                               │
//! │  └── product → category references                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::validation::{validate_id, validate_price_cents};
//!
//! assert!(validate_id("product id", "b2").is_ok());
//! assert!(validate_price_cents(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Category, DrinkOption, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted catalog id.
pub const MAX_ID_LEN: usize = 50;

/// Longest accepted display name.
pub const MAX_NAME_LEN: usize = 200;

/// Upper bound for the calorie label.
pub const MAX_CALORIES: u32 = 10_000;

/// Largest accepted price or drink delta, in cents (1,000,000.00).
///
/// Keeps every catalog amount far below the point where micro-unit
/// arithmetic could overflow.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog identifier.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LEN,
        });
    }

    if !id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a drink surcharge or discount in cents.
///
/// Only the magnitude is checked here. Whether a discount fits under the
/// cheapest product is a table rule, see `Catalog::new`.
pub fn validate_price_delta_cents(cents: i64) -> ValidationResult<()> {
    if !(-MAX_PRICE_CENTS..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "drink price delta".to_string(),
            min: -MAX_PRICE_CENTS,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Entry Validators
// =============================================================================

pub fn validate_category(category: &Category) -> ValidationResult<()> {
    validate_id("category id", &category.id)?;
    validate_name("category name", &category.name)
}

/// Validates a product's own fields. The category reference is checked by
/// the catalog, which knows the category table.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_id("product id", &product.id)?;
    validate_id("product category", &product.category_id)?;
    validate_name("product name", &product.name)?;
    validate_price_cents(product.price_cents)?;

    if let Some(calories) = product.calories {
        if calories > MAX_CALORIES {
            return Err(ValidationError::OutOfRange {
                field: "calories".to_string(),
                min: 0,
                max: MAX_CALORIES as i64,
            });
        }
    }

    Ok(())
}

/// Validates a drink option's own fields.
pub fn validate_drink(drink: &DrinkOption) -> ValidationResult<()> {
    validate_id("drink id", &drink.id)?;
    validate_name("drink name", &drink.name)?;
    validate_price_delta_cents(drink.price_delta_cents)
}

// =============================================================================
// Unit Tests
// =============================================================================
