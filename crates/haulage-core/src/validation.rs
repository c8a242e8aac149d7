//! # Validation Module
//!
//! Input validation utilities for Haulage.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / API boundary                                           │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── GTIN format, quantities, weights, capacity                        │
//! │  └── Used by order intake and the catalog commands                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (gtin), UNIQUE (warehouse_id, product_id)                  │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use haulage_core::validation::{validate_gtin, validate_quantity};
//!
//! validate_gtin("05012345678900").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::weight::Grams;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest GTIN in the family (GTIN-14).
pub const MAX_GTIN_LENGTH: usize = 14;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a GTIN.
///
/// ## Rules
/// - Must not be empty
/// - At most 14 characters (GTIN-8/12/13/14 family)
/// - Digits only
///
/// ## Example
/// ```rust
/// use haulage_core::validation::validate_gtin;
///
/// assert!(validate_gtin("0000").is_ok());
/// assert!(validate_gtin("").is_err());
/// assert!(validate_gtin("00A1").is_err());
/// ```
pub fn validate_gtin(gtin: &str) -> ValidationResult<()> {
    let gtin = gtin.trim();

    if gtin.is_empty() {
        return Err(ValidationError::Required {
            field: "gtin".to_string(),
        });
    }

    if gtin.len() > MAX_GTIN_LENGTH {
        return Err(ValidationError::TooLong {
            field: "gtin".to_string(),
            max: MAX_GTIN_LENGTH,
        });
    }

    if !gtin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "gtin".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity of an order line or stock alteration.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product's unit weight.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (weightless items such as leaflets are allowed)
pub fn validate_weight(weight: Grams) -> ValidationResult<()> {
    if !weight.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "weight".to_string(),
            reason: "must be a finite number of grams".to_string(),
        });
    }

    if weight.grams() < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "weight".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a truck capacity.
///
/// ## Rules
/// - Must be a finite number
/// - Must be positive
pub fn validate_capacity(capacity: Grams) -> ValidationResult<()> {
    if !capacity.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "truck capacity".to_string(),
            reason: "must be a finite number of grams".to_string(),
        });
    }

    if capacity.grams() <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "truck capacity".to_string(),
        });
    }

    Ok(())
}

/// Validates a warehouse identifier.
pub fn validate_warehouse_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "warehouse_id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_gtin() {
        assert!(validate_gtin("0000").is_ok());
        assert!(validate_gtin("05012345678900").is_ok());
        assert!(validate_gtin(" 0001 ").is_ok());

        assert!(validate_gtin("").is_err());
        assert!(validate_gtin("   ").is_err());
        assert!(validate_gtin("0000XYZ").is_err());
        assert!(validate_gtin(&"1".repeat(15)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Pallet of bricks").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(Grams::zero()).is_ok());
        assert!(validate_weight(Grams::from_grams(0.5)).is_ok());

        assert!(validate_weight(Grams::from_grams(-1.0)).is_err());
        assert!(validate_weight(Grams::from_grams(f64::NAN)).is_err());
        assert!(validate_weight(Grams::from_grams(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(Grams::from_grams(2_000_000.0)).is_ok());
        assert!(validate_capacity(Grams::zero()).is_err());
        assert!(validate_capacity(Grams::from_grams(-5.0)).is_err());
        assert!(validate_capacity(Grams::from_grams(f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_warehouse_id() {
        assert!(validate_warehouse_id(1).is_ok());
        assert!(validate_warehouse_id(0).is_err());
        assert!(validate_warehouse_id(-3).is_err());
    }
}
