//! # Error Types
//!
//! Domain-specific error types for haulage-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  haulage-core errors (this file)                                       │
//! │  ├── LoadingError     - Truck loading failures                         │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── CoreError        - Outbound order failures (wraps both above)     │
//! │                                                                         │
//! │  haulage-db errors (separate crate)                                    │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── OutboundError    - CoreError | DbError                            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → OutboundError → CLI (anyhow)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (GTIN, weights, quantities)
//! 3. Errors are enum variants, never String
//! 4. Messages that list several products join entries with `"; "`

use std::fmt;

use thiserror::Error;

use crate::weight::Grams;

// =============================================================================
// Loading Error
// =============================================================================

/// Errors raised by the truck loader.
///
/// The loader cannot fail for lack of trucks (it always opens another one),
/// so these are the only two ways it refuses an input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadingError {
    /// An order line asked for zero or a negative number of units.
    ///
    /// Order intake should have rejected this already; the loader checks
    /// every line before touching any truck.
    #[error("Invalid quantity {quantity} for product {gtin}")]
    InvalidQuantity { gtin: String, quantity: i64 },

    /// A single unit cannot be placed in an empty truck.
    ///
    /// ## When This Occurs
    /// ```text
    /// Line does not fit the emptiest truck
    ///      │
    ///      ▼
    /// Open a fresh truck, add units while weight + unit < capacity
    ///      │
    ///      ▼
    /// Zero units admitted (unit >= capacity)  ──►  UnitExceedsCapacity
    /// ```
    #[error("Unit of product {gtin} weighs {unit_weight}, which does not fit a truck of capacity {capacity}")]
    UnitExceedsCapacity {
        gtin: String,
        unit_weight: Grams,
        capacity: Grams,
    },
}

/// Result type for loading operations.
pub type LoadingResult<T> = Result<T, LoadingError>;

// =============================================================================
// Stock Shortfall
// =============================================================================

/// One product that cannot be shipped from the held stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortfall {
    pub gtin: String,
    /// `None` when the warehouse has no stock row for the product at all.
    pub held: Option<i64>,
    pub requested: i64,
}

impl fmt::Display for StockShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.held {
            None => write!(f, "Product: {}, no stock held", self.gtin),
            Some(held) => write!(
                f,
                "Product: {}, stock held: {}, stock to remove: {}",
                self.gtin, held, self.requested
            ),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Outbound order errors.
///
/// These errors represent business rule violations found while turning a
/// client's order into truck loads.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One or more GTINs are not in the catalog.
    ///
    /// Every unknown GTIN of the request is reported, not just the first.
    #[error("{}", join_unknown(.gtins))]
    UnknownProducts { gtins: Vec<String> },

    /// The warehouse does not hold enough stock for one or more lines.
    ///
    /// ## User Workflow
    /// ```text
    /// Order: 0000 × 11, 0001 × 1000
    ///      │
    ///      ▼
    /// Stock: 0000 held 10, 0001 no row
    ///      │
    ///      ▼
    /// "Product: 0000, stock held: 10, stock to remove: 11;
    ///  Product: 0001, no stock held"
    /// ```
    #[error("{}", join_shortfalls(.shortfalls))]
    InsufficientStock { shortfalls: Vec<StockShortfall> },

    /// Truck loading failed (wraps LoadingError).
    #[error("Loading error: {0}")]
    Loading(#[from] LoadingError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn join_unknown(gtins: &[String]) -> String {
    gtins
        .iter()
        .map(|gtin| format!("Unknown product gtin: {}", gtin))
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_shortfalls(shortfalls: &[StockShortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Error)]
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-digit GTIN, NaN weight).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same GTIN twice in one order).
    #[error("Duplicate {field}: '{value}'")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
