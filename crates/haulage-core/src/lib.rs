//! # haulage-core: Pure Loading Logic for Haulage
//!
//! This crate is the **heart** of Haulage. It decides how an outbound order
//! is split across trucks, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Haulage Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    haulage (CLI)                                │   │
//! │  │    add-product, add-stock, stock, pack, dispatch               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ haulage-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  weight   │  │  loading  │  │ outbound  │  │   │
//! │  │   │  Product  │  │   Grams   │  │TruckLoader│  │  intake   │  │   │
//! │  │   │ TruckLoad │  │           │  │   pack    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    haulage-db (Database Layer)                  │   │
//! │  │        SQLite catalog and stock, outbound order service         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, OrderLine, TruckLoad, etc.)
//! - [`weight`] - Grams newtype
//! - [`loading`] - The truck loader
//! - [`outbound`] - Order intake and stock checks
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use haulage_core::{pack_orders_into_trucks, Grams, OrderLine, ProductRef};
//!
//! let bricks = ProductRef::new("p-1", "0000", Grams::from_kilograms(900.0));
//! let trucks = pack_orders_into_trucks(&[OrderLine::new(bricks, 5)]).unwrap();
//!
//! let sizes: Vec<usize> = trucks.iter().map(|t| t.len()).collect();
//! assert_eq!(sizes, vec![1, 2, 2]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loading;
pub mod outbound;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, LoadingError, StockShortfall, ValidationError};
pub use loading::{pack_orders_into_trucks, TruckLoader};
pub use types::*;
pub use weight::Grams;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Capacity of a standard truck: two tonnes.
pub const TRUCK_CAPACITY: Grams = Grams::from_grams(2_000_000.0);

/// Maximum quantity of a single order line or stock alteration.
///
/// Keeps a typo from producing millions of truck items.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;
