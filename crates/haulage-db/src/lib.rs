//! # haulage-db: Database Layer for Haulage
//!
//! Catalog and stock storage in SQLite (via sqlx), plus the outbound order
//! service that ties order intake, stock and truck loading together.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Haulage Data Flow                                │
//! │                                                                         │
//! │  haulage dispatch --order order.json                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     haulage-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ product.rs    │    │  (embedded)  │  │   │
//! │  │   │               │◄───│ stock.rs      │    │ 001_init.sql │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   ┌───────▼───────────────┐                                     │   │
//! │  │   │ OutboundOrderService  │ ── haulage-core: intake + loader    │   │
//! │  │   └───────────────────────┘                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (path from haulage.toml)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use haulage_core::TruckLoader;
//! use haulage_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("haulage.db")).await?;
//! let response = db.outbound(TruckLoader::default()).process(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod outbound;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use outbound::{OutboundError, OutboundOrderService, OutboundResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::stock::StockRepository;
