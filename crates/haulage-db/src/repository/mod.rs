//! # Repository Module
//!
//! Database repository implementations for Haulage.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OutboundOrderService / CLI command                                    │
//! │       │                                                                 │
//! │       │  db.products().get_by_gtins(&gtins)                            │
//! │       │  db.stock().remove_stock(warehouse_id, &alterations)           │
//! │       ▼                                                                 │
//! │  ProductRepository               StockRepository                       │
//! │  ├── insert                      ├── get_by_warehouse                  │
//! │  ├── get_by_id / get_by_gtin     ├── get_by_warehouse_and_products     │
//! │  ├── get_by_gtins                ├── add_stock                         │
//! │  └── count                       └── remove_stock                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository holds a clone of the pool; clones are cheap.

pub mod product;
pub mod stock;
