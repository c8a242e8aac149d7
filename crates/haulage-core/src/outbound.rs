//! # Outbound Order Intake
//!
//! Turns a client's outbound order into order lines the truck loader can
//! work with, and checks them against warehouse stock.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Outbound Order Intake                               │
//! │                                                                         │
//! │  OutboundOrderRequest { warehouse_id, orders: [gtin × qty] }           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  extract_gtins()        ── same GTIN twice?  → Validation(Duplicate)   │
//! │       │                                                                 │
//! │       ▼   (caller loads the catalog rows for these GTINs)              │
//! │  resolve_order_lines()  ── qty <= 0?         → Validation              │
//! │       │                 ── GTIN not found?   → UnknownProducts         │
//! │       ▼                                                                 │
//! │  check_stock()          ── held < qty?       → InsufficientStock       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TruckLoader::pack()  →  OutboundOrderResponse                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure; the database reads and the stock removal live in
//! `haulage-db`.

use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, CoreResult, StockShortfall, ValidationError};
use crate::types::{OrderLine, OutboundOrderRequest, Product, StockAlteration, StockLevel};
use crate::validation::validate_quantity;

/// Returns the request's GTINs in order, rejecting the first duplicate.
pub fn extract_gtins(request: &OutboundOrderRequest) -> CoreResult<Vec<String>> {
    let mut seen = HashSet::with_capacity(request.orders.len());
    let mut gtins = Vec::with_capacity(request.orders.len());

    for order in &request.orders {
        if !seen.insert(order.gtin.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "gtin".to_string(),
                value: order.gtin.clone(),
            }
            .into());
        }
        gtins.push(order.gtin.clone());
    }

    Ok(gtins)
}

/// Resolves every requested GTIN to a catalog product.
///
/// Quantities are validated first. Unknown GTINs are collected over the
/// whole request and reported together.
///
/// ## Arguments
/// * `request` - The client's order
/// * `products` - Catalog rows keyed by GTIN
pub fn resolve_order_lines(
    request: &OutboundOrderRequest,
    products: &HashMap<String, Product>,
) -> CoreResult<Vec<OrderLine>> {
    for order in &request.orders {
        validate_quantity(order.quantity)?;
    }

    let mut lines = Vec::with_capacity(request.orders.len());
    let mut unknown = Vec::new();

    for order in &request.orders {
        match products.get(&order.gtin) {
            Some(product) => lines.push(OrderLine::new(product.to_ref(), order.quantity)),
            None => unknown.push(order.gtin.clone()),
        }
    }

    if !unknown.is_empty() {
        return Err(CoreError::UnknownProducts { gtins: unknown });
    }

    Ok(lines)
}

/// The stock removals an order implies, one per line.
pub fn stock_alterations(lines: &[OrderLine]) -> Vec<StockAlteration> {
    lines
        .iter()
        .map(|line| StockAlteration::new(line.product.product_id.clone(), line.quantity))
        .collect()
}

/// Checks that the warehouse holds enough of every ordered product.
///
/// ## Arguments
/// * `lines` - Resolved order lines
/// * `stock` - Stock levels of the warehouse keyed by product id
///
/// ## Returns
/// * `Ok(())` - Every line can be shipped
/// * `Err(CoreError::InsufficientStock)` - One entry per short line, in order
pub fn check_stock(lines: &[OrderLine], stock: &HashMap<String, StockLevel>) -> CoreResult<()> {
    let shortfalls: Vec<StockShortfall> = lines
        .iter()
        .filter_map(|line| {
            let held = stock.get(&line.product.product_id).map(|level| level.held);
            match held {
                Some(held) if held >= line.quantity => None,
                _ => Some(StockShortfall {
                    gtin: line.product.gtin.clone(),
                    held,
                    requested: line.quantity,
                }),
            }
        })
        .collect();

    if !shortfalls.is_empty() {
        return Err(CoreError::InsufficientStock { shortfalls });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
