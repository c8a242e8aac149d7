//! # Domain Types
//!
//! Core domain types used throughout Haulage.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   ProductRef    │   │   OrderLine     │       │
//! │  │  ─────────────  │──►│  ─────────────  │──►│  ─────────────  │       │
//! │  │  id (UUID)      │   │  product_id     │   │  product        │       │
//! │  │  gtin           │   │  gtin           │   │  quantity > 0   │       │
//! │  │  name           │   │  weight_grams   │   └────────┬────────┘       │
//! │  │  weight_grams   │   └─────────────────┘            │ loading        │
//! │  └─────────────────┘                                  ▼                │
//! │                                               ┌─────────────────┐       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │   TruckLoad     │       │
//! │  │   StockLevel    │   │ StockAlteration │   │  ─────────────  │       │
//! │  │  warehouse_id   │   │  product_id     │   │  items (units)  │       │
//! │  │  product_id     │   │  quantity       │   │  weight_grams   │       │
//! │  │  held           │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `id`: UUID v4 - immutable, used for database relations (stock rows)
//! - `gtin`: the business identifier clients order by

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::weight::Grams;

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Global Trade Item Number - business identifier.
    pub gtin: String,

    /// Display name.
    pub name: String,

    /// Weight of a single unit in grams.
    pub weight_grams: f64,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with a fresh UUID and current timestamps.
    pub fn new(gtin: impl Into<String>, name: impl Into<String>, weight: Grams) -> Self {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            gtin: gtin.into(),
            name: name.into(),
            weight_grams: weight.grams(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the unit weight.
    #[inline]
    pub fn weight(&self) -> Grams {
        Grams::from_grams(self.weight_grams)
    }

    /// The identity and weight the loader works with.
    pub fn to_ref(&self) -> ProductRef {
        ProductRef {
            product_id: self.id.clone(),
            gtin: self.gtin.clone(),
            weight: self.weight(),
        }
    }
}

// =============================================================================
// Product Reference
// =============================================================================

/// Identity plus unit weight of a product; one loaded unit in a truck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub product_id: String,
    pub gtin: String,
    #[serde(rename = "weightGrams")]
    pub weight: Grams,
}

impl ProductRef {
    pub fn new(product_id: impl Into<String>, gtin: impl Into<String>, weight: Grams) -> Self {
        ProductRef {
            product_id: product_id.into(),
            gtin: gtin.into(),
            weight,
        }
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One (product, quantity) request to ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product: ProductRef,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product: ProductRef, quantity: i64) -> Self {
        OrderLine { product, quantity }
    }

    /// `quantity × unit weight`.
    #[inline]
    pub fn total_weight(&self) -> Grams {
        self.product.weight * self.quantity
    }
}

// =============================================================================
// Truck Load
// =============================================================================

/// The contents of one truck: units in loading order.
///
/// The weight is accumulated on every push, left to right, so it always
/// equals the sum of the item weights in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TruckLoad {
    items: Vec<ProductRef>,
    #[serde(rename = "weightGrams")]
    weight: Grams,
}

impl TruckLoad {
    /// An empty truck.
    pub fn new() -> Self {
        TruckLoad::default()
    }

    /// Loaded units, in loading order.
    #[inline]
    pub fn items(&self) -> &[ProductRef] {
        &self.items
    }

    /// Total weight of the loaded units.
    #[inline]
    pub fn weight(&self) -> Grams {
        self.weight
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Weight after loading `count` more units of `unit_weight`.
    ///
    /// Summed one unit at a time, exactly as [`TruckLoad::load`] accumulates
    /// it, so a `<=` check on the result holds for the loaded truck.
    pub fn weight_after(&self, unit_weight: Grams, count: i64) -> Grams {
        (0..count).fold(self.weight, |total, _| total + unit_weight)
    }

    /// Loads `count` units of one product.
    pub fn load(&mut self, product: &ProductRef, count: i64) {
        for _ in 0..count {
            self.push(product.clone());
        }
    }

    /// Loads a single unit.
    pub fn push(&mut self, unit: ProductRef) {
        self.weight += unit.weight;
        self.items.push(unit);
    }

    /// Number of loaded units of the given product.
    pub fn count_of(&self, product_id: &str) -> usize {
        self.items
            .iter()
            .filter(|unit| unit.product_id == product_id)
            .count()
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Units of one product held in one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub warehouse_id: i64,
    pub product_id: String,
    pub held: i64,
}

/// A quantity to add to or remove from a product's stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlteration {
    pub product_id: String,
    pub quantity: i64,
}

impl StockAlteration {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        StockAlteration {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Stock aggregated over every warehouse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockTotals {
    /// Warehouses with at least one stock row.
    pub warehouse_count: i64,
    /// Stock rows, one per (warehouse, product) pair.
    pub items_tracked: i64,
    /// Units held over all rows.
    pub stock_held: i64,
}

/// Catalog and stock overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub product_count: i64,
    pub warehouse_count: i64,
    pub items_tracked: i64,
    pub stock_held: i64,
}

impl StatusSummary {
    pub fn new(product_count: i64, totals: StockTotals) -> Self {
        StatusSummary {
            product_count,
            warehouse_count: totals.warehouse_count,
            items_tracked: totals.items_tracked,
            stock_held: totals.stock_held,
        }
    }
}

// =============================================================================
// Outbound Order API Types
// =============================================================================

/// One requested line as sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GtinOrder {
    pub gtin: String,
    pub quantity: i64,
}

/// An outbound order: ship these GTINs from this warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OutboundOrderRequest {
    pub warehouse_id: i64,
    pub orders: Vec<GtinOrder>,
}

/// The trucks needed to ship an outbound order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OutboundOrderResponse {
    pub number_of_trucks: usize,
    pub truck_loads: Vec<TruckLoad>,
}

impl OutboundOrderResponse {
    pub fn new(truck_loads: Vec<TruckLoad>) -> Self {
        OutboundOrderResponse {
            number_of_trucks: truck_loads.len(),
            truck_loads,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(gtin: &str, grams: f64) -> ProductRef {
        ProductRef::new(format!("id-{}", gtin), gtin, Grams::from_grams(grams))
    }

    #[test]
    fn test_order_line_total_weight() {
        let line = OrderLine::new(unit("0000", 900_000.0), 5);
        assert_eq!(line.total_weight().grams(), 4_500_000.0);
    }

    #[test]
    fn test_truck_load_accumulates_weight() {
        let mut truck = TruckLoad::new();
        assert!(truck.is_empty());
        assert!(truck.weight().is_zero());

        truck.load(&unit("0000", 1_000.0), 3);
        truck.push(unit("0001", 250.5));

        assert_eq!(truck.len(), 4);
        assert_eq!(truck.weight().grams(), 3_250.5);
        assert_eq!(truck.count_of("id-0000"), 3);
        assert_eq!(truck.count_of("id-0001"), 1);

        let summed: Grams = truck.items().iter().map(|u| u.weight).sum();
        assert_eq!(summed, truck.weight());
    }

    #[test]
    fn test_weight_after_matches_load() {
        let bolt = unit("0000", 114.00558627372739);
        let mut truck = TruckLoad::new();
        truck.push(unit("0001", 0.1));

        let projected = truck.weight_after(bolt.weight, 17_543);
        truck.load(&bolt, 17_543);
        assert_eq!(projected, truck.weight());

        assert_eq!(TruckLoad::new().weight_after(bolt.weight, 0), Grams::zero());
    }

    #[test]
    fn test_status_summary_json() {
        let totals = StockTotals {
            warehouse_count: 2,
            items_tracked: 5,
            stock_held: 140,
        };
        let value = serde_json::to_value(StatusSummary::new(10, totals)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "productCount": 10,
                "warehouseCount": 2,
                "itemsTracked": 5,
                "stockHeld": 140
            })
        );
    }

    #[test]
    fn test_product_to_ref() {
        let product = Product::new("0000", "Pallet of bricks", Grams::from_kilograms(900.0));
        let product_ref = product.to_ref();
        assert_eq!(product_ref.product_id, product.id);
        assert_eq!(product_ref.gtin, "0000");
        assert_eq!(product_ref.weight.grams(), 900_000.0);
        assert!(Uuid::parse_str(&product.id).is_ok());
    }

    #[test]
    fn test_response_counts_trucks() {
        let response = OutboundOrderResponse::new(vec![TruckLoad::new(), TruckLoad::new()]);
        assert_eq!(response.number_of_trucks, 2);
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{"warehouseId": 1, "orders": [{"gtin": "0000", "quantity": 3}]}"#;
        let request: OutboundOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.warehouse_id, 1);
        assert_eq!(request.orders[0].gtin, "0000");
        assert_eq!(request.orders[0].quantity, 3);
    }

    #[test]
    fn test_response_json_shape() {
        let mut truck = TruckLoad::new();
        truck.push(unit("0000", 1_000.0));
        let value = serde_json::to_value(OutboundOrderResponse::new(vec![truck])).unwrap();

        assert_eq!(value["numberOfTrucks"], 1);
        assert_eq!(value["truckLoads"][0]["weightGrams"], 1_000.0);
        assert_eq!(value["truckLoads"][0]["items"][0]["gtin"], "0000");
        assert_eq!(value["truckLoads"][0]["items"][0]["weightGrams"], 1_000.0);
    }
}
