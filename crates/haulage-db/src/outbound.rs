//! # Outbound Order Service
//!
//! Ships an outbound order: checks it against the catalog and the
//! warehouse's stock, packs it into trucks and removes the shipped stock.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  process(request)                                                       │
//! │                                                                         │
//! │  1. validate_warehouse_id                                   (core)     │
//! │  2. extract_gtins            duplicate GTIN → Validation    (core)     │
//! │  3. products().get_by_gtins                                 (db)       │
//! │  4. resolve_order_lines      unknown GTIN   → UnknownProducts (core)   │
//! │  5. stock().get_by_warehouse_and_products                   (db)       │
//! │  6. check_stock              short stock    → InsufficientStock (core) │
//! │  7. TruckLoader::pack        oversize unit  → Loading       (core)     │
//! │  8. stock().remove_stock     raced dispatch → StockConflict (db)       │
//! │  9. OutboundOrderResponse                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Packing runs before the stock write, so any failure leaves stock as it was.

use thiserror::Error;
use tracing::{info, instrument};

use haulage_core::outbound::{check_stock, extract_gtins, resolve_order_lines, stock_alterations};
use haulage_core::validation::validate_warehouse_id;
use haulage_core::{CoreError, OutboundOrderRequest, OutboundOrderResponse, TruckLoader};

use crate::error::DbError;
use crate::pool::Database;

/// Errors from processing an outbound order.
#[derive(Debug, Error)]
pub enum OutboundError {
    /// The order was rejected by a business rule.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database failed, or stock changed underneath the order.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type for outbound order processing.
pub type OutboundResult<T> = Result<T, OutboundError>;

/// Processes outbound orders against one database.
#[derive(Debug, Clone)]
pub struct OutboundOrderService {
    db: Database,
    loader: TruckLoader,
}

impl OutboundOrderService {
    pub fn new(db: Database, loader: TruckLoader) -> Self {
        OutboundOrderService { db, loader }
    }

    /// Ships an order from its warehouse.
    ///
    /// ## Returns
    /// * `Ok(OutboundOrderResponse)` - The trucks needed; stock has been removed
    /// * `Err(OutboundError)` - Nothing was changed
    #[instrument(skip(self, request), fields(warehouse_id = request.warehouse_id, lines = request.orders.len()))]
    pub async fn process(&self, request: &OutboundOrderRequest) -> OutboundResult<OutboundOrderResponse> {
        validate_warehouse_id(request.warehouse_id).map_err(CoreError::from)?;

        let gtins = extract_gtins(request)?;
        let products = self.db.products().get_by_gtins(&gtins).await?;
        let lines = resolve_order_lines(request, &products)?;

        let product_ids: Vec<String> = lines
            .iter()
            .map(|line| line.product.product_id.clone())
            .collect();
        let stock = self
            .db
            .stock()
            .get_by_warehouse_and_products(request.warehouse_id, &product_ids)
            .await?;
        check_stock(&lines, &stock)?;

        let trucks = self.loader.pack(&lines).map_err(CoreError::from)?;

        self.db
            .stock()
            .remove_stock(request.warehouse_id, &stock_alterations(&lines))
            .await?;

        let response = OutboundOrderResponse::new(trucks);
        info!(trucks = response.number_of_trucks, "Outbound order dispatched");
        Ok(response)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use haulage_core::{GtinOrder, Grams, Product, StockAlteration, ValidationError};

    struct Fixture {
        db: Database,
        bricks: Product,
        sand: Product,
        leaflets: Product,
    }

    /// Warehouse 1 holds 10 bricks and 100 bags of sand; leaflets are in
    /// the catalog but not stocked.
    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let bricks = Product::new("0000", "Pallet of bricks", Grams::from_kilograms(900.0));
        let sand = Product::new("0001", "Bag of sand", Grams::from_kilograms(25.0));
        let leaflets = Product::new("0002", "Leaflets", Grams::from_grams(5.0));
        for product in [&bricks, &sand, &leaflets] {
            db.products().insert(product).await.unwrap();
        }
        db.stock()
            .add_stock(
                1,
                &[
                    StockAlteration::new(&bricks.id, 10),
                    StockAlteration::new(&sand.id, 100),
                ],
            )
            .await
            .unwrap();

        Fixture {
            db,
            bricks,
            sand,
            leaflets,
        }
    }

    fn order(warehouse_id: i64, lines: &[(&str, i64)]) -> OutboundOrderRequest {
        OutboundOrderRequest {
            warehouse_id,
            orders: lines
                .iter()
                .map(|(gtin, quantity)| GtinOrder {
                    gtin: gtin.to_string(),
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    async fn held(f: &Fixture) -> (i64, i64) {
        let levels = f
            .db
            .stock()
            .get_by_warehouse_and_products(1, &[f.bricks.id.clone(), f.sand.id.clone()])
            .await
            .unwrap();
        (levels[&f.bricks.id].held, levels[&f.sand.id].held)
    }

    #[tokio::test]
    async fn test_dispatch_packs_and_removes_stock() {
        let f = fixture().await;
        let service = f.db.outbound(TruckLoader::default());

        let response = service.process(&order(1, &[("0000", 5)])).await.unwrap();

        assert_eq!(response.number_of_trucks, 3);
        let sizes: Vec<usize> = response.truck_loads.iter().map(|t| t.len()).collect();
        assert_eq!(sizes, vec![1, 2, 2]);

        // Only the ordered product is touched
        assert_eq!(held(&f).await, (5, 100));
    }

    #[tokio::test]
    async fn test_dispatch_uses_configured_capacity() {
        let f = fixture().await;
        let service = f.db.outbound(TruckLoader::new(Grams::from_kilograms(1_000.0)));

        let response = service.process(&order(1, &[("0000", 2), ("0001", 4)])).await.unwrap();

        assert_eq!(response.number_of_trucks, 2);
        let units: usize = response.truck_loads.iter().map(|t| t.len()).sum();
        assert_eq!(units, 6);
        assert_eq!(held(&f).await, (8, 96));
    }

    #[tokio::test]
    async fn test_duplicate_gtin_rejected() {
        let f = fixture().await;
        let err = f
            .db
            .outbound(TruckLoader::default())
            .process(&order(1, &[("0000", 1), ("0000", 2)]))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("0000"));
        assert!(matches!(
            err,
            OutboundError::Core(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert_eq!(held(&f).await, (10, 100));
    }

    #[tokio::test]
    async fn test_unknown_gtin_rejected() {
        let f = fixture().await;
        let err = f
            .db
            .outbound(TruckLoader::default())
            .process(&order(1, &[("0000", 1), ("0000XYZ", 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Unknown product gtin: 0000XYZ");
        assert_eq!(held(&f).await, (10, 100));
    }

    #[tokio::test]
    async fn test_insufficient_stock_rejected() {
        let f = fixture().await;
        let err = f
            .db
            .outbound(TruckLoader::default())
            .process(&order(1, &[("0000", 11), ("0002", 1000)]))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Product: 0000, stock held: 10, stock to remove: 11"));
        assert!(message.contains(&format!("Product: {}, no stock held", f.leaflets.gtin)));
        assert_eq!(held(&f).await, (10, 100));
    }

    #[tokio::test]
    async fn test_oversize_unit_leaves_stock_untouched() {
        let f = fixture().await;
        let err = f
            .db
            .outbound(TruckLoader::new(Grams::from_kilograms(500.0)))
            .process(&order(1, &[("0001", 1), ("0000", 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OutboundError::Core(CoreError::Loading(_))
        ));
        assert_eq!(held(&f).await, (10, 100));
    }

    #[tokio::test]
    async fn test_invalid_warehouse_rejected() {
        let f = fixture().await;
        let err = f
            .db
            .outbound(TruckLoader::default())
            .process(&order(0, &[("0000", 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OutboundError::Core(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }

    #[tokio::test]
    async fn test_other_warehouse_has_no_stock() {
        let f = fixture().await;
        let err = f
            .db
            .outbound(TruckLoader::default())
            .process(&order(2, &[("0001", 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Product: 0001, no stock held");
    }
}
