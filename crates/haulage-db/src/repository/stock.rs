//! # Stock Repository
//!
//! Units of each product held per warehouse.
//!
//! ## Guarded Removal
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  remove_stock(warehouse, [(product, qty), ...])                        │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │   ├── UPDATE stock SET held = held - qty                               │
//! │   │   WHERE warehouse_id = ? AND product_id = ? AND held >= qty        │
//! │   │        │                                                            │
//! │   │        ├── 1 row  → next alteration                                │
//! │   │        └── 0 rows → ROLLBACK, DbError::StockConflict               │
//! │   └── ...                                                               │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is never driven negative, even when two dispatches for the same
//! warehouse race between their stock check and their write.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use haulage_core::{StockAlteration, StockLevel, StockTotals};

/// Repository for warehouse stock.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// All stock rows of a warehouse, ordered by product id.
    pub async fn get_by_warehouse(&self, warehouse_id: i64) -> DbResult<Vec<StockLevel>> {
        let levels = sqlx::query_as::<_, StockLevel>(
            r#"
            SELECT warehouse_id, product_id, held
            FROM stock
            WHERE warehouse_id = ?1
            ORDER BY product_id
            "#,
        )
        .bind(warehouse_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(levels)
    }

    /// Stock rows of a warehouse for the given products, keyed by product id.
    ///
    /// Products with no stock row are absent from the map.
    pub async fn get_by_warehouse_and_products(
        &self,
        warehouse_id: i64,
        product_ids: &[String],
    ) -> DbResult<HashMap<String, StockLevel>> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT warehouse_id, product_id, held FROM stock WHERE warehouse_id = ",
        );
        query.push_bind(warehouse_id);
        query.push(" AND product_id IN (");
        let mut separated = query.separated(", ");
        for product_id in product_ids {
            separated.push_bind(product_id.as_str());
        }
        separated.push_unseparated(")");

        let levels: Vec<StockLevel> = query.build_query_as().fetch_all(&self.pool).await?;

        Ok(levels
            .into_iter()
            .map(|level| (level.product_id.clone(), level))
            .collect())
    }

    /// Adds stock, creating rows for products the warehouse has never held.
    ///
    /// All alterations are applied in one transaction.
    pub async fn add_stock(&self, warehouse_id: i64, alterations: &[StockAlteration]) -> DbResult<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for alteration in alterations {
            debug!(
                warehouse_id,
                product_id = %alteration.product_id,
                quantity = alteration.quantity,
                "Adding stock"
            );

            sqlx::query(
                r#"
                INSERT INTO stock (warehouse_id, product_id, held, updated_at)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT (warehouse_id, product_id)
                DO UPDATE SET held = held + excluded.held, updated_at = excluded.updated_at
                "#,
            )
            .bind(warehouse_id)
            .bind(&alteration.product_id)
            .bind(alteration.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(warehouse_id, lines = alterations.len(), "Stock added");
        Ok(())
    }

    /// Row, unit and warehouse counts over the whole stock table.
    pub async fn totals(&self) -> DbResult<StockTotals> {
        let totals = sqlx::query_as::<_, StockTotals>(
            r#"
            SELECT
                COUNT(DISTINCT warehouse_id) AS warehouse_count,
                COUNT(*) AS items_tracked,
                COALESCE(SUM(held), 0) AS stock_held
            FROM stock
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        debug!(?totals, "Stock totals");
        Ok(totals)
    }

    /// Removes stock for every alteration, or for none of them.
    ///
    /// ## Returns
    /// * `Ok(())` - Every decrement applied
    /// * `Err(DbError::StockConflict)` - A row held less than requested (or
    ///   did not exist); nothing was changed
    pub async fn remove_stock(
        &self,
        warehouse_id: i64,
        alterations: &[StockAlteration],
    ) -> DbResult<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for alteration in alterations {
            let result = sqlx::query(
                r#"
                UPDATE stock
                SET held = held - ?3, updated_at = ?4
                WHERE warehouse_id = ?1 AND product_id = ?2 AND held >= ?3
                "#,
            )
            .bind(warehouse_id)
            .bind(&alteration.product_id)
            .bind(alteration.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                warn!(
                    warehouse_id,
                    product_id = %alteration.product_id,
                    quantity = alteration.quantity,
                    "Stock removal guard failed, rolling back"
                );
                tx.rollback().await?;
                return Err(DbError::StockConflict {
                    warehouse_id,
                    product_id: alteration.product_id.clone(),
                });
            }
        }

        tx.commit().await?;

        info!(warehouse_id, lines = alterations.len(), "Stock removed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
