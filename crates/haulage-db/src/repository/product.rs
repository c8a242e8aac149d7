//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! Products are looked up by GTIN when an outbound order arrives. An order
//! resolves all of its GTINs with a single `IN (...)` query.

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use haulage_core::Product;

const PRODUCT_COLUMNS: &str = "id, gtin, name, weight_grams, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// repo.insert(&Product::new("0000", "Bricks", Grams::from_kilograms(900.0))).await?;
/// let bricks = repo.get_by_gtin("0000").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The inserted product
    /// * `Err(DbError::UniqueViolation)` - GTIN already exists
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(gtin = %product.gtin, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, gtin, name, weight_grams, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.gtin)
        .bind(&product.name)
        .bind(product.weight_grams)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &product.gtin),
            other => other,
        })?;

        Ok(product.clone())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its GTIN.
    pub async fn get_by_gtin(&self, gtin: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE gtin = ?1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(gtin)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets every product whose GTIN is in `gtins`, keyed by GTIN.
    ///
    /// GTINs that are not in the catalog are simply absent from the map.
    pub async fn get_by_gtins(&self, gtins: &[String]) -> DbResult<HashMap<String, Product>> {
        if gtins.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM products WHERE gtin IN (",
            PRODUCT_COLUMNS
        ));
        let mut separated = query.separated(", ");
        for gtin in gtins {
            separated.push_bind(gtin.as_str());
        }
        separated.push_unseparated(")");

        let products: Vec<Product> = query.build_query_as().fetch_all(&self.pool).await?;

        debug!(requested = gtins.len(), found = products.len(), "Resolved GTINs");

        Ok(products
            .into_iter()
            .map(|product| (product.gtin.clone(), product))
            .collect())
    }

    /// Lists the catalog ordered by GTIN.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {} FROM products ORDER BY gtin", PRODUCT_COLUMNS);

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
