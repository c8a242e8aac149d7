//! Subcommand implementations.
//!
//! Every command prints pretty JSON on stdout (TOML for `config`).

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use haulage_core::validation::{
    validate_capacity, validate_gtin, validate_product_name, validate_quantity, validate_warehouse_id,
    validate_weight,
};
use haulage_core::{
    Grams, OrderLine, OutboundOrderRequest, OutboundOrderResponse, Product, ProductRef,
    StatusSummary, StockAlteration, TruckLoad, TruckLoader,
};
use haulage_db::{Database, DbConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;

/// One line of `haulage pack` input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackLine {
    pub gtin: String,
    #[serde(alias = "weight_grams")]
    pub weight_grams: f64,
    pub quantity: i64,
}

/// One row of `haulage stock` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    pub gtin: String,
    pub name: String,
    pub held: i64,
}

/// Runs the parsed command.
pub async fn execute(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }

        Commands::Pack {
            input,
            capacity_grams,
        } => {
            let lines: Vec<PackLine> = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Invalid pack input")?;
            let capacity = capacity_grams.map_or(config.truck_capacity(), Grams::from_grams);
            let response = pack(&lines, capacity)?;
            print_json(&response)?;
        }

        Commands::AddProduct {
            gtin,
            name,
            weight_grams,
        } => {
            let db = connect(&config).await?;
            let product = add_product(&db, &gtin, &name, Grams::from_grams(weight_grams)).await?;
            print_json(&product)?;
        }

        Commands::AddStock {
            warehouse,
            gtin,
            quantity,
        } => {
            let db = connect(&config).await?;
            add_stock(&db, warehouse, &gtin, quantity).await?;
            print_json(&stock_report(&db, warehouse).await?)?;
        }

        Commands::Stock { warehouse } => {
            let db = connect(&config).await?;
            print_json(&stock_report(&db, warehouse).await?)?;
        }

        Commands::Status => {
            let db = connect(&config).await?;
            print_json(&status(&db).await?)?;
        }

        Commands::Dispatch { order } => {
            let request: OutboundOrderRequest = serde_json::from_str(&read_input(order.as_deref())?)
                .context("Invalid outbound order")?;
            let db = connect(&config).await?;
            let response = db.outbound(config.loader()).process(&request).await?;
            print_json(&response)?;
        }
    }

    Ok(())
}

async fn connect(config: &AppConfig) -> Result<Database> {
    if let Some(parent) = config.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }
    }

    let db_config =
        DbConfig::new(&config.database.path).max_connections(config.database.max_connections);
    Ok(Database::new(db_config).await?)
}

/// Packs ad-hoc lines; each GTIN stands in for its product id.
pub fn pack(lines: &[PackLine], capacity: Grams) -> Result<OutboundOrderResponse> {
    validate_capacity(capacity)?;

    let order_lines = lines
        .iter()
        .map(|line| -> Result<OrderLine> {
            validate_weight(Grams::from_grams(line.weight_grams))?;
            let product = ProductRef::new(&line.gtin, &line.gtin, Grams::from_grams(line.weight_grams));
            Ok(OrderLine::new(product, line.quantity))
        })
        .collect::<Result<Vec<_>>>()?;

    let trucks: Vec<TruckLoad> = TruckLoader::new(capacity).pack(&order_lines)?;
    Ok(OutboundOrderResponse::new(trucks))
}

pub async fn add_product(db: &Database, gtin: &str, name: &str, weight: Grams) -> Result<Product> {
    validate_gtin(gtin)?;
    validate_product_name(name)?;
    validate_weight(weight)?;

    let product = db
        .products()
        .insert(&Product::new(gtin.trim(), name.trim(), weight))
        .await?;

    info!(gtin = %product.gtin, id = %product.id, "Product added");
    Ok(product)
}

pub async fn add_stock(db: &Database, warehouse_id: i64, gtin: &str, quantity: i64) -> Result<()> {
    validate_warehouse_id(warehouse_id)?;
    validate_quantity(quantity)?;

    let product = db
        .products()
        .get_by_gtin(gtin)
        .await?
        .ok_or_else(|| anyhow!("Unknown product gtin: {}", gtin))?;

    db.stock()
        .add_stock(warehouse_id, &[StockAlteration::new(product.id, quantity)])
        .await?;
    Ok(())
}

/// The warehouse's stock with catalog details, ordered by GTIN.
pub async fn stock_report(db: &Database, warehouse_id: i64) -> Result<Vec<StockRow>> {
    validate_warehouse_id(warehouse_id)?;

    let catalog: HashMap<String, Product> = db
        .products()
        .list()
        .await?
        .into_iter()
        .map(|product| (product.id.clone(), product))
        .collect();

    let mut rows: Vec<StockRow> = db
        .stock()
        .get_by_warehouse(warehouse_id)
        .await?
        .into_iter()
        .filter_map(|level| {
            catalog.get(&level.product_id).map(|product| StockRow {
                gtin: product.gtin.clone(),
                name: product.name.clone(),
                held: level.held,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.gtin.cmp(&b.gtin));

    Ok(rows)
}

/// Product count plus stock totals over every warehouse.
pub async fn status(db: &Database) -> Result<StatusSummary> {
    let product_count = db.products().count().await?;
    let totals = db.stock().totals().await?;
    Ok(StatusSummary::new(product_count, totals))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Cannot read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
