//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "haulage")]
#[command(version)]
#[command(about = "Split outbound orders into capacity-bounded truck loads")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: haulage.toml in the platform config directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overrides the configured path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a product to the catalog
    AddProduct {
        /// Product GTIN (digits only)
        #[arg(long)]
        gtin: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Weight of one unit in grams
        #[arg(long)]
        weight_grams: f64,
    },

    /// Add stock of a product to a warehouse
    AddStock {
        #[arg(long, short = 'w')]
        warehouse: i64,

        #[arg(long)]
        gtin: String,

        #[arg(long, short = 'q')]
        quantity: i64,
    },

    /// Show the stock held by a warehouse
    Stock {
        #[arg(long, short = 'w')]
        warehouse: i64,
    },

    /// Summarize the catalog and stock over all warehouses
    Status,

    /// Pack order lines into trucks without touching the database
    ///
    /// Input: JSON array of {"gtin", "weightGrams", "quantity"}
    Pack {
        /// JSON file with the lines; stdin when omitted
        input: Option<PathBuf>,

        /// Truck capacity in grams, overrides the configured capacity
        #[arg(long)]
        capacity_grams: Option<f64>,
    },

    /// Dispatch an outbound order: check stock, pack, remove stock
    ///
    /// Input: {"warehouseId": 1, "orders": [{"gtin": "0000", "quantity": 3}]}
    Dispatch {
        /// JSON file with the order; stdin when omitted
        order: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}
