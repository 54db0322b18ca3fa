//! Command-line interface - argument definitions and dispatch.
//!
//! Every command handler renders its result into a `String`; `run` prints it.
//! Handlers never print directly so they can be exercised in tests.

/// Command implementations (catalog listings, products, calculator, import)
pub mod commands;

use crate::config::{AppConfig, settings::DEFAULT_CONFIG_PATH};
use crate::errors::Result;
use clap::{Parser, Subcommand};
use commands::{calc::CalcArgs, import::ImportArgs, product::ProductCommands};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;

/// Production catalog command line
#[derive(Parser, Debug)]
#[command(name = "production-catalog", version)]
#[command(about = "Product, material and workshop catalog with production calculators")]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Database URL (overrides `DATABASE_URL` and config.toml)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Path to config.toml
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the catalog tables
    Init,

    /// Replace the catalog with the CSV sheets in a directory
    Import(ImportArgs),

    /// List product types
    Types,

    /// List material types
    Materials,

    /// List workshops
    Workshops,

    /// Product management
    #[command(subcommand)]
    Product(ProductCommands),

    /// Estimate raw material for a batch of products
    Calc(CalcArgs),
}

/// Executes a parsed command and returns the text to print.
pub async fn run(command: Commands, db: &DatabaseConnection, config: &AppConfig) -> Result<String> {
    match command {
        Commands::Init => Ok("✅ Catalog tables are ready.".to_string()),
        Commands::Import(args) => commands::import::run(db, args, &config.import).await,
        Commands::Types => commands::catalog::list_product_types(db).await,
        Commands::Materials => commands::catalog::list_material_types(db).await,
        Commands::Workshops => commands::catalog::list_workshops(db).await,
        Commands::Product(cmd) => commands::product::run(db, cmd).await,
        Commands::Calc(args) => commands::calc::run(db, &args).await,
    }
}
