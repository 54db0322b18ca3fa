//! `calc` command - raw-material estimate for a batch.

use crate::core::raw_material::{self, CalculationError};
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::fmt::Write;

/// Arguments of the `calc` command
#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    /// Product type ID
    pub product_type_id: i64,

    /// Material type ID
    pub material_type_id: i64,

    /// Number of products in the batch
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,

    /// First product dimension
    #[arg(allow_negative_numbers = true)]
    pub param1: Decimal,

    /// Second product dimension
    #[arg(allow_negative_numbers = true)]
    pub param2: Decimal,
}

/// Runs the estimator and renders the amount with its breakdown.
///
/// # Errors
/// Returns [`Error::Calculation`] with the reason the estimate failed.
pub async fn run(db: &DatabaseConnection, args: &CalcArgs) -> Result<String> {
    let estimate = raw_material::estimate_raw_material(
        db,
        args.product_type_id,
        args.material_type_id,
        args.quantity,
        args.param1,
        args.param2,
    )
    .await
    .map_err(|e| match e {
        CalculationError::Database(db_err) => Error::Database(db_err),
        other => Error::Calculation(other),
    })?;

    let mut out = String::new();
    let _ = writeln!(out, "Area:                {}", estimate.area);
    let _ = writeln!(out, "Base material:       {}", estimate.base_material);
    let _ = writeln!(out, "Waste factor:        {}", estimate.waste_factor);
    let _ = writeln!(out, "Total before round:  {}", estimate.total_material);
    let _ = writeln!(out, "✅ Raw material required: {}", estimate.amount);
    Ok(out)
}
