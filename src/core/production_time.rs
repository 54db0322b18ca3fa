//! Production-time calculator.
//!
//! A product's production time is the sum of the hours it spends in each
//! workshop it is assigned to, rounded half-up to whole hours. The value stored
//! in `products.production_time` is never consulted.

use crate::{
    core::{assignment, raw_material::CalculationError},
    errors::{Error, Result},
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::ConnectionTrait;
use tracing::{debug, error, instrument};

/// Sums workshop hours and rounds to the nearest whole hour, halves away from
/// zero (2.5 → 3).
///
/// # Errors
/// Returns [`CalculationError::Overflow`] if the sum leaves the decimal range
/// or the rounded value does not fit an `i64`.
pub fn rounded_total_hours<I>(hours: I) -> std::result::Result<i64, CalculationError>
where
    I: IntoIterator<Item = Decimal>,
{
    let total = hours
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .ok_or(CalculationError::Overflow)?;
    total
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(CalculationError::Overflow)
}

/// Computes the production time of a product from its workshop assignments.
///
/// A product without assignments takes 0 hours. Unknown product IDs are not an
/// error; they simply have no assignments.
///
/// # Errors
/// Returns an error if the assignments cannot be read or the sum overflows.
#[instrument(skip(db))]
pub async fn total_production_time<C>(db: &C, product_id: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let assignments = assignment::get_assignments_for_product(db, product_id).await?;
    let hours = rounded_total_hours(assignments.iter().map(|a| a.time_in_workshop))
        .map_err(Error::from)?;
    debug!(assignments = assignments.len(), hours, "Production time computed");
    Ok(hours)
}

/// Production time for display code that must never fail.
///
/// Any error is logged and reported as 0 hours, matching what the product list
/// has always shown for a product it could not compute.
pub async fn production_time<C>(db: &C, product_id: i64) -> i64
where
    C: ConnectionTrait,
{
    match total_production_time(db, product_id).await {
        Ok(hours) => hours,
        Err(e) => {
            error!(product_id, "Failed to compute production time: {}", e);
            0
        }
    }
}
