//! Raw-material estimator.
//!
//! Estimates how much raw material a batch of products needs:
//!
//! ```text
//! area           = param1 * param2
//! base_material  = area * product_type.coefficient
//! waste_factor   = 1 + material_type.waste_percentage
//! total_material = base_material * waste_factor * quantity
//! amount         = ceil(total_material)
//! ```
//!
//! All arithmetic is exact decimal arithmetic, so a total that is an integer is
//! never bumped to the next one. Inputs are checked in a fixed order and the
//! first failure is reported: product type, material type, `param1`, `param2`,
//! quantity.

use crate::entities::{MaterialType, ProductType};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Value returned by [`estimate_raw_material_or_sentinel`] when no estimate
/// can be produced.
pub const ESTIMATE_FAILED: i64 = -1;

/// Why an estimate could not be produced.
#[derive(Debug, Error)]
pub enum CalculationError {
    /// The product type ID does not exist
    #[error("Product type {id} not found")]
    ProductTypeNotFound {
        /// Requested product type id
        id: i64,
    },

    /// The material type ID does not exist
    #[error("Material type {id} not found")]
    MaterialTypeNotFound {
        /// Requested material type id
        id: i64,
    },

    /// One of the two dimensions is zero or negative
    #[error("Parameter {index} must be positive, got {value}")]
    NonPositiveParameter {
        /// 1 or 2
        index: u8,
        /// The rejected value
        value: Decimal,
    },

    /// The batch size is zero or negative
    #[error("Quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// An intermediate or final value left the representable range
    #[error("Calculation overflowed")]
    Overflow,

    /// The reference data could not be read
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A successful estimate with its intermediate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialEstimate {
    /// `param1 * param2`
    pub area: Decimal,
    /// Area scaled by the product type coefficient
    pub base_material: Decimal,
    /// `1 + waste_percentage`
    pub waste_factor: Decimal,
    /// Material for the whole batch before rounding
    pub total_material: Decimal,
    /// `total_material` rounded up to a whole unit
    pub amount: i64,
}

/// Runs the estimate on already-resolved reference values.
///
/// # Errors
/// Returns the first failing check among `param1`, `param2` and `quantity`,
/// or [`CalculationError::Overflow`].
pub fn compute_raw_material(
    coefficient: Decimal,
    waste_percentage: Decimal,
    quantity: i64,
    param1: Decimal,
    param2: Decimal,
) -> Result<MaterialEstimate, CalculationError> {
    if param1 <= Decimal::ZERO {
        return Err(CalculationError::NonPositiveParameter {
            index: 1,
            value: param1,
        });
    }
    if param2 <= Decimal::ZERO {
        return Err(CalculationError::NonPositiveParameter {
            index: 2,
            value: param2,
        });
    }
    if quantity <= 0 {
        return Err(CalculationError::NonPositiveQuantity { quantity });
    }

    let area = param1
        .checked_mul(param2)
        .ok_or(CalculationError::Overflow)?;
    let base_material = area
        .checked_mul(coefficient)
        .ok_or(CalculationError::Overflow)?;
    let waste_factor = Decimal::ONE
        .checked_add(waste_percentage)
        .ok_or(CalculationError::Overflow)?;
    let total_material = base_material
        .checked_mul(waste_factor)
        .and_then(|m| m.checked_mul(Decimal::from(quantity)))
        .ok_or(CalculationError::Overflow)?;
    let amount = total_material
        .ceil()
        .to_i64()
        .ok_or(CalculationError::Overflow)?;

    Ok(MaterialEstimate {
        area,
        base_material,
        waste_factor,
        total_material,
        amount,
    })
}

/// Estimates raw material for a batch, reading the coefficient and waste
/// fraction from the catalog.
///
/// # Errors
/// Returns a [`CalculationError`] describing the first failed check, or the
/// database error that prevented reading the reference data.
#[instrument(skip(db))]
pub async fn estimate_raw_material<C>(
    db: &C,
    product_type_id: i64,
    material_type_id: i64,
    quantity: i64,
    param1: Decimal,
    param2: Decimal,
) -> Result<MaterialEstimate, CalculationError>
where
    C: ConnectionTrait,
{
    let product_type = ProductType::find_by_id(product_type_id)
        .one(db)
        .await?
        .ok_or(CalculationError::ProductTypeNotFound {
            id: product_type_id,
        })?;
    let material_type = MaterialType::find_by_id(material_type_id)
        .one(db)
        .await?
        .ok_or(CalculationError::MaterialTypeNotFound {
            id: material_type_id,
        })?;

    debug!(
        product_type = %product_type.name,
        material_type = %material_type.name,
        coefficient = %product_type.coefficient,
        waste_percentage = %material_type.waste_percentage,
        "Resolved reference data"
    );

    let estimate = compute_raw_material(
        product_type.coefficient,
        material_type.waste_percentage,
        quantity,
        param1,
        param2,
    )?;

    debug!(
        area = %estimate.area,
        base_material = %estimate.base_material,
        waste_factor = %estimate.waste_factor,
        total_material = %estimate.total_material,
        amount = estimate.amount,
        "Raw material estimated"
    );
    Ok(estimate)
}

/// Estimate for callers that only understand a single integer: the amount on
/// success, [`ESTIMATE_FAILED`] on any failure. The reason is logged.
pub async fn estimate_raw_material_or_sentinel<C>(
    db: &C,
    product_type_id: i64,
    material_type_id: i64,
    quantity: i64,
    param1: Decimal,
    param2: Decimal,
) -> i64
where
    C: ConnectionTrait,
{
    match estimate_raw_material(db, product_type_id, material_type_id, quantity, param1, param2)
        .await
    {
        Ok(estimate) => estimate.amount,
        Err(e) => {
            warn!("Raw material estimate failed: {}", e);
            ESTIMATE_FAILED
        }
    }
}
