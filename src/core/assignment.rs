//! Product/workshop assignment operations.
//!
//! An assignment records how long a product spends in one workshop and how
//! many people work on it there. A product may pass through a workshop only
//! once, so the (product, workshop) pair is unique.

use crate::{
    core::{product, workshop},
    entities::{ProductWorkshop, Workshop, product_workshop, workshop as workshop_entity},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// An assignment joined with the workshop it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopAssignment {
    /// The assignment row
    pub assignment: product_workshop::Model,
    /// The workshop the product passes through
    pub workshop: workshop_entity::Model,
}

fn validate_assignment(time_in_workshop: Decimal, worker_count: i32) -> Result<()> {
    if time_in_workshop < Decimal::ZERO {
        return Err(Error::Validation {
            message: format!("Time in workshop cannot be negative: {time_in_workshop}"),
        });
    }
    if worker_count < 1 {
        return Err(Error::Validation {
            message: format!("Worker count must be at least 1: {worker_count}"),
        });
    }
    Ok(())
}

/// Retrieves the raw assignment rows of a product.
pub async fn get_assignments_for_product<C>(
    db: &C,
    product_id: i64,
) -> Result<Vec<product_workshop::Model>>
where
    C: ConnectionTrait,
{
    ProductWorkshop::find()
        .filter(product_workshop::Column::ProductId.eq(product_id))
        .order_by_asc(product_workshop::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every assignment of a product with its workshop, ordered by
/// workshop name.
pub async fn get_workshops_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<WorkshopAssignment>> {
    let rows = ProductWorkshop::find()
        .filter(product_workshop::Column::ProductId.eq(product_id))
        .find_also_related(Workshop)
        .order_by_asc(workshop_entity::Column::Name)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(assignment, workshop)| {
            let workshop = workshop.ok_or(Error::WorkshopNotFound {
                id: assignment.workshop_id,
            })?;
            Ok(WorkshopAssignment {
                assignment,
                workshop,
            })
        })
        .collect()
}

/// Finds the assignment of a product to a workshop, if any.
pub async fn get_assignment<C>(
    db: &C,
    product_id: i64,
    workshop_id: i64,
) -> Result<Option<product_workshop::Model>>
where
    C: ConnectionTrait,
{
    ProductWorkshop::find()
        .filter(product_workshop::Column::ProductId.eq(product_id))
        .filter(product_workshop::Column::WorkshopId.eq(workshop_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Assigns a product to a workshop.
///
/// # Errors
/// Returns an error if:
/// - The time is negative or the worker count is below 1
/// - The product or the workshop does not exist
/// - The product is already assigned to this workshop
/// - The database insert fails
#[instrument(skip(db))]
pub async fn assign_workshop<C>(
    db: &C,
    product_id: i64,
    workshop_id: i64,
    time_in_workshop: Decimal,
    worker_count: i32,
) -> Result<product_workshop::Model>
where
    C: ConnectionTrait,
{
    validate_assignment(time_in_workshop, worker_count)?;

    if product::get_product_by_id(db, product_id).await?.is_none() {
        return Err(Error::ProductNotFound { id: product_id });
    }
    if workshop::get_workshop_by_id(db, workshop_id)
        .await?
        .is_none()
    {
        return Err(Error::WorkshopNotFound { id: workshop_id });
    }
    if get_assignment(db, product_id, workshop_id).await?.is_some() {
        return Err(Error::Duplicate {
            entity: "Workshop assignment",
            value: format!("product {product_id} / workshop {workshop_id}"),
        });
    }

    debug!("Creating workshop assignment");
    product_workshop::ActiveModel {
        product_id: Set(product_id),
        workshop_id: Set(workshop_id),
        time_in_workshop: Set(time_in_workshop),
        worker_count: Set(worker_count),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Changes the time and worker count of an existing assignment.
pub async fn update_assignment(
    db: &DatabaseConnection,
    assignment_id: i64,
    time_in_workshop: Decimal,
    worker_count: i32,
) -> Result<product_workshop::Model> {
    validate_assignment(time_in_workshop, worker_count)?;

    let mut assignment: product_workshop::ActiveModel = ProductWorkshop::find_by_id(assignment_id)
        .one(db)
        .await?
        .ok_or(Error::AssignmentNotFound { id: assignment_id })?
        .into();

    assignment.time_in_workshop = Set(time_in_workshop);
    assignment.worker_count = Set(worker_count);
    assignment.update(db).await.map_err(Into::into)
}

/// Removes an assignment.
pub async fn remove_assignment(db: &DatabaseConnection, assignment_id: i64) -> Result<()> {
    let result = ProductWorkshop::delete_by_id(assignment_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::AssignmentNotFound { id: assignment_id });
    }
    Ok(())
}
