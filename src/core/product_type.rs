//! Product type operations.
//!
//! Product types are reference data: the bulk import creates them and the rest
//! of the catalog only reads them.

use crate::{
    entities::{ProductType, product_type},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Retrieves all product types ordered alphabetically by name.
pub async fn get_all_product_types(db: &DatabaseConnection) -> Result<Vec<product_type::Model>> {
    ProductType::find()
        .order_by_asc(product_type::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a product type by its ID.
pub async fn get_product_type_by_id<C>(
    db: &C,
    product_type_id: i64,
) -> Result<Option<product_type::Model>>
where
    C: ConnectionTrait,
{
    ProductType::find_by_id(product_type_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product type by its exact name.
pub async fn get_product_type_by_name<C>(
    db: &C,
    name: &str,
) -> Result<Option<product_type::Model>>
where
    C: ConnectionTrait,
{
    ProductType::find()
        .filter(product_type::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a product type.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The coefficient is negative
/// - A product type with the same name exists
/// - The database insert fails
pub async fn create_product_type<C>(
    db: &C,
    name: &str,
    coefficient: Decimal,
) -> Result<product_type::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Product type name cannot be empty".to_string(),
        });
    }
    if coefficient < Decimal::ZERO {
        return Err(Error::Validation {
            message: format!("Product type coefficient cannot be negative: {coefficient}"),
        });
    }
    if get_product_type_by_name(db, name).await?.is_some() {
        return Err(Error::Duplicate {
            entity: "Product type",
            value: name.to_string(),
        });
    }

    debug!(name, %coefficient, "Creating product type");
    product_type::ActiveModel {
        name: Set(name.to_string()),
        coefficient: Set(coefficient),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
