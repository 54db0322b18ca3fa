//! Material type operations.

use crate::{
    entities::{MaterialType, material_type},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Retrieves all material types ordered alphabetically by name.
pub async fn get_all_material_types(
    db: &DatabaseConnection,
) -> Result<Vec<material_type::Model>> {
    MaterialType::find()
        .order_by_asc(material_type::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a material type by its ID.
pub async fn get_material_type_by_id<C>(
    db: &C,
    material_type_id: i64,
) -> Result<Option<material_type::Model>>
where
    C: ConnectionTrait,
{
    MaterialType::find_by_id(material_type_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a material type by its exact name.
pub async fn get_material_type_by_name<C>(
    db: &C,
    name: &str,
) -> Result<Option<material_type::Model>>
where
    C: ConnectionTrait,
{
    MaterialType::find()
        .filter(material_type::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a material type. `waste_percentage` must already be a fraction
/// (see [`crate::import::waste::normalize_waste_percentage`]).
///
/// # Errors
/// Returns an error if the name is empty, the waste fraction is negative, the
/// name is taken, or the insert fails.
pub async fn create_material_type<C>(
    db: &C,
    name: &str,
    waste_percentage: Decimal,
) -> Result<material_type::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Material type name cannot be empty".to_string(),
        });
    }
    if waste_percentage < Decimal::ZERO {
        return Err(Error::Validation {
            message: format!("Waste percentage cannot be negative: {waste_percentage}"),
        });
    }
    if get_material_type_by_name(db, name).await?.is_some() {
        return Err(Error::Duplicate {
            entity: "Material type",
            value: name.to_string(),
        });
    }

    debug!(name, %waste_percentage, "Creating material type");
    material_type::ActiveModel {
        name: Set(name.to_string()),
        waste_percentage: Set(waste_percentage),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
