//! Product type entity - a classification of manufactured goods.
//!
//! Every product type carries the coefficient that converts a product's area
//! into the base quantity of raw material it consumes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product type database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_types")]
pub struct Model {
    /// Unique identifier for the product type
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Ламинат")
    #[sea_orm(unique)]
    pub name: String,
    /// Area-to-material multiplier, never negative
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub coefficient: Decimal,
}

/// Defines relationships between `ProductType` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product type has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
