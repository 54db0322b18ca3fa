//! Material type entity - a raw material category.
//!
//! `waste_percentage` is stored as a fraction: 0.008 means 0.8% of the
//! material is lost to scrap.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Material type database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_types")]
pub struct Model {
    /// Unique identifier for the material type
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the material
    #[sea_orm(unique)]
    pub name: String,
    /// Scrap fraction applied on top of the base material need
    #[sea_orm(column_type = "Decimal(Some((5, 4)))")]
    pub waste_percentage: Decimal,
}

/// Defines relationships between `MaterialType` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Products using this material as their main material
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
