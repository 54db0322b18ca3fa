//! Product entity - a manufactured item identified by its article.
//!
//! Each product belongs to one product type and optionally names its main
//! material. `parameter1` and `parameter2` are the linear dimensions used by
//! the raw-material estimator. `production_time` is a stored column that is
//! not kept in sync with the workshop assignments; the production-time
//! calculator always recomputes from the assignments instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Article number, unique across all products
    #[sea_orm(unique)]
    pub article: String,
    /// ID of the product type
    pub product_type_id: i64,
    /// Product name
    pub name: String,
    /// Free-form description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Minimum price offered to partners
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub min_cost_for_partner: Decimal,
    /// ID of the main material, if one is assigned
    pub main_material_id: Option<i64>,
    /// First linear dimension
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub parameter1: Decimal,
    /// Second linear dimension
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub parameter2: Decimal,
    /// Stored production time in hours (not auto-maintained)
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub production_time: Decimal,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one product type
    #[sea_orm(
        belongs_to = "super::product_type::Entity",
        from = "Column::ProductTypeId",
        to = "super::product_type::Column::Id"
    )]
    ProductType,
    /// Each product references at most one main material
    #[sea_orm(
        belongs_to = "super::material_type::Entity",
        from = "Column::MainMaterialId",
        to = "super::material_type::Column::Id"
    )]
    MainMaterial,
    /// Workshop assignments of this product
    #[sea_orm(has_many = "super::product_workshop::Entity")]
    ProductWorkshops,
}

impl Related<super::product_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductType.def()
    }
}

impl Related<super::material_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MainMaterial.def()
    }
}

impl Related<super::product_workshop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductWorkshops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
