//! Product workshop entity - links a product to a workshop it passes through.
//!
//! A product appears at most once per workshop; the pair is guarded by the
//! `uq_product_workshop` index created alongside the tables.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product/workshop assignment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_workshops")]
pub struct Model {
    /// Unique identifier for the assignment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product
    pub product_id: i64,
    /// ID of the workshop
    pub workshop_id: i64,
    /// Hours the product spends in this workshop
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub time_in_workshop: Decimal,
    /// People assigned to this product in this workshop
    pub worker_count: i32,
}

/// Defines relationships between `ProductWorkshop` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each assignment belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each assignment belongs to one workshop
    #[sea_orm(
        belongs_to = "super::workshop::Entity",
        from = "Column::WorkshopId",
        to = "super::workshop::Column::Id"
    )]
    Workshop,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::workshop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workshop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
