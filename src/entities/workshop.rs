//! Workshop entity - a production stage with its own staff.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Workshop database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshops")]
pub struct Model {
    /// Unique identifier for the workshop
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Workshop name
    #[sea_orm(unique)]
    pub name: String,
    /// Number of people working in the workshop
    pub worker_count: i32,
}

/// Defines relationships between Workshop and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Products processed in this workshop
    #[sea_orm(has_many = "super::product_workshop::Entity")]
    ProductWorkshops,
}

impl Related<super::product_workshop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductWorkshops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
