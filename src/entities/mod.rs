//! Entity module - SeaORM definitions for the catalog tables.
//! Reference tables (product types, material types, workshops) are filled by the
//! bulk import; products and their workshop assignments are edited by users.

pub mod material_type;
pub mod product;
pub mod product_type;
pub mod product_workshop;
pub mod workshop;

// Re-export specific types to avoid conflicts
pub use material_type::{
    Column as MaterialTypeColumn, Entity as MaterialType, Model as MaterialTypeModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_type::{
    Column as ProductTypeColumn, Entity as ProductType, Model as ProductTypeModel,
};
pub use product_workshop::{
    Column as ProductWorkshopColumn, Entity as ProductWorkshop, Model as ProductWorkshopModel,
};
pub use workshop::{Column as WorkshopColumn, Entity as Workshop, Model as WorkshopModel};
