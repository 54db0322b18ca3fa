//! Shared test utilities.
//!
//! Helpers for setting up an in-memory catalog and creating entities with
//! sensible defaults.

use crate::{
    core::{material_type, product, product_type, workshop},
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::str::FromStr;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a decimal literal.
///
/// # Panics
/// Panics on malformed input; only ever called with literals.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Creates a product type with the given coefficient.
pub async fn create_custom_product_type(
    db: &DatabaseConnection,
    name: &str,
    coefficient: Decimal,
) -> Result<entities::product_type::Model> {
    product_type::create_product_type(db, name, coefficient).await
}

/// Creates a material type with the given waste fraction.
pub async fn create_custom_material_type(
    db: &DatabaseConnection,
    name: &str,
    waste_percentage: Decimal,
) -> Result<entities::material_type::Model> {
    material_type::create_material_type(db, name, waste_percentage).await
}

/// Creates a workshop with one worker.
pub async fn create_test_workshop(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::workshop::Model> {
    workshop::create_workshop(db, name, 1).await
}

/// Builds a valid product input.
///
/// # Defaults
/// * `name`: "Test Product"
/// * `min_cost_for_partner`: 100
/// * `parameter1`, `parameter2`: 1
#[must_use]
pub fn product_input(
    article: &str,
    product_type_id: i64,
    main_material_id: Option<i64>,
) -> product::ProductInput {
    product::ProductInput {
        article: article.to_string(),
        name: "Test Product".to_string(),
        description: None,
        product_type_id,
        main_material_id,
        min_cost_for_partner: Decimal::ONE_HUNDRED,
        parameter1: Some(Decimal::ONE),
        parameter2: Some(Decimal::ONE),
    }
}

/// Sets up a database with one product type (coefficient 1) and one material
/// type (waste 0.1).
pub async fn setup_with_reference_data() -> Result<(
    DatabaseConnection,
    entities::product_type::Model,
    entities::material_type::Model,
)> {
    let db = setup_test_db().await?;
    let product_type = create_custom_product_type(&db, "Test Type", Decimal::ONE).await?;
    let material = create_custom_material_type(&db, "Test Material", dec("0.1")).await?;
    Ok((db, product_type, material))
}

/// Sets up a database with reference data and a single product.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let (db, product_type, material) = setup_with_reference_data().await?;
    let product = product::create_product(
        &db,
        product_input("TEST-001", product_type.id, Some(material.id)),
    )
    .await?;
    Ok((db, product))
}
