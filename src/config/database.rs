//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. The one constraint SeaORM
//! entities cannot express, the unique (product, workshop) pair, is added as a
//! separate index.

use crate::entities::{
    MaterialType, Product, ProductType, ProductWorkshop, Workshop, product_workshop,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Fallback database location when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/production_catalog.sqlite?mode=rwc";

/// Name of the unique index guarding (`product_id`, `workshop_id`).
pub const PRODUCT_WORKSHOP_UNIQUE_INDEX: &str = "uq_product_workshop";

/// Resolves the database URL.
///
/// Precedence: explicit override (CLI flag), then the `DATABASE_URL`
/// environment variable, then the value from `config.toml`, then
/// [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url(override_url: Option<&str>, configured: Option<&str>) -> String {
    if let Some(url) = override_url {
        return url.to_string();
    }
    std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        configured.map_or_else(|| DEFAULT_DATABASE_URL.to_string(), ToString::to_string)
    })
}

/// Establishes a connection to the database at `database_url`.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all catalog tables if they do not exist yet.
///
/// Parents are created before children so foreign keys resolve: product
/// types, material types and workshops first, then products, then the
/// product/workshop assignments and their unique pair index.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, ProductType).await?;
    create_table(db, &schema, MaterialType).await?;
    create_table(db, &schema, Workshop).await?;
    create_table(db, &schema, Product).await?;
    create_table(db, &schema, ProductWorkshop).await?;

    let pair_index = Index::create()
        .name(PRODUCT_WORKSHOP_UNIQUE_INDEX)
        .table(ProductWorkshop)
        .col(product_workshop::Column::ProductId)
        .col(product_workshop::Column::WorkshopId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&pair_index)).await?;

    info!("Catalog tables ensured");
    Ok(())
}

async fn create_table<C, E>(db: &C, schema: &Schema, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(db.get_database_backend().build(&statement)).await?;
    Ok(())
}
