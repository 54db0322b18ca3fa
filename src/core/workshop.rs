//! Workshop operations.

use crate::{
    entities::{Workshop, workshop},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all workshops ordered alphabetically by name.
pub async fn get_all_workshops(db: &DatabaseConnection) -> Result<Vec<workshop::Model>> {
    Workshop::find()
        .order_by_asc(workshop::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a workshop by its ID.
pub async fn get_workshop_by_id<C>(db: &C, workshop_id: i64) -> Result<Option<workshop::Model>>
where
    C: ConnectionTrait,
{
    Workshop::find_by_id(workshop_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a workshop by its exact name.
pub async fn get_workshop_by_name<C>(db: &C, name: &str) -> Result<Option<workshop::Model>>
where
    C: ConnectionTrait,
{
    Workshop::find()
        .filter(workshop::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a workshop with a unique, non-empty name.
pub async fn create_workshop<C>(db: &C, name: &str, worker_count: i32) -> Result<workshop::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Workshop name cannot be empty".to_string(),
        });
    }
    if worker_count < 0 {
        return Err(Error::Validation {
            message: format!("Workshop worker count cannot be negative: {worker_count}"),
        });
    }
    if get_workshop_by_name(db, name).await?.is_some() {
        return Err(Error::Duplicate {
            entity: "Workshop",
            value: name.to_string(),
        });
    }

    workshop::ActiveModel {
        name: Set(name.to_string()),
        worker_count: Set(worker_count),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
