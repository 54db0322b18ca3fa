//! Product business logic - Handles all product-related operations.
//!
//! Products are created, edited and deleted by users. Every write validates
//! the same rules the product form enforces: a non-empty article and name, a
//! non-negative partner price, strictly positive dimensions when given, and
//! existing product type and main material. Articles are unique across the
//! whole catalog.

use crate::{
    core::{material_type, product_type, production_time},
    entities::{Product, ProductWorkshop, product, product_workshop},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// User-editable fields of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    /// Article number, unique across the catalog
    pub article: String,
    /// Product name
    pub name: String,
    /// Optional free-form description; blank text is stored as `None`
    pub description: Option<String>,
    /// ID of an existing product type
    pub product_type_id: i64,
    /// ID of an existing material type, if the product has a main material
    pub main_material_id: Option<i64>,
    /// Minimum price offered to partners
    pub min_cost_for_partner: Decimal,
    /// First dimension; absent is stored as zero
    pub parameter1: Option<Decimal>,
    /// Second dimension; absent is stored as zero
    pub parameter2: Option<Decimal>,
}

/// A product together with its production time computed from its workshop
/// assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    /// The stored product
    pub product: product::Model,
    /// Total hours across all workshops, rounded to the nearest integer
    pub production_time: i64,
}

/// Checks the field-level rules of a product input without touching the
/// database.
///
/// # Errors
/// Returns [`Error::Validation`] naming the first rule that fails.
pub fn validate_product_input(input: &ProductInput) -> Result<()> {
    if input.article.trim().is_empty() {
        return Err(Error::Validation {
            message: "Article cannot be empty".to_string(),
        });
    }
    if input.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }
    if input.min_cost_for_partner < Decimal::ZERO {
        return Err(Error::Validation {
            message: format!(
                "Minimum cost for partner cannot be negative: {}",
                input.min_cost_for_partner
            ),
        });
    }
    for (index, value) in [(1, input.parameter1), (2, input.parameter2)] {
        match value {
            Some(value) if value <= Decimal::ZERO => {
                return Err(Error::Validation {
                    message: format!("Parameter {index} must be positive: {value}"),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

async fn check_references<C>(db: &C, input: &ProductInput) -> Result<()>
where
    C: ConnectionTrait,
{
    if product_type::get_product_type_by_id(db, input.product_type_id)
        .await?
        .is_none()
    {
        return Err(Error::ProductTypeNotFound {
            id: input.product_type_id,
        });
    }
    if let Some(material_id) = input.main_material_id {
        if material_type::get_material_type_by_id(db, material_id)
            .await?
            .is_none()
        {
            return Err(Error::MaterialTypeNotFound { id: material_id });
        }
    }
    Ok(())
}

fn normalized_description(description: Option<&String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Retrieves all products ordered by article.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Article)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by its article.
pub async fn get_product_by_article<C>(db: &C, article: &str) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::Article.eq(article))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the first product with the given name. Names are not unique; the
/// spreadsheet import links workshop rows to products by name.
pub async fn get_product_by_name<C>(db: &C, name: &str) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::Name.eq(name))
        .order_by_asc(product::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every product with its computed production time, ordered by article.
///
/// Production time degrades to zero for a product whose assignments cannot be
/// read, so one bad lookup does not hide the whole list.
pub async fn list_products_with_production_time(
    db: &DatabaseConnection,
) -> Result<Vec<ProductSummary>> {
    let products = get_all_products(db).await?;
    let mut summaries = Vec::with_capacity(products.len());
    for product in products {
        let production_time = production_time::production_time(db, product.id).await;
        summaries.push(ProductSummary {
            product,
            production_time,
        });
    }
    Ok(summaries)
}

/// Creates a new product.
///
/// # Errors
/// Returns an error if:
/// - Any field fails [`validate_product_input`]
/// - The product type or main material does not exist
/// - Another product already uses the article
/// - The database insert fails
#[instrument(skip(db, input), fields(article = %input.article))]
pub async fn create_product<C>(db: &C, input: ProductInput) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    validate_product_input(&input)?;
    check_references(db, &input).await?;

    let article = input.article.trim().to_string();
    if get_product_by_article(db, &article).await?.is_some() {
        return Err(Error::Duplicate {
            entity: "Product article",
            value: article,
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let product = product::ActiveModel {
        article: Set(article),
        product_type_id: Set(input.product_type_id),
        name: Set(input.name.trim().to_string()),
        description: Set(normalized_description(input.description.as_ref())),
        min_cost_for_partner: Set(input.min_cost_for_partner),
        main_material_id: Set(input.main_material_id),
        parameter1: Set(input.parameter1.unwrap_or(Decimal::ZERO)),
        parameter2: Set(input.parameter2.unwrap_or(Decimal::ZERO)),
        production_time: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = product.insert(db).await?;
    info!(product_id = created.id, "Product created");
    Ok(created)
}

/// Replaces the editable fields of an existing product.
///
/// The stored `production_time` is left untouched.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist
/// - Any field fails [`validate_product_input`]
/// - The product type or main material does not exist
/// - A different product already uses the article
/// - The database update fails
#[instrument(skip(db, input), fields(article = %input.article))]
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    input: ProductInput,
) -> Result<product::Model> {
    let mut product: product::ActiveModel = get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    validate_product_input(&input)?;
    check_references(db, &input).await?;

    let article = input.article.trim().to_string();
    let taken = Product::find()
        .filter(product::Column::Article.eq(article.as_str()))
        .filter(product::Column::Id.ne(product_id))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(Error::Duplicate {
            entity: "Product article",
            value: article,
        });
    }

    product.article = Set(article);
    product.product_type_id = Set(input.product_type_id);
    product.name = Set(input.name.trim().to_string());
    product.description = Set(normalized_description(input.description.as_ref()));
    product.min_cost_for_partner = Set(input.min_cost_for_partner);
    product.main_material_id = Set(input.main_material_id);
    product.parameter1 = Set(input.parameter1.unwrap_or(Decimal::ZERO));
    product.parameter2 = Set(input.parameter2.unwrap_or(Decimal::ZERO));
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Deletes a product together with its workshop assignments.
///
/// Assignments are removed first, then the product, inside one database
/// transaction. Returns the number of assignments removed.
///
/// # Errors
/// Returns an error if the product does not exist or a delete fails; in
/// either case nothing is removed.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    let product = get_product_by_id(&txn, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let removed = ProductWorkshop::delete_many()
        .filter(product_workshop::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?
        .rows_affected;

    product.delete(&txn).await?;
    txn.commit().await?;

    info!(removed_assignments = removed, "Product deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::assignment;
    use crate::test_utils::*;

    #[test]
    fn test_validate_product_input() {
        let valid = product_input("A-1", 1, None);
        assert!(validate_product_input(&valid).is_ok());

        let mut input = valid.clone();
        input.article = "   ".to_string();
        assert!(matches!(
            validate_product_input(&input),
            Err(Error::Validation { .. })
        ));

        let mut input = valid.clone();
        input.name = String::new();
        assert!(validate_product_input(&input).is_err());

        let mut input = valid.clone();
        input.min_cost_for_partner = dec("-0.01");
        assert!(validate_product_input(&input).is_err());

        let mut input = valid.clone();
        input.parameter1 = Some(Decimal::ZERO);
        assert!(validate_product_input(&input).is_err());

        let mut input = valid.clone();
        input.parameter2 = Some(dec("-3"));
        assert!(validate_product_input(&input).is_err());

        let mut input = valid;
        input.parameter1 = None;
        input.parameter2 = None;
        assert!(validate_product_input(&input).is_ok());
    }

    #[tokio::test]
    async fn test_create_product_integration() -> Result<()> {
        let (db, product_type, material) = setup_with_reference_data().await?;

        let mut input = product_input("8758385", product_type.id, Some(material.id));
        input.description = Some("  ".to_string());
        let product = create_product(&db, input).await?;

        assert_eq!(product.article, "8758385");
        assert_eq!(product.product_type_id, product_type.id);
        assert_eq!(product.main_material_id, Some(material.id));
        assert_eq!(product.production_time, Decimal::ZERO);
        assert!(product.description.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_parameters_stored_as_zero() -> Result<()> {
        let (db, product_type, _material) = setup_with_reference_data().await?;

        let mut input = product_input("1", product_type.id, None);
        input.parameter1 = None;
        input.parameter2 = None;
        let product = create_product(&db, input).await?;

        assert_eq!(product.parameter1, Decimal::ZERO);
        assert_eq!(product.parameter2, Decimal::ZERO);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_rejects_duplicate_article() -> Result<()> {
        let (db, product_type, _material) = setup_with_reference_data().await?;
        create_product(&db, product_input("A-1", product_type.id, None)).await?;

        let result = create_product(&db, product_input("A-1", product_type.id, None)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Duplicate {
                entity: "Product article",
                ..
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_unknown_references() -> Result<()> {
        let (db, product_type, _material) = setup_with_reference_data().await?;

        let result = create_product(&db, product_input("A-1", 999, None)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductTypeNotFound { id: 999 }
        ));

        let result = create_product(&db, product_input("A-1", product_type.id, Some(777))).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::MaterialTypeNotFound { id: 777 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_integration() -> Result<()> {
        let (db, product_type, material) = setup_with_reference_data().await?;
        let product = create_product(&db, product_input("A-1", product_type.id, None)).await?;

        let mut input = product_input("A-2", product_type.id, Some(material.id));
        input.name = "Updated".to_string();
        let updated = update_product(&db, product.id, input).await?;

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.article, "A-2");
        assert_eq!(updated.name, "Updated");
        assert_eq!(updated.main_material_id, Some(material.id));
        assert_eq!(updated.created_at, product.created_at);

        // Keeping its own article is not a conflict
        let same = update_product(&db, product.id, product_input("A-2", product_type.id, None))
            .await?;
        assert_eq!(same.article, "A-2");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_rejects_article_of_other_product() -> Result<()> {
        let (db, product_type, _material) = setup_with_reference_data().await?;
        create_product(&db, product_input("A-1", product_type.id, None)).await?;
        let second = create_product(&db, product_input("A-2", product_type.id, None)).await?;

        let result = update_product(&db, second.id, product_input("A-1", product_type.id, None))
            .await;
        assert!(matches!(result.unwrap_err(), Error::Duplicate { .. }));

        let result = update_product(&db, 999, product_input("A-9", product_type.id, None)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { id: 999 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_removes_assignments() -> Result<()> {
        let (db, product_type, _material) = setup_with_reference_data().await?;
        let product = create_product(&db, product_input("A-1", product_type.id, None)).await?;
        let other = create_product(&db, product_input("A-2", product_type.id, None)).await?;
        let shop_a = create_test_workshop(&db, "Цех A").await?;
        let shop_b = create_test_workshop(&db, "Цех B").await?;
        assignment::assign_workshop(&db, product.id, shop_a.id, dec("1.5"), 1).await?;
        assignment::assign_workshop(&db, product.id, shop_b.id, dec("2"), 2).await?;
        assignment::assign_workshop(&db, other.id, shop_a.id, dec("3"), 1).await?;

        let removed = delete_product(&db, product.id).await?;
        assert_eq!(removed, 2);

        assert!(get_product_by_id(&db, product.id).await?.is_none());
        assert!(
            assignment::get_workshops_for_product(&db, product.id)
                .await?
                .is_empty()
        );
        assert_eq!(
            assignment::get_workshops_for_product(&db, other.id)
                .await?
                .len(),
            1
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_product(&db, 42).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { id: 42 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_products_with_production_time() -> Result<()> {
        let (db, product_type, _material) = setup_with_reference_data().await?;
        let busy = create_product(&db, product_input("A-1", product_type.id, None)).await?;
        create_product(&db, product_input("A-2", product_type.id, None)).await?;
        let shop = create_test_workshop(&db, "Цех").await?;
        assignment::assign_workshop(&db, busy.id, shop.id, dec("2.6"), 1).await?;

        let summaries = list_products_with_production_time(&db).await?;
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].product.article, "A-1");
        assert_eq!(summaries[0].production_time, 3);
        assert_eq!(summaries[1].production_time, 0);
        Ok(())
    }
}
