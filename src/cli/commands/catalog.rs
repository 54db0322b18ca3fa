//! Listings of the reference tables.

use crate::core::{material_type, product_type, workshop};
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use std::fmt::Write;

/// Lists product types with their coefficients.
pub async fn list_product_types(db: &DatabaseConnection) -> Result<String> {
    let types = product_type::get_all_product_types(db).await?;
    if types.is_empty() {
        return Ok("No product types. Run `import` first.".to_string());
    }
    let mut out = format!("{:>4}  {:<40} {:>11}\n", "ID", "Product type", "Coefficient");
    for pt in types {
        let _ = writeln!(out, "{:>4}  {:<40} {:>11}", pt.id, pt.name, pt.coefficient);
    }
    Ok(out)
}

/// Lists material types with their waste fraction shown as a percentage.
pub async fn list_material_types(db: &DatabaseConnection) -> Result<String> {
    let materials = material_type::get_all_material_types(db).await?;
    if materials.is_empty() {
        return Ok("No material types. Run `import` first.".to_string());
    }
    let mut out = format!("{:>4}  {:<40} {:>8}\n", "ID", "Material", "Waste");
    for mt in materials {
        let percent = (mt.waste_percentage * rust_decimal::Decimal::ONE_HUNDRED).normalize();
        let _ = writeln!(out, "{:>4}  {:<40} {:>7}%", mt.id, mt.name, percent);
    }
    Ok(out)
}

/// Lists workshops with their worker counts.
pub async fn list_workshops(db: &DatabaseConnection) -> Result<String> {
    let workshops = workshop::get_all_workshops(db).await?;
    if workshops.is_empty() {
        return Ok("No workshops. Run `import` first.".to_string());
    }
    let mut out = format!("{:>4}  {:<40} {:>7}\n", "ID", "Workshop", "Workers");
    for shop in workshops {
        let _ = writeln!(out, "{:>4}  {:<40} {:>7}", shop.id, shop.name, shop.worker_count);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_listings() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(list_workshops(&db).await?.starts_with("No workshops"));

        let (db, _, _) = setup_with_reference_data().await?;
        create_test_workshop(&db, "Цех обработки").await?;

        assert!(list_product_types(&db).await?.contains("Test Type"));
        let materials = list_material_types(&db).await?;
        assert!(materials.contains("Test Material"));
        assert!(materials.contains("10%"));
        assert!(list_workshops(&db).await?.contains("Цех обработки"));
        Ok(())
    }
}
