//! Bulk import of the legacy catalog spreadsheets.
//!
//! The five sheets are read from CSV exports in one directory. Column headers
//! are the ones used in the original workbooks. An import replaces the whole
//! catalog: all tables are cleared and refilled inside a single database
//! transaction, so a failure leaves the previous data untouched.
//!
//! Products whose type or main material cannot be found by name, and workshop
//! rows whose product or workshop cannot be found, are skipped and counted.

/// Waste-percentage normalization for the materials sheet
pub mod waste;

use crate::{
    config::ImportConfig,
    core::{assignment, material_type, product, product_type, workshop},
    entities::{MaterialType, Product, ProductType, ProductWorkshop, Workshop},
    errors::{Error, Result},
};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument, warn};

/// Product types sheet
pub const PRODUCT_TYPES_FILE: &str = "Product_type_import.csv";
/// Material types sheet
pub const MATERIAL_TYPES_FILE: &str = "Material_type_import.csv";
/// Workshops sheet
pub const WORKSHOPS_FILE: &str = "Workshops_import.csv";
/// Products sheet
pub const PRODUCTS_FILE: &str = "Products_import.csv";
/// Product/workshop sheet
pub const PRODUCT_WORKSHOPS_FILE: &str = "Product_workshops_import.csv";

const COL_PRODUCT_TYPE: &str = "Тип продукции";
const COL_COEFFICIENT: &str = "Коэффициент типа продукции";
const COL_MATERIAL_TYPE: &str = "Тип материала";
const COL_WASTE: &str = "Процент потерь сырья";
const COL_WORKSHOP: &str = "Название цеха";
const COL_ARTICLE: &str = "Артикул";
const COL_PRODUCT_NAME: &str = "Наименование продукции";
const COL_MIN_COST: &str = "Минимальная стоимость для партнера";
const COL_MAIN_MATERIAL: &str = "Основной материал";
const COL_HOURS: &str = "Время изготовления, ч";

/// Inserted and skipped row counts for one table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableReport {
    /// Rows written to the database
    pub inserted: usize,
    /// Rows left out (unresolved references, duplicates, blank names)
    pub skipped: usize,
}

/// Outcome of a full import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Product types sheet
    pub product_types: TableReport,
    /// Material types sheet
    pub material_types: TableReport,
    /// Workshops sheet
    pub workshops: TableReport,
    /// Products sheet
    pub products: TableReport,
    /// Product/workshop sheet
    pub assignments: TableReport,
}

/// One CSV sheet loaded into memory.
struct Sheet {
    file: String,
    columns: HashMap<String, usize>,
    records: Vec<StringRecord>,
}

impl Sheet {
    fn open(dir: &Path, file: &str) -> Result<Self> {
        let path = dir.join(file);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(&path)
            .map_err(|e| Error::Import {
                message: format!("Cannot open {}: {e}", path.display()),
            })?;

        let columns = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            file: file.to_string(),
            columns,
            records,
        })
    }

    fn column(&self, name: &str) -> Result<usize> {
        self.columns.get(name).copied().ok_or_else(|| Error::Import {
            message: format!("{}: missing column '{name}'", self.file),
        })
    }

    fn decimal(&self, record: &StringRecord, column: usize, row: usize) -> Result<Decimal> {
        let raw = record.get(column).unwrap_or_default();
        Decimal::from_str(&raw.replace(',', ".")).map_err(|e| Error::Import {
            message: format!("{} row {}: invalid number '{raw}': {e}", self.file, row + 2),
        })
    }
}

fn cell(record: &StringRecord, column: usize) -> &str {
    record.get(column).unwrap_or_default().trim()
}

/// Replaces the catalog with the contents of the five sheets in `dir`.
///
/// All five sheets are read into memory before the database is touched.
///
/// # Errors
/// Returns an error if a sheet is missing or malformed, a value fails
/// validation, or any database statement fails. The transaction is rolled
/// back in every error case.
#[instrument(skip(db, config), fields(dir = %dir.display()))]
pub async fn import_directory(
    db: &DatabaseConnection,
    dir: &Path,
    config: &ImportConfig,
) -> Result<ImportReport> {
    let product_types = Sheet::open(dir, PRODUCT_TYPES_FILE)?;
    let material_types = Sheet::open(dir, MATERIAL_TYPES_FILE)?;
    let workshops = Sheet::open(dir, WORKSHOPS_FILE)?;
    let products = Sheet::open(dir, PRODUCTS_FILE)?;
    let product_workshops = Sheet::open(dir, PRODUCT_WORKSHOPS_FILE)?;

    let txn = db.begin().await?;
    let mut report = ImportReport::default();

    info!("Clearing existing data");
    ProductWorkshop::delete_many().exec(&txn).await?;
    Product::delete_many().exec(&txn).await?;
    Workshop::delete_many().exec(&txn).await?;
    MaterialType::delete_many().exec(&txn).await?;
    ProductType::delete_many().exec(&txn).await?;

    info!("Importing product types");
    let name_col = product_types.column(COL_PRODUCT_TYPE)?;
    let coefficient_col = product_types.column(COL_COEFFICIENT)?;
    for (row, record) in product_types.records.iter().enumerate() {
        let coefficient = product_types.decimal(record, coefficient_col, row)?;
        product_type::create_product_type(&txn, cell(record, name_col), coefficient).await?;
        report.product_types.inserted += 1;
    }

    info!("Importing material types");
    let name_col = material_types.column(COL_MATERIAL_TYPE)?;
    let waste_col = material_types.column(COL_WASTE)?;
    for record in &material_types.records {
        let raw = cell(record, waste_col);
        let fraction = waste::normalize_waste_percentage(raw)?;
        info!(
            material = cell(record, name_col),
            raw,
            %fraction,
            "Waste percentage normalized"
        );
        material_type::create_material_type(&txn, cell(record, name_col), fraction).await?;
        report.material_types.inserted += 1;
    }

    info!("Importing workshops");
    let name_col = workshops.column(COL_WORKSHOP)?;
    let mut seen = HashSet::new();
    for record in &workshops.records {
        let name = cell(record, name_col);
        if name.is_empty() || !seen.insert(name.to_string()) {
            report.workshops.skipped += 1;
            continue;
        }
        workshop::create_workshop(&txn, name, config.workshop_worker_count).await?;
        report.workshops.inserted += 1;
    }

    info!("Importing products");
    let article_col = products.column(COL_ARTICLE)?;
    let type_col = products.column(COL_PRODUCT_TYPE)?;
    let name_col = products.column(COL_PRODUCT_NAME)?;
    let cost_col = products.column(COL_MIN_COST)?;
    let material_col = products.column(COL_MAIN_MATERIAL)?;
    for (row, record) in products.records.iter().enumerate() {
        let product_type =
            product_type::get_product_type_by_name(&txn, cell(record, type_col)).await?;
        let material =
            material_type::get_material_type_by_name(&txn, cell(record, material_col)).await?;
        let (Some(product_type), Some(material)) = (product_type, material) else {
            warn!(
                article = cell(record, article_col),
                "Skipping product with unknown type or material"
            );
            report.products.skipped += 1;
            continue;
        };

        let input = product::ProductInput {
            article: cell(record, article_col).to_string(),
            name: cell(record, name_col).to_string(),
            description: None,
            product_type_id: product_type.id,
            main_material_id: Some(material.id),
            min_cost_for_partner: products.decimal(record, cost_col, row)?,
            parameter1: Some(config.default_parameter1),
            parameter2: Some(config.default_parameter2),
        };
        product::create_product(&txn, input).await?;
        report.products.inserted += 1;
    }

    info!("Importing product workshops");
    let product_col = product_workshops.column(COL_PRODUCT_NAME)?;
    let workshop_col = product_workshops.column(COL_WORKSHOP)?;
    let hours_col = product_workshops.column(COL_HOURS)?;
    for (row, record) in product_workshops.records.iter().enumerate() {
        let product = product::get_product_by_name(&txn, cell(record, product_col)).await?;
        let shop = workshop::get_workshop_by_name(&txn, cell(record, workshop_col)).await?;
        let (Some(product), Some(shop)) = (product, shop) else {
            report.assignments.skipped += 1;
            continue;
        };

        let hours = product_workshops.decimal(record, hours_col, row)?;
        match assignment::assign_workshop(
            &txn,
            product.id,
            shop.id,
            hours,
            config.assignment_worker_count,
        )
        .await
        {
            Ok(_) => report.assignments.inserted += 1,
            Err(Error::Duplicate { value, .. }) => {
                warn!(%value, "Skipping repeated workshop assignment");
                report.assignments.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    txn.commit().await?;
    info!(?report, "Import finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{production_time, raw_material};
    use crate::test_utils::*;
    use std::fs;

    fn write_sheets(dir: &Path) {
        fs::write(
            dir.join(PRODUCT_TYPES_FILE),
            "Тип продукции,Коэффициент типа продукции\n\
             Ламинат,2.35\n\
             Паркетная доска,\"4,34\"\n",
        )
        .unwrap();
        fs::write(
            dir.join(MATERIAL_TYPES_FILE),
            "Тип материала,Процент потерь сырья\n\
             Тип материала 1,0.10%\n\
             Тип материала 2,\"0,95%\"\n",
        )
        .unwrap();
        fs::write(
            dir.join(WORKSHOPS_FILE),
            "Название цеха,Тип цеха\n\
             Проектный,Проектирование\n\
             Сушильный,Обработка\n\
             Сушильный ,Обработка\n\
             ,Пусто\n",
        )
        .unwrap();
        fs::write(
            dir.join(PRODUCTS_FILE),
            "Тип продукции,Наименование продукции,Артикул,Минимальная стоимость для партнера,Основной материал\n\
             Ламинат,Ламинат дуб,8758385,4456.90,Тип материала 1\n\
             Паркетная доска,Паркет ясень,7750282,\"7330,99\",Тип материала 2\n\
             Пробка,Пробковое покрытие,1111111,100,Тип материала 1\n",
        )
        .unwrap();
        fs::write(
            dir.join(PRODUCT_WORKSHOPS_FILE),
            "Наименование продукции,Название цеха,\"Время изготовления, ч\"\n\
             Ламинат дуб,Проектный,1\n\
             Ламинат дуб,Сушильный,2.5\n\
             Ламинат дуб,Сушильный,9\n\
             Паркет ясень,Проектный,\"0,5\"\n\
             Пробковое покрытие,Проектный,3\n\
             Ламинат дуб,Неизвестный,1\n",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_import_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_sheets(dir.path());
        let db = setup_test_db().await?;

        let report = import_directory(&db, dir.path(), &ImportConfig::default()).await?;

        assert_eq!(report.product_types.inserted, 2);
        assert_eq!(report.material_types.inserted, 2);
        assert_eq!(report.workshops, TableReport { inserted: 2, skipped: 2 });
        assert_eq!(report.products, TableReport { inserted: 2, skipped: 1 });
        assert_eq!(report.assignments, TableReport { inserted: 3, skipped: 3 });

        let parquet = product_type::get_product_type_by_name(&db, "Паркетная доска")
            .await?
            .unwrap();
        assert_eq!(parquet.coefficient, dec("4.34"));

        let material = material_type::get_material_type_by_name(&db, "Тип материала 2")
            .await?
            .unwrap();
        assert_eq!(material.waste_percentage, dec("0.0095"));

        let shop = workshop::get_workshop_by_name(&db, "Сушильный").await?.unwrap();
        assert_eq!(shop.worker_count, 5);

        let laminate = product::get_product_by_article(&db, "8758385").await?.unwrap();
        assert_eq!(laminate.min_cost_for_partner, dec("4456.9"));
        assert_eq!(laminate.parameter1, Decimal::ONE);
        assert_eq!(production_time::production_time(&db, laminate.id).await, 4);

        let rows = assignment::get_assignments_for_product(&db, laminate.id).await?;
        assert!(rows.iter().all(|a| a.worker_count == 3));

        let estimate = raw_material::estimate_raw_material(
            &db,
            parquet.id,
            material.id,
            10,
            dec("2"),
            dec("1.5"),
        )
        .await?;
        // 3 * 4.34 * 1.0095 * 10 = 131.4369
        assert_eq!(estimate.amount, 132);
        Ok(())
    }

    #[tokio::test]
    async fn test_reimport_replaces_data() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_sheets(dir.path());
        let db = setup_test_db().await?;

        import_directory(&db, dir.path(), &ImportConfig::default()).await?;
        let report = import_directory(&db, dir.path(), &ImportConfig::default()).await?;

        assert_eq!(report.products.inserted, 2);
        assert_eq!(product::get_all_products(&db).await?.len(), 2);
        assert_eq!(workshop::get_all_workshops(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_import_uses_configured_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_sheets(dir.path());
        let db = setup_test_db().await?;
        let config = ImportConfig {
            workshop_worker_count: 8,
            assignment_worker_count: 2,
            default_parameter1: dec("1.2"),
            default_parameter2: dec("0.5"),
        };

        import_directory(&db, dir.path(), &config).await?;

        let shop = workshop::get_workshop_by_name(&db, "Проектный").await?.unwrap();
        assert_eq!(shop.worker_count, 8);
        let laminate = product::get_product_by_article(&db, "8758385").await?.unwrap();
        assert_eq!(laminate.parameter2, dec("0.5"));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_import_keeps_previous_data() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_sheets(dir.path());
        let db = setup_test_db().await?;
        import_directory(&db, dir.path(), &ImportConfig::default()).await?;

        fs::write(
            dir.path().join(PRODUCT_TYPES_FILE),
            "Тип продукции,Коэффициент типа продукции\nЛаминат,много\n",
        )?;
        let result = import_directory(&db, dir.path(), &ImportConfig::default()).await;
        assert!(matches!(result, Err(Error::Import { .. })));

        assert_eq!(product::get_all_products(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_sheet_or_column() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let db = setup_test_db().await?;
        let result = import_directory(&db, dir.path(), &ImportConfig::default()).await;
        assert!(matches!(result, Err(Error::Import { .. })));

        write_sheets(dir.path());
        fs::write(dir.path().join(WORKSHOPS_FILE), "Цех\nПроектный\n")?;
        let result = import_directory(&db, dir.path(), &ImportConfig::default()).await;
        match result {
            Err(Error::Import { message }) => assert!(message.contains(COL_WORKSHOP)),
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }
}
