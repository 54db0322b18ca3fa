//! `product` subcommands - maintain products and their workshop routes.

use crate::core::{assignment, product, production_time};
use crate::core::product::ProductInput;
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::fmt::Write;
use tracing::info;

/// Product maintenance commands
#[derive(clap::Subcommand, Debug)]
pub enum ProductCommands {
    /// List all products with their production time
    List,
    /// Show one product and the workshops it passes through
    Show {
        /// Product ID
        id: i64,
    },
    /// Add a product
    Add(ProductArgs),
    /// Replace every field of a product
    Edit {
        /// Product ID
        id: i64,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product and its workshop assignments
    Delete {
        /// Product ID
        id: i64,
    },
    /// Route a product through a workshop
    Assign {
        /// Product ID
        product_id: i64,
        /// Workshop ID
        workshop_id: i64,
        /// Hours the product spends in the workshop
        #[arg(long)]
        hours: Decimal,
        /// People working on the product there
        #[arg(long, default_value_t = 1)]
        workers: i32,
    },
    /// Remove a workshop assignment
    Unassign {
        /// Assignment ID
        assignment_id: i64,
    },
    /// Change the hours or workers of an assignment
    UpdateAssignment {
        /// Assignment ID
        assignment_id: i64,
        /// Hours the product spends in the workshop
        #[arg(long)]
        hours: Decimal,
        /// People working on the product there
        #[arg(long)]
        workers: i32,
    },
}

/// Product fields accepted by `add` and `edit`
#[derive(clap::Args, Debug)]
pub struct ProductArgs {
    /// Unique article code
    #[arg(long)]
    pub article: String,
    /// Display name
    #[arg(long)]
    pub name: String,
    /// Product type ID
    #[arg(long = "type")]
    pub product_type_id: i64,
    /// Main material type ID
    #[arg(long = "material")]
    pub main_material_id: Option<i64>,
    /// Minimum cost for a partner
    #[arg(long)]
    pub min_cost: Decimal,
    /// First dimension
    #[arg(long)]
    pub param1: Option<Decimal>,
    /// Second dimension
    #[arg(long)]
    pub param2: Option<Decimal>,
    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
}

impl From<ProductArgs> for ProductInput {
    fn from(args: ProductArgs) -> Self {
        Self {
            article: args.article,
            name: args.name,
            description: args.description,
            product_type_id: args.product_type_id,
            main_material_id: args.main_material_id,
            min_cost_for_partner: args.min_cost,
            parameter1: args.param1,
            parameter2: args.param2,
        }
    }
}

/// Executes a product subcommand and returns the text to print.
pub async fn run(db: &DatabaseConnection, cmd: ProductCommands) -> Result<String> {
    match cmd {
        ProductCommands::List => list(db).await,
        ProductCommands::Show { id } => show(db, id).await,
        ProductCommands::Add(args) => {
            let created = product::create_product(db, args.into()).await?;
            Ok(format!(
                "✅ Created product '{}' ({}) with ID {}",
                created.name, created.article, created.id
            ))
        }
        ProductCommands::Edit { id, fields } => {
            let updated = product::update_product(db, id, fields.into()).await?;
            info!(id, "Product updated");
            Ok(format!(
                "✅ Updated product '{}' ({})",
                updated.name, updated.article
            ))
        }
        ProductCommands::Delete { id } => {
            let removed = product::delete_product(db, id).await?;
            Ok(format!(
                "✅ Deleted product {id} and {removed} workshop assignment(s)"
            ))
        }
        ProductCommands::Assign {
            product_id,
            workshop_id,
            hours,
            workers,
        } => {
            let created =
                assignment::assign_workshop(db, product_id, workshop_id, hours, workers).await?;
            Ok(format!(
                "✅ Product {product_id} now spends {hours} h in workshop {workshop_id} (assignment {})",
                created.id
            ))
        }
        ProductCommands::Unassign { assignment_id } => {
            assignment::remove_assignment(db, assignment_id).await?;
            Ok(format!("✅ Removed assignment {assignment_id}"))
        }
        ProductCommands::UpdateAssignment {
            assignment_id,
            hours,
            workers,
        } => {
            let updated = assignment::update_assignment(db, assignment_id, hours, workers).await?;
            Ok(format!(
                "✅ Assignment {} now takes {} h with {} worker(s)",
                updated.id, updated.time_in_workshop, updated.worker_count
            ))
        }
    }
}

async fn list(db: &DatabaseConnection) -> Result<String> {
    let summaries = product::list_products_with_production_time(db).await?;
    if summaries.is_empty() {
        return Ok("No products yet. Run `import` or `product add` first.".to_string());
    }

    let mut out = format!(
        "{:>4}  {:<12} {:<40} {:>12} {:>6}\n",
        "ID", "Article", "Name", "Min cost", "Hours"
    );
    for summary in summaries {
        let p = &summary.product;
        let _ = writeln!(
            out,
            "{:>4}  {:<12} {:<40} {:>12} {:>6}",
            p.id,
            p.article,
            p.name,
            p.min_cost_for_partner.to_string(),
            summary.production_time
        );
    }
    Ok(out)
}

async fn show(db: &DatabaseConnection, id: i64) -> Result<String> {
    let found = product::get_product_by_id(db, id)
        .await?
        .ok_or(Error::ProductNotFound { id })?;
    let hours = production_time::production_time(db, id).await;
    let route = assignment::get_workshops_for_product(db, id).await?;

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", found.name, found.article);
    if let Some(description) = &found.description {
        let _ = writeln!(out, "{description}");
    }
    let _ = writeln!(out, "Product type ID:  {}", found.product_type_id);
    match found.main_material_id {
        Some(material_id) => {
            let _ = writeln!(out, "Main material ID: {material_id}");
        }
        None => {
            let _ = writeln!(out, "Main material ID: -");
        }
    }
    let _ = writeln!(out, "Min cost:         {}", found.min_cost_for_partner);
    let _ = writeln!(
        out,
        "Dimensions:       {} x {}",
        found.parameter1, found.parameter2
    );
    let _ = writeln!(out, "Production time:  {hours} h");

    if route.is_empty() {
        let _ = writeln!(out, "Not assigned to any workshop.");
    } else {
        let _ = writeln!(out, "Workshops:");
        for entry in route {
            let _ = writeln!(
                out,
                "  [{}] {:<30} {:>8} h  {} worker(s)",
                entry.assignment.id,
                entry.workshop.name,
                entry.assignment.time_in_workshop.to_string(),
                entry.assignment.worker_count
            );
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn args(article: &str, type_id: i64, material_id: Option<i64>) -> ProductArgs {
        ProductArgs {
            article: article.to_string(),
            name: "Ламинат".to_string(),
            product_type_id: type_id,
            main_material_id: material_id,
            min_cost: dec("4456.9"),
            param1: Some(dec("2")),
            param2: Some(dec("3")),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_add_then_list_and_show() -> Result<()> {
        let (db, product_type, material) = setup_with_reference_data().await?;
        let shop = create_test_workshop(&db, "Сушильный").await?;

        let out = run(
            &db,
            ProductCommands::Add(args("8758385", product_type.id, Some(material.id))),
        )
        .await?;
        assert!(out.starts_with("✅"));
        let created = product::get_product_by_article(&db, "8758385")
            .await?
            .unwrap();

        run(
            &db,
            ProductCommands::Assign {
                product_id: created.id,
                workshop_id: shop.id,
                hours: dec("2.5"),
                workers: 2,
            },
        )
        .await?;

        let listing = run(&db, ProductCommands::List).await?;
        assert!(listing.contains("8758385"));

        let details = run(&db, ProductCommands::Show { id: created.id }).await?;
        assert!(details.contains("Сушильный"));
        assert!(details.contains("Production time:  3 h"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_reports_removed_assignments() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let shop = create_test_workshop(&db, "Цех").await?;
        assignment::assign_workshop(&db, product.id, shop.id, dec("1"), 1).await?;

        let out = run(&db, ProductCommands::Delete { id: product.id }).await?;
        assert!(out.contains("1 workshop assignment"));

        let result = run(&db, ProductCommands::Show { id: product.id }).await;
        assert!(matches!(result, Err(Error::ProductNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_list_hint() -> Result<()> {
        let db = setup_test_db().await?;
        let out = run(&db, ProductCommands::List).await?;
        assert!(out.contains("No products yet"));
        Ok(())
    }
}
