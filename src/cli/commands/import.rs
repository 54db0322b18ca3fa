//! `import` command - reload the catalog from spreadsheet exports.

use crate::config::ImportConfig;
use crate::errors::Result;
use crate::import::{self, TableReport};
use sea_orm::DatabaseConnection;
use std::fmt::Write;
use std::path::PathBuf;

/// Arguments of the `import` command
#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Directory holding the five CSV sheets
    pub dir: PathBuf,
}

/// Runs the import and summarizes it per table.
pub async fn run(db: &DatabaseConnection, args: ImportArgs, config: &ImportConfig) -> Result<String> {
    let report = import::import_directory(db, &args.dir, config).await?;

    let mut out = format!("✅ Imported catalog from {}\n", args.dir.display());
    let rows: [(&str, TableReport); 5] = [
        ("Product types", report.product_types),
        ("Material types", report.material_types),
        ("Workshops", report.workshops),
        ("Products", report.products),
        ("Workshop assignments", report.assignments),
    ];
    for (label, table) in rows {
        let _ = writeln!(
            out,
            "  {label:<22} {:>5} imported, {:>5} skipped",
            table.inserted, table.skipped
        );
    }
    Ok(out)
}
