//! Unified error types for the production catalog.
//!
//! Catalog operations return [`Result`]; the raw-material estimator has its own
//! [`CalculationError`](crate::core::raw_material::CalculationError) taxonomy,
//! which converts into [`Error::Calculation`] when a single type is wanted.

use crate::core::raw_material::CalculationError;
use sea_orm::DbErr;
use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Any failure reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// User-supplied values failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// Which rule was violated
        message: String,
    },

    /// A unique field already holds this value
    #[error("{entity} '{value}' already exists")]
    Duplicate {
        /// Entity kind, e.g. "Product article"
        entity: &'static str,
        /// The conflicting value
        value: String,
    },

    /// Product not found
    #[error("Product {id} not found")]
    ProductNotFound {
        /// Requested product id
        id: i64,
    },

    /// Product type not found
    #[error("Product type {id} not found")]
    ProductTypeNotFound {
        /// Requested product type id
        id: i64,
    },

    /// Material type not found
    #[error("Material type {id} not found")]
    MaterialTypeNotFound {
        /// Requested material type id
        id: i64,
    },

    /// Workshop not found
    #[error("Workshop {id} not found")]
    WorkshopNotFound {
        /// Requested workshop id
        id: i64,
    },

    /// Product/workshop assignment not found
    #[error("Workshop assignment {id} not found")]
    AssignmentNotFound {
        /// Requested assignment id
        id: i64,
    },

    /// Raw-material estimation failed
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Spreadsheet import failed
    #[error("Import error: {message}")]
    Import {
        /// Description including the offending file or value
        message: String,
    },

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
