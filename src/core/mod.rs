//! Core business logic - framework-agnostic catalog operations and calculators.
//!
//! Every function takes the database connection explicitly; nothing here
//! holds global state.

/// Product/workshop assignments
pub mod assignment;
/// Material type reference data
pub mod material_type;
/// Product create/read/update/delete
pub mod product;
/// Product type reference data
pub mod product_type;
/// Production-time calculator
pub mod production_time;
/// Raw-material estimator
pub mod raw_material;
/// Workshop reference data
pub mod workshop;

pub use production_time::{production_time, total_production_time};
pub use raw_material::{
    CalculationError, ESTIMATE_FAILED, MaterialEstimate, estimate_raw_material,
    estimate_raw_material_or_sentinel,
};
