/// Calculator command
pub mod calc;
/// Reference data listings
pub mod catalog;
/// Import command
pub mod import;
/// Product commands
pub mod product;
