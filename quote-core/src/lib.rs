pub mod calculations;
pub mod db;
pub mod export;
pub mod models;

pub use calculations::{PricedEstimate, build_category_line_items, build_line_items, price_estimate};
pub use db::{DbConfig, EstimateRepository, RepositoryError, RepositoryFactory, RepositoryRegistry};
pub use models::*;
