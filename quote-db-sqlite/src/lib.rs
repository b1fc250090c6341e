//! SQLite storage for the estimator: the rate table, saved estimates, the
//! estimate-number sequence and the customer directory.

mod decimal;
mod factory;
mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;
