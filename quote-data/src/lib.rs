//! Rate table import from `name,value` CSV files.

mod loader;

pub use loader::{RateRecord, RateTableLoader, RateTableLoaderError};
