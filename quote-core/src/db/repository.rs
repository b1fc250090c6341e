use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CustomerRecord, CustomerUpdate, NewSavedEstimate, RateTable, SavedEstimate};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Local storage for the rate table, saved estimates and the customer
/// directory.
#[async_trait]
pub trait EstimateRepository: Send + Sync {
    // Rate table
    /// The stored rate table, merged over the defaults.
    async fn load_rate_table(&self) -> Result<RateTable, RepositoryError>;
    async fn save_rate_table(&self, rates: &RateTable) -> Result<(), RepositoryError>;
    /// Restores the default rate table and returns it.
    async fn reset_rate_table(&self) -> Result<RateTable, RepositoryError>;

    // Estimate numbering
    /// Reserves and returns the next estimate sequence number, starting at 1.
    async fn next_estimate_sequence(&self) -> Result<i64, RepositoryError>;

    // Saved estimates
    /// Stores a frozen estimate. Saving under a number that is already
    /// stored replaces that estimate rather than adding another.
    async fn save_estimate(
        &self,
        estimate: NewSavedEstimate,
    ) -> Result<SavedEstimate, RepositoryError>;

    async fn get_estimate(&self, id: i64) -> Result<SavedEstimate, RepositoryError>;

    /// Every saved estimate, newest first.
    async fn list_estimates(&self) -> Result<Vec<SavedEstimate>, RepositoryError>;

    async fn delete_estimate(&self, id: i64) -> Result<(), RepositoryError>;

    /// Saved estimates for the customer named `name` (ignoring case and
    /// surrounding whitespace), newest first.
    async fn list_customer_estimates(
        &self,
        name: &str,
    ) -> Result<Vec<SavedEstimate>, RepositoryError>;

    // Customer directory
    /// Looks a customer up by name, ignoring case and surrounding whitespace.
    async fn find_customer(&self, name: &str) -> Result<Option<CustomerRecord>, RepositoryError>;

    /// Known customer names, sorted.
    async fn list_customers(&self) -> Result<Vec<String>, RepositoryError>;

    async fn upsert_customer(
        &self,
        update: &CustomerUpdate,
    ) -> Result<CustomerRecord, RepositoryError>;
}
