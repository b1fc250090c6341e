use std::collections::HashSet;
use std::io::Read;

use quote_core::{EstimateRepository, RateTable, RateTableError, RepositoryError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when importing a rate table.
#[derive(Debug, Error)]
pub enum RateTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown rate '{0}' (expected one of the rate table names)")]
    UnknownRate(String),

    #[error("Rate '{0}' appears more than once")]
    DuplicateRate(String),

    #[error("Rate '{name}' is negative ({value})")]
    NegativeRate { name: String, value: Decimal },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for RateTableLoaderError {
    fn from(err: csv::Error) -> Self {
        RateTableLoaderError::CsvParse(err.to_string())
    }
}

impl From<RateTableError> for RateTableLoaderError {
    fn from(err: RateTableError) -> Self {
        match err {
            RateTableError::UnknownRate(name) => RateTableLoaderError::UnknownRate(name),
        }
    }
}

/// One `name,value` row. Names are the snake_case rate names, e.g.
/// `labor_per_hour` or `fertilization_per_sqft`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RateRecord {
    pub name: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub value: Decimal,
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim()
        .trim_start_matches('$')
        .parse::<Decimal>()
        .map_err(serde::de::Error::custom)
}

/// Imports price lists into the stored rate table.
///
/// Rows only override the rates they name; everything else keeps its
/// current stored value.
pub struct RateTableLoader;

impl RateTableLoader {
    /// Parse rate records from a CSV reader with a `name,value` header.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RateRecord>, RateTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RateRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Applies `records` on top of `base`.
    ///
    /// The whole batch is rejected if any name is unknown or repeated, or any
    /// value is negative.
    pub fn apply(
        base: RateTable,
        records: &[RateRecord],
    ) -> Result<RateTable, RateTableLoaderError> {
        let mut rates = base;
        let mut seen = HashSet::new();

        for record in records {
            if !seen.insert(record.name.as_str()) {
                return Err(RateTableLoaderError::DuplicateRate(record.name.clone()));
            }
            if record.value.is_sign_negative() && !record.value.is_zero() {
                return Err(RateTableLoaderError::NegativeRate {
                    name: record.name.clone(),
                    value: record.value,
                });
            }
            rates.set(&record.name, record.value)?;
        }

        Ok(rates)
    }

    /// Merges `records` into the repository's rate table and saves it.
    /// Returns the table as stored.
    pub async fn load<R: EstimateRepository + ?Sized>(
        repo: &R,
        records: &[RateRecord],
    ) -> Result<RateTable, RateTableLoaderError> {
        let current = repo.load_rate_table().await?;
        let updated = Self::apply(current, records)?;
        repo.save_rate_table(&updated).await?;

        tracing::info!(rates = records.len(), "rate table imported");
        Ok(updated)
    }
}
