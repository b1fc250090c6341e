use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quote_core::{
    CustomerRecord, CustomerUpdate, EstimateRepository, MaintenanceTier, NewSavedEstimate,
    RateTable, RepositoryError, SavedEstimate, normalize_customer_name,
};
use serde::{Serialize, de::DeserializeOwned};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};

use crate::decimal::{decimal_to_text, get_decimal, get_optional_decimal};

const ESTIMATE_COLUMNS: &str = "id, estimate_number, sequence, created_at, saved_at,
     customer_json, services_json, notes, totals_json";

const CUSTOMER_COLUMNS: &str = "id, name, phone, email, address, mow_sqft, application_sqft,
     edging_ft, maintenance_tier";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens the store at `database_url`, which may be a bare file path, a
    /// `sqlite:` URL or `:memory:`. Database files are created on first use.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid SQLite location: {}", database_url))?
            .create_if_missing(true);

        // Every pooled connection must see the same in-memory database, and it
        // must not be dropped while idle.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn to_json<T: Serialize>(
    value: &T,
    what: &str,
) -> Result<String, RepositoryError> {
    serde_json::to_string(value)
        .map_err(|e| RepositoryError::Database(format!("Failed to encode {}: {}", what, e)))
}

fn from_json<T: DeserializeOwned>(
    row: &SqliteRow,
    column: &str,
) -> Result<T, RepositoryError> {
    let text: String = row
        .try_get(column)
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    serde_json::from_str(&text)
        .map_err(|e| RepositoryError::Database(format!("Failed to decode {}: {}", column, e)))
}

fn row_to_saved_estimate(row: &SqliteRow) -> Result<SavedEstimate, RepositoryError> {
    Ok(SavedEstimate {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        estimate_number: row
            .try_get("estimate_number")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        sequence: row
            .try_get("sequence")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        saved_at: row
            .try_get::<DateTime<Utc>, _>("saved_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get saved_at: {}", e)))?,
        customer: from_json(row, "customer_json")?,
        services: from_json(row, "services_json")?,
        notes: row
            .try_get("notes")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        totals: from_json(row, "totals_json")?,
    })
}

fn row_to_customer(row: &SqliteRow) -> Result<CustomerRecord, RepositoryError> {
    let tier: String = row
        .try_get("maintenance_tier")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

    Ok(CustomerRecord {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        phone: row
            .try_get("phone")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        address: row
            .try_get("address")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        mow_sqft: get_optional_decimal(row, "mow_sqft")?,
        application_sqft: get_optional_decimal(row, "application_sqft")?,
        edging_ft: get_optional_decimal(row, "edging_ft")?,
        maintenance_tier: MaintenanceTier::parse_or_fallback(&tier),
    })
}

#[async_trait]
impl EstimateRepository for SqliteRepository {
    async fn load_rate_table(&self) -> Result<RateTable, RepositoryError> {
        let rows = sqlx::query("SELECT name, value FROM rate_table ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut rates = RateTable::default();
        for row in &rows {
            let name: String = row
                .try_get("name")
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
            let value = get_decimal(row, "value")?;
            if let Err(e) = rates.set(&name, value) {
                tracing::warn!(rate = %name, "ignoring stored rate: {}", e);
            }
        }

        Ok(rates)
    }

    async fn save_rate_table(
        &self,
        rates: &RateTable,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        for (name, value) in rates.entries() {
            sqlx::query(
                "INSERT INTO rate_table (name, value) VALUES (?, ?)
                 ON CONFLICT(name) DO UPDATE SET value = excluded.value",
            )
            .bind(name)
            .bind(decimal_to_text(value))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        tracing::info!("rate table saved");
        Ok(())
    }

    async fn reset_rate_table(&self) -> Result<RateTable, RepositoryError> {
        sqlx::query("DELETE FROM rate_table")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        tracing::info!("rate table reset to defaults");
        Ok(RateTable::default())
    }

    async fn next_estimate_sequence(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query(
            "UPDATE estimate_sequence SET last_value = last_value + 1
             WHERE id = 1
             RETURNING last_value",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or_else(|| RepositoryError::Database("estimate sequence row is missing".to_string()))?;

        row.try_get("last_value")
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }

    /// Inserts the estimate, or replaces the one already saved under the
    /// same number. A replaced estimate keeps its id and, when the new copy
    /// has none, its sequence.
    async fn save_estimate(
        &self,
        estimate: NewSavedEstimate,
    ) -> Result<SavedEstimate, RepositoryError> {
        let saved_at = Utc::now();

        let row = sqlx::query(
            "INSERT INTO saved_estimate (
                estimate_number, sequence, created_at, saved_at,
                customer_json, services_json, notes, totals_json, customer_key
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (estimate_number) DO UPDATE SET
                sequence = COALESCE(excluded.sequence, saved_estimate.sequence),
                created_at = excluded.created_at,
                saved_at = excluded.saved_at,
                customer_json = excluded.customer_json,
                services_json = excluded.services_json,
                notes = excluded.notes,
                totals_json = excluded.totals_json,
                customer_key = excluded.customer_key
            RETURNING id, sequence",
        )
        .bind(&estimate.estimate_number)
        .bind(estimate.sequence)
        .bind(estimate.created_at)
        .bind(saved_at)
        .bind(to_json(&estimate.customer, "customer")?)
        .bind(to_json(&estimate.services, "services")?)
        .bind(&estimate.notes)
        .bind(to_json(&estimate.totals, "totals")?)
        .bind(normalize_customer_name(&estimate.customer.name))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        let sequence: Option<i64> = row
            .try_get("sequence")
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        tracing::info!(id, number = %estimate.estimate_number, "estimate saved");

        Ok(SavedEstimate {
            id,
            estimate_number: estimate.estimate_number,
            sequence,
            created_at: estimate.created_at,
            saved_at,
            customer: estimate.customer,
            services: estimate.services,
            notes: estimate.notes,
            totals: estimate.totals,
        })
    }

    async fn get_estimate(
        &self,
        id: i64,
    ) -> Result<SavedEstimate, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM saved_estimate WHERE id = ?",
            ESTIMATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_saved_estimate(&row)
    }

    async fn list_estimates(&self) -> Result<Vec<SavedEstimate>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM saved_estimate ORDER BY saved_at DESC, id DESC",
            ESTIMATE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_saved_estimate).collect()
    }

    async fn list_customer_estimates(
        &self,
        name: &str,
    ) -> Result<Vec<SavedEstimate>, RepositoryError> {
        let key = normalize_customer_name(name);
        if key.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(&format!(
            "SELECT {} FROM saved_estimate WHERE customer_key = ?
             ORDER BY saved_at DESC, id DESC",
            ESTIMATE_COLUMNS
        ))
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_saved_estimate).collect()
    }

    async fn delete_estimate(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM saved_estimate WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(id, "estimate deleted");
        Ok(())
    }

    async fn find_customer(
        &self,
        name: &str,
    ) -> Result<Option<CustomerRecord>, RepositoryError> {
        let key = normalize_customer_name(name);
        if key.is_empty() {
            return Ok(None);
        }

        let row = sqlx::query(&format!(
            "SELECT {} FROM customer WHERE name_key = ?",
            CUSTOMER_COLUMNS
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.as_ref().map(row_to_customer).transpose()
    }

    async fn list_customers(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT name FROM customer ORDER BY name_key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("name")
                    .map_err(|e| RepositoryError::Database(e.to_string()))
            })
            .collect()
    }

    async fn upsert_customer(
        &self,
        update: &CustomerUpdate,
    ) -> Result<CustomerRecord, RepositoryError> {
        let key = update.key();
        if key.is_empty() {
            return Err(RepositoryError::Database(
                "customer name must not be empty".to_string(),
            ));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let existing = sqlx::query(&format!(
            "SELECT {} FROM customer WHERE name_key = ?",
            CUSTOMER_COLUMNS
        ))
        .bind(&key)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let record = match existing {
            Some(row) => {
                let mut record = row_to_customer(&row)?;
                record.apply(update);
                sqlx::query(
                    "UPDATE customer
                     SET phone = ?, email = ?, address = ?, mow_sqft = ?,
                         application_sqft = ?, edging_ft = ?, maintenance_tier = ?
                     WHERE id = ?",
                )
                .bind(&record.phone)
                .bind(&record.email)
                .bind(&record.address)
                .bind(record.mow_sqft.map(decimal_to_text))
                .bind(record.application_sqft.map(decimal_to_text))
                .bind(record.edging_ft.map(decimal_to_text))
                .bind(record.maintenance_tier.as_str())
                .bind(record.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
                record
            }
            None => {
                let result = sqlx::query(
                    "INSERT INTO customer (
                        name_key, name, phone, email, address, mow_sqft,
                        application_sqft, edging_ft, maintenance_tier
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(&key)
                .bind(&update.name)
                .bind(&update.phone)
                .bind(&update.email)
                .bind(&update.address)
                .bind(update.mow_sqft.map(decimal_to_text))
                .bind(update.application_sqft.map(decimal_to_text))
                .bind(update.edging_ft.map(decimal_to_text))
                .bind(update.maintenance_tier.unwrap_or_default().as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
                update.clone().into_record(result.last_insert_rowid())
            }
        };

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        tracing::info!(customer = %record.name, "customer directory updated");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use quote_core::{
        Customer, EstimateDraft, LandscapeInputs, MaintenanceInputs, ServiceInputs,
        price_estimate,
    };
    use rust_decimal_macros::dec;

    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteRepository::new_with_pool(pool).await;
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn new_estimate(
        number: &str,
        name: &str,
    ) -> NewSavedEstimate {
        let services = ServiceInputs {
            landscape: Some(LandscapeInputs {
                mow_sqft: Some(dec!(12000)),
                ..Default::default()
            }),
            ..Default::default()
        };
        NewSavedEstimate {
            estimate_number: number.to_string(),
            sequence: Some(1),
            created_at: Utc.with_ymd_and_hms(2025, 4, 9, 15, 0, 0).unwrap(),
            customer: Customer {
                name: name.to_string(),
                ..Default::default()
            },
            totals: price_estimate(&services, &RateTable::default()).totals,
            services,
            notes: "Side gate".to_string(),
        }
    }

    fn customer_update(name: &str) -> CustomerUpdate {
        CustomerUpdate {
            name: name.to_string(),
            phone: "217-555-0101".to_string(),
            email: String::new(),
            address: "12 Elm St".to_string(),
            mow_sqft: Some(dec!(8000)),
            application_sqft: Some(dec!(8000)),
            edging_ft: None,
            maintenance_tier: Some(MaintenanceTier::Medium),
        }
    }

    // ==========================================================================
    // rate table
    // ==========================================================================

    #[tokio::test]
    async fn empty_store_loads_default_rates() {
        let repo = setup_test_db().await;

        assert_eq!(repo.load_rate_table().await, Ok(RateTable::default()));
    }

    #[tokio::test]
    async fn saved_rates_reload_exactly() {
        let repo = setup_test_db().await;
        let mut rates = RateTable::default();
        rates.labor_per_hour = dec!(62.50);
        rates.tax_rate = dec!(0.0725);
        rates.fertilization_per_sqft = dec!(0.0135);

        repo.save_rate_table(&rates).await.unwrap();

        assert_eq!(repo.load_rate_table().await, Ok(rates));
    }

    #[tokio::test]
    async fn partial_rows_merge_over_defaults() {
        let repo = setup_test_db().await;
        sqlx::query(
            "INSERT INTO rate_table (name, value) VALUES
             ('mulch_per_yd3', 41), ('sod_per_sqft', 0.6), ('retired_rate', '9')",
        )
        .execute(repo.pool())
        .await
        .unwrap();

        let rates = repo.load_rate_table().await.unwrap();

        assert_eq!(rates.mulch_per_yd3, dec!(41));
        assert_eq!(rates.sod_per_sqft, dec!(0.6));
        assert_eq!(rates.labor_per_hour, RateTable::default().labor_per_hour);
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let repo = setup_test_db().await;
        let mut rates = RateTable::default();
        rates.rock_per_yd3 = dec!(150);
        repo.save_rate_table(&rates).await.unwrap();

        let reset = repo.reset_rate_table().await.unwrap();

        assert_eq!(reset, RateTable::default());
        assert_eq!(repo.load_rate_table().await, Ok(RateTable::default()));
    }

    // ==========================================================================
    // estimate numbering
    // ==========================================================================

    #[tokio::test]
    async fn sequence_starts_at_one_and_increments() {
        let repo = setup_test_db().await;

        assert_eq!(repo.next_estimate_sequence().await, Ok(1));
        assert_eq!(repo.next_estimate_sequence().await, Ok(2));
        assert_eq!(repo.next_estimate_sequence().await, Ok(3));
    }

    // ==========================================================================
    // saved estimates
    // ==========================================================================

    #[tokio::test]
    async fn saved_estimate_round_trips() {
        let repo = setup_test_db().await;

        let saved = repo
            .save_estimate(new_estimate("EST-20250409-0001", "Dana Whitfield"))
            .await
            .unwrap();
        let loaded = repo.get_estimate(saved.id).await.unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(loaded.totals.per_category.landscape, dec!(55));
    }

    #[tokio::test]
    async fn frozen_totals_survive_rate_changes() {
        let repo = setup_test_db().await;
        let saved = repo
            .save_estimate(new_estimate("EST-20250409-0001", "Dana Whitfield"))
            .await
            .unwrap();

        let mut rates = RateTable::default();
        rates.labor_per_hour = dec!(90);
        repo.save_rate_table(&rates).await.unwrap();

        let loaded = repo.get_estimate(saved.id).await.unwrap();
        assert_eq!(loaded.totals, saved.totals);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = setup_test_db().await;
        let first = repo
            .save_estimate(new_estimate("EST-20250409-0001", "A"))
            .await
            .unwrap();
        let second = repo
            .save_estimate(new_estimate("EST-20250409-0002", "B"))
            .await
            .unwrap();

        let ids: Vec<i64> = repo
            .list_estimates()
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn resaving_a_number_replaces_the_estimate() {
        let repo = setup_test_db().await;
        let first = repo
            .save_estimate(new_estimate("EST-20250409-0001", "Dana Whitfield"))
            .await
            .unwrap();

        let mut edited = new_estimate("EST-20250409-0001", "Dana Whitfield");
        edited.sequence = None;
        edited.notes = "Gate moved to the east side".to_string();
        edited.totals.total = dec!(99.99);
        let second = repo.save_estimate(edited).await.unwrap();

        let all = repo.list_estimates().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(second.id, first.id);
        assert_eq!(second.sequence, Some(1));
        assert_eq!(all[0].notes, "Gate moved to the east side");
        assert_eq!(all[0].totals.total, dec!(99.99));
    }

    #[tokio::test]
    async fn customer_estimates_match_name_ignoring_case() {
        let repo = setup_test_db().await;
        let older = repo
            .save_estimate(new_estimate("EST-20250409-0001", "Dana Whitfield"))
            .await
            .unwrap();
        repo.save_estimate(new_estimate("EST-20250409-0002", "Rosa Marquez"))
            .await
            .unwrap();
        let newer = repo
            .save_estimate(new_estimate("EST-20250409-0003", "  DANA whitfield"))
            .await
            .unwrap();

        let ids: Vec<i64> = repo
            .list_customer_estimates("dana Whitfield ")
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids, vec![newer.id, older.id]);
        assert_eq!(repo.list_customer_estimates("  ").await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn get_missing_estimate_is_not_found() {
        let repo = setup_test_db().await;

        assert_eq!(repo.get_estimate(42).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_estimate() {
        let repo = setup_test_db().await;
        let saved = repo
            .save_estimate(new_estimate("EST-20250409-0001", "A"))
            .await
            .unwrap();

        repo.delete_estimate(saved.id).await.unwrap();

        assert_eq!(repo.get_estimate(saved.id).await, Err(RepositoryError::NotFound));
        assert_eq!(repo.delete_estimate(saved.id).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn reopened_estimate_becomes_draft() {
        let repo = setup_test_db().await;
        let saved = repo
            .save_estimate(new_estimate("EST-20250409-0001", "Dana"))
            .await
            .unwrap();

        let draft: EstimateDraft = repo.get_estimate(saved.id).await.unwrap().to_draft();

        assert_eq!(draft.estimate_number.as_deref(), Some("EST-20250409-0001"));
        assert_eq!(draft.notes, "Side gate");
    }

    // ==========================================================================
    // customer directory
    // ==========================================================================

    #[tokio::test]
    async fn upsert_inserts_then_finds_case_insensitively() {
        let repo = setup_test_db().await;

        let created = repo
            .upsert_customer(&customer_update("Dana Whitfield"))
            .await
            .unwrap();
        let found = repo.find_customer("  dana WHITFIELD ").await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn upsert_keeps_contact_fields_when_blank() {
        let repo = setup_test_db().await;
        repo.upsert_customer(&customer_update("Dana Whitfield"))
            .await
            .unwrap();

        let later = CustomerUpdate {
            phone: String::new(),
            email: "dana@example.com".to_string(),
            address: String::new(),
            mow_sqft: Some(dec!(9500)),
            application_sqft: None,
            edging_ft: Some(dec!(60)),
            maintenance_tier: None,
            ..customer_update("dana whitfield")
        };
        let record = repo.upsert_customer(&later).await.unwrap();

        assert_eq!(record.name, "Dana Whitfield");
        assert_eq!(record.phone, "217-555-0101");
        assert_eq!(record.email, "dana@example.com");
        assert_eq!(record.address, "12 Elm St");
        assert_eq!(record.mow_sqft, Some(dec!(9500)));
        assert_eq!(record.application_sqft, Some(dec!(8000)));
        assert_eq!(record.edging_ft, Some(dec!(60)));
        assert_eq!(record.maintenance_tier, MaintenanceTier::Medium);
        assert_eq!(repo.find_customer("Dana Whitfield").await, Ok(Some(record)));
    }

    #[tokio::test]
    async fn customers_are_listed_sorted() {
        let repo = setup_test_db().await;
        for name in ["zoe park", "Adam Lee", "maria Diaz"] {
            repo.upsert_customer(&customer_update(name)).await.unwrap();
        }

        assert_eq!(
            repo.list_customers().await.unwrap(),
            vec!["Adam Lee", "maria Diaz", "zoe park"]
        );
    }

    #[tokio::test]
    async fn blank_name_is_rejected_and_never_found() {
        let repo = setup_test_db().await;

        assert!(repo.upsert_customer(&customer_update("   ")).await.is_err());
        assert_eq!(repo.find_customer("").await, Ok(None));
    }

    #[tokio::test]
    async fn draft_update_feeds_directory() {
        let repo = setup_test_db().await;
        let draft = EstimateDraft {
            customer: Customer {
                name: "Lee Ortiz".to_string(),
                ..Default::default()
            },
            services: ServiceInputs {
                landscape: Some(LandscapeInputs {
                    mow_sqft: Some(dec!(7000)),
                    ..Default::default()
                }),
                maintenance: Some(MaintenanceInputs {
                    tier: MaintenanceTier::Small,
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };

        let update = CustomerUpdate::from_draft(&draft).unwrap();
        let record = repo.upsert_customer(&update).await.unwrap();

        assert_eq!(record.application_sqft, Some(dec!(7000)));
        assert_eq!(record.maintenance_tier, MaintenanceTier::Small);
    }
}
