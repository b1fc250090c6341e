//! Command handlers. Each returns the text the binary prints on stdout.

use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use quote_core::export::{CompanyProfile, line_items_csv, quote_email_subject, render_quote_text};
use quote_core::{
    CustomerRecord, CustomerUpdate, EstimateDraft, EstimateRepository, NewSavedEstimate,
    RateTable, RepositoryError, RepositoryRegistry, SavedEstimate, format_estimate_number,
    price_estimate,
};
use quote_data::RateTableLoader;
use quote_db_sqlite::SqliteRepositoryFactory;
use serde::Serialize;

use crate::cli::{Command, QuoteFormat, RatesCommand, SavedFormat};
use crate::utils::{mailto_url, opt_decimal_display, parse_decimal};

/// Every storage backend this binary can open.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Reads a draft estimate from a JSON file. Form values are read leniently,
/// so only malformed JSON is an error.
pub fn read_draft(path: &Path) -> Result<EstimateDraft> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse draft: {}", path.display()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to encode JSON")
}

fn format_rates(rates: &RateTable) -> String {
    let mut out = String::new();
    for (name, value) in rates.entries() {
        let _ = writeln!(out, "{name:<32} {}", value.normalize());
    }
    out
}

fn customer_name(name: &str) -> &str {
    match name.trim() {
        "" => "Customer",
        name => name,
    }
}

pub struct Estimator {
    repo: Box<dyn EstimateRepository>,
    company: CompanyProfile,
}

impl Estimator {
    pub fn new(
        repo: Box<dyn EstimateRepository>,
        company: CompanyProfile,
    ) -> Self {
        Self { repo, company }
    }

    pub fn repository(&self) -> &dyn EstimateRepository {
        &*self.repo
    }

    pub async fn run(
        &self,
        command: Command,
        now: DateTime<Utc>,
    ) -> Result<String> {
        match command {
            Command::Quote { draft, format } => self.quote(read_draft(&draft)?, format, now).await,
            Command::Email { draft } => self.email(read_draft(&draft)?, now).await,
            Command::Save { draft } => {
                let saved = self.save(read_draft(&draft)?, now).await?;
                Ok(format!(
                    "Saved estimate #{} {} for {}: {}",
                    saved.id,
                    saved.estimate_number,
                    customer_name(&saved.customer.name),
                    self.company.money(saved.totals.total)
                ))
            }
            Command::List => self.list().await,
            Command::Show { id, format } => self.show(id, format).await,
            Command::Delete { id } => {
                self.delete(id).await?;
                Ok(format!("Deleted estimate #{id}"))
            }
            Command::Duplicate { id } => to_json(&self.duplicate(id, now).await?),
            Command::Customer { name } => self.customer(&name).await,
            Command::Customers => Ok(self.repo.list_customers().await?.join("\n")),
            Command::Rates { command } => self.rates(command).await,
        }
    }

    /// Dates an undated draft and fills blank contact fields from the
    /// customer directory.
    async fn prepare(
        &self,
        mut draft: EstimateDraft,
        now: DateTime<Utc>,
    ) -> Result<EstimateDraft> {
        draft.created_at.get_or_insert(now);
        if let Some(known) = self.repo.find_customer(&draft.customer.name).await? {
            if draft.fill_contact_from(&known) {
                tracing::debug!(customer = %known.name, "contact details filled from directory");
            }
        }
        Ok(draft)
    }

    async fn fetch(
        &self,
        id: i64,
    ) -> Result<SavedEstimate> {
        match self.repo.get_estimate(id).await {
            Err(RepositoryError::NotFound) => bail!("no saved estimate with id {id}"),
            other => Ok(other?),
        }
    }

    pub async fn quote(
        &self,
        draft: EstimateDraft,
        format: QuoteFormat,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let draft = self.prepare(draft, now).await?;
        let rates = self.repo.load_rate_table().await?;
        let priced = price_estimate(&draft.services, &rates);

        Ok(match format {
            QuoteFormat::Text => render_quote_text(&draft, &priced.totals, &self.company),
            QuoteFormat::Csv => line_items_csv(&priced.groups)?,
            QuoteFormat::Json => to_json(&priced)?,
        })
    }

    pub async fn email(
        &self,
        draft: EstimateDraft,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let draft = self.prepare(draft, now).await?;
        let rates = self.repo.load_rate_table().await?;
        let totals = price_estimate(&draft.services, &rates).totals;

        let subject = quote_email_subject(&draft);
        let body = render_quote_text(&draft, &totals, &self.company);
        let link = mailto_url(&draft.customer.email, &subject, &body);

        Ok(format!(
            "To: {}\nSubject: {}\n\n{}\n\n{}",
            draft.customer.email.trim(),
            subject,
            body,
            link
        ))
    }

    /// Prices and stores `draft` with its totals frozen. Drafts without a
    /// number get the next one from the store.
    pub async fn save(
        &self,
        draft: EstimateDraft,
        now: DateTime<Utc>,
    ) -> Result<SavedEstimate> {
        let draft = self.prepare(draft, now).await?;
        let created_at = draft.created_at.unwrap_or(now);

        let existing_number = draft
            .estimate_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let (estimate_number, sequence) = match existing_number {
            Some(number) => (number.to_string(), None),
            None => {
                let sequence = self.repo.next_estimate_sequence().await?;
                (
                    format_estimate_number(created_at.date_naive(), sequence),
                    Some(sequence),
                )
            }
        };

        let rates = self.repo.load_rate_table().await?;
        let totals = price_estimate(&draft.services, &rates).totals;

        let saved = self
            .repo
            .save_estimate(NewSavedEstimate {
                estimate_number,
                sequence,
                created_at,
                customer: draft.customer.clone(),
                services: draft.services.clone(),
                notes: draft.notes.clone(),
                totals,
            })
            .await?;

        if let Some(update) = CustomerUpdate::from_draft(&draft) {
            self.repo.upsert_customer(&update).await?;
        }

        Ok(saved)
    }

    pub async fn list(&self) -> Result<String> {
        let estimates = self.repo.list_estimates().await?;
        if estimates.is_empty() {
            return Ok("No saved estimates.".to_string());
        }

        let mut out = String::new();
        for estimate in &estimates {
            writeln!(
                out,
                "{:>5}  {:<18}  {}  {:<28}  {:>14}",
                estimate.id,
                estimate.estimate_number,
                estimate.created_at.format("%Y-%m-%d"),
                customer_name(&estimate.customer.name),
                self.company.money(estimate.totals.total)
            )?;
        }
        Ok(out)
    }

    /// A saved estimate as it was priced when saved.
    pub async fn show(
        &self,
        id: i64,
        format: SavedFormat,
    ) -> Result<String> {
        let saved = self.fetch(id).await?;
        Ok(match format {
            SavedFormat::Text => render_quote_text(&saved.to_draft(), &saved.totals, &self.company),
            SavedFormat::Json => to_json(&saved)?,
        })
    }

    pub async fn delete(
        &self,
        id: i64,
    ) -> Result<()> {
        match self.repo.delete_estimate(id).await {
            Err(RepositoryError::NotFound) => bail!("no saved estimate with id {id}"),
            other => Ok(other?),
        }
    }

    /// A new draft copied from a saved estimate, under the next number.
    pub async fn duplicate(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<EstimateDraft> {
        let original = self.fetch(id).await?.to_draft();
        let sequence = self.repo.next_estimate_sequence().await?;
        Ok(original.duplicate(format_estimate_number(now.date_naive(), sequence), now))
    }

    pub async fn customer(
        &self,
        name: &str,
    ) -> Result<String> {
        let Some(record) = self.repo.find_customer(name).await? else {
            return Ok(format!("No customer named '{}'.", name.trim()));
        };

        let mut out = describe_customer(&record);
        let estimates = self.repo.list_customer_estimates(&record.name).await?;
        if estimates.is_empty() {
            out.push_str("\nEstimates: none");
            return Ok(out);
        }
        out.push_str("\nEstimates:");
        for estimate in &estimates {
            write!(
                out,
                "\n  #{} {}  {}  {}",
                estimate.id,
                estimate.estimate_number,
                estimate.created_at.format("%Y-%m-%d"),
                self.company.money(estimate.totals.total)
            )?;
        }
        Ok(out)
    }

    pub async fn rates(
        &self,
        command: RatesCommand,
    ) -> Result<String> {
        match command {
            RatesCommand::Show => Ok(format_rates(&self.repo.load_rate_table().await?)),
            RatesCommand::Set { name, value } => {
                let value = parse_decimal(&value)?;
                if value.is_sign_negative() && !value.is_zero() {
                    bail!("rate '{name}' cannot be negative");
                }
                let mut rates = self.repo.load_rate_table().await?;
                rates.set(&name, value)?;
                self.repo.save_rate_table(&rates).await?;
                Ok(format!("{name} = {}", value.normalize()))
            }
            RatesCommand::Reset => Ok(format_rates(&self.repo.reset_rate_table().await?)),
            RatesCommand::Import { file } => {
                let reader = File::open(&file)
                    .with_context(|| format!("Failed to open: {}", file.display()))?;
                let records = RateTableLoader::parse(reader)
                    .with_context(|| format!("Failed to parse CSV: {}", file.display()))?;
                let rates = RateTableLoader::load(&*self.repo, &records)
                    .await
                    .context("Failed to import rates")?;
                Ok(format!(
                    "Imported {} rates from {}\n{}",
                    records.len(),
                    file.display(),
                    format_rates(&rates)
                ))
            }
        }
    }
}

fn describe_customer(record: &CustomerRecord) -> String {
    let tier = match record.maintenance_tier.label() {
        "" => "none",
        label => label,
    };
    [
        format!("Name: {}", record.name),
        format!("Phone: {}", record.phone),
        format!("Email: {}", record.email),
        format!("Address: {}", record.address),
        format!("Mowable area (sqft): {}", opt_decimal_display(&record.mow_sqft)),
        format!(
            "Application area (sqft): {}",
            opt_decimal_display(&record.application_sqft)
        ),
        format!("Edging (ft): {}", opt_decimal_display(&record.edging_ft)),
        format!("Maintenance size: {tier}"),
    ]
    .join("\n")
}
