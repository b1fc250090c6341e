use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::choice::MaintenanceTier;
use super::service_inputs::ServiceInputs;
use super::totals::AggregateTotals;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// The estimate being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateDraft {
    /// Display number, assigned on save when missing.
    pub estimate_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub customer: Customer,
    pub services: ServiceInputs,
    pub notes: String,
}

impl EstimateDraft {
    /// A copy of this draft under a new number and date, with `" (Copy)"`
    /// appended to the customer name.
    pub fn duplicate(
        &self,
        estimate_number: String,
        now: DateTime<Utc>,
    ) -> Self {
        let name = match self.customer.name.trim() {
            "" => "Customer",
            name => name,
        };

        Self {
            estimate_number: Some(estimate_number),
            created_at: Some(now),
            customer: Customer {
                name: format!("{name} (Copy)"),
                ..self.customer.clone()
            },
            ..self.clone()
        }
    }

    /// Fills blank contact fields from a known customer whose name matches
    /// (ignoring case and surrounding whitespace). Anything already typed
    /// into the draft is kept. Returns whether a field was filled.
    pub fn fill_contact_from(
        &mut self,
        known: &CustomerRecord,
    ) -> bool {
        if normalize_customer_name(&known.name) != normalize_customer_name(&self.customer.name) {
            return false;
        }

        let mut filled = false;
        for (field, stored) in [
            (&mut self.customer.phone, &known.phone),
            (&mut self.customer.email, &known.email),
            (&mut self.customer.address, &known.address),
        ] {
            if field.trim().is_empty() && !stored.trim().is_empty() {
                *field = stored.clone();
                filled = true;
            }
        }
        filled
    }
}

/// Formats a display number as `EST-YYYYMMDD-NNNN`.
///
/// ```
/// use chrono::NaiveDate;
/// use quote_core::format_estimate_number;
///
/// let date = NaiveDate::from_ymd_opt(2025, 4, 9).unwrap();
/// assert_eq!(format_estimate_number(date, 7), "EST-20250409-0007");
/// ```
pub fn format_estimate_number(
    date: NaiveDate,
    sequence: i64,
) -> String {
    format!("EST-{}-{:04}", date.format("%Y%m%d"), sequence)
}

/// Directory key for a customer name.
pub fn normalize_customer_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A frozen estimate. The totals are those computed when it was saved and
/// are never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEstimate {
    pub id: i64,
    pub estimate_number: String,
    pub sequence: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub saved_at: DateTime<Utc>,
    pub customer: Customer,
    pub services: ServiceInputs,
    pub notes: String,
    pub totals: AggregateTotals,
}

impl SavedEstimate {
    /// Reopens the snapshot as an editable draft.
    pub fn to_draft(&self) -> EstimateDraft {
        EstimateDraft {
            estimate_number: Some(self.estimate_number.clone()),
            created_at: Some(self.created_at),
            customer: self.customer.clone(),
            services: self.services.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// For saving new estimates (no id or save timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavedEstimate {
    pub estimate_number: String,
    pub sequence: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub customer: Customer,
    pub services: ServiceInputs,
    pub notes: String,
    pub totals: AggregateTotals,
}

/// A customer directory entry, with the measurements remembered from their
/// last saved estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub mow_sqft: Option<Decimal>,
    pub application_sqft: Option<Decimal>,
    pub edging_ft: Option<Decimal>,
    pub maintenance_tier: MaintenanceTier,
}

/// What saving a draft contributes to the customer directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub mow_sqft: Option<Decimal>,
    pub application_sqft: Option<Decimal>,
    pub edging_ft: Option<Decimal>,
    pub maintenance_tier: Option<MaintenanceTier>,
}

impl CustomerUpdate {
    /// `None` when the draft has no customer name.
    pub fn from_draft(draft: &EstimateDraft) -> Option<Self> {
        let name = draft.customer.name.trim();
        if name.is_empty() {
            return None;
        }

        let services = &draft.services;
        let landscape = services.landscape.as_ref();
        let mow_sqft = services.mow_sqft();
        let application_sqft = services
            .applications
            .as_ref()
            .and_then(|a| a.application_sqft)
            .or(mow_sqft);

        Some(Self {
            name: name.to_string(),
            phone: draft.customer.phone.trim().to_string(),
            email: draft.customer.email.trim().to_string(),
            address: draft.customer.address.trim().to_string(),
            mow_sqft,
            application_sqft,
            edging_ft: landscape.and_then(|l| l.edging_ft),
            maintenance_tier: services.maintenance.as_ref().map(|m| m.tier),
        })
    }

    pub fn key(&self) -> String {
        normalize_customer_name(&self.name)
    }

    /// A fresh directory entry for a customer not seen before.
    pub fn into_record(
        self,
        id: i64,
    ) -> CustomerRecord {
        CustomerRecord {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            mow_sqft: self.mow_sqft,
            application_sqft: self.application_sqft,
            edging_ft: self.edging_ft,
            maintenance_tier: self.maintenance_tier.unwrap_or_default(),
        }
    }
}

impl CustomerRecord {
    /// Merges a later save into this entry. Contact fields only change when
    /// the update carries a value; remembered measurements are refreshed when
    /// the draft has them.
    pub fn apply(
        &mut self,
        update: &CustomerUpdate,
    ) {
        for (field, incoming) in [
            (&mut self.phone, &update.phone),
            (&mut self.email, &update.email),
            (&mut self.address, &update.address),
        ] {
            if !incoming.is_empty() {
                *field = incoming.clone();
            }
        }

        if update.mow_sqft.is_some() {
            self.mow_sqft = update.mow_sqft;
        }
        if update.application_sqft.is_some() {
            self.application_sqft = update.application_sqft;
        }
        if update.edging_ft.is_some() {
            self.edging_ft = update.edging_ft;
        }
        if let Some(tier) = update.maintenance_tier {
            self.maintenance_tier = tier;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{ApplicationInputs, LandscapeInputs, MaintenanceInputs};

    fn draft() -> EstimateDraft {
        EstimateDraft {
            estimate_number: Some("EST-20250409-0007".to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2025, 4, 9, 15, 0, 0).unwrap()),
            customer: Customer {
                name: "  Dana Whitfield ".to_string(),
                phone: "217-555-0101".to_string(),
                email: String::new(),
                address: "12 Elm St".to_string(),
            },
            services: ServiceInputs {
                landscape: Some(LandscapeInputs {
                    mow_sqft: Some(dec!(8000)),
                    edging_ft: Some(dec!(40)),
                    ..Default::default()
                }),
                maintenance: Some(MaintenanceInputs {
                    tier: MaintenanceTier::Large,
                    ..Default::default()
                }),
                ..Default::default()
            },
            notes: "Gate code 4411".to_string(),
        }
    }

    fn record() -> CustomerRecord {
        CustomerRecord {
            id: 3,
            name: "Dana Whitfield".to_string(),
            phone: "217-555-0000".to_string(),
            email: "dana@example.com".to_string(),
            address: String::new(),
            mow_sqft: Some(dec!(6000)),
            application_sqft: Some(dec!(5000)),
            edging_ft: None,
            maintenance_tier: MaintenanceTier::Small,
        }
    }

    // =========================================================================
    // estimate numbers
    // =========================================================================

    #[test]
    fn estimate_number_pads_sequence() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

        assert_eq!(format_estimate_number(date, 1), "EST-20251231-0001");
        assert_eq!(format_estimate_number(date, 12345), "EST-20251231-12345");
    }

    // =========================================================================
    // duplicate
    // =========================================================================

    #[test]
    fn duplicate_appends_copy_and_renumbers() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 9, 30, 0).unwrap();

        let copy = draft().duplicate("EST-20250501-0008".to_string(), now);

        assert_eq!(copy.estimate_number.as_deref(), Some("EST-20250501-0008"));
        assert_eq!(copy.created_at, Some(now));
        assert_eq!(copy.customer.name, "Dana Whitfield (Copy)");
        assert_eq!(copy.services, draft().services);
        assert_eq!(copy.notes, "Gate code 4411");
    }

    #[test]
    fn duplicate_of_unnamed_draft_uses_placeholder() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 9, 30, 0).unwrap();

        let copy = EstimateDraft::default().duplicate("EST-20250501-0009".to_string(), now);

        assert_eq!(copy.customer.name, "Customer (Copy)");
    }

    // =========================================================================
    // customer directory
    // =========================================================================

    #[test]
    fn update_from_draft_requires_a_name() {
        assert_eq!(CustomerUpdate::from_draft(&EstimateDraft::default()), None);
    }

    #[test]
    fn update_from_draft_remembers_measurements() {
        let update = CustomerUpdate::from_draft(&draft()).unwrap();

        assert_eq!(update.name, "Dana Whitfield");
        assert_eq!(update.key(), "dana whitfield");
        assert_eq!(update.mow_sqft, Some(dec!(8000)));
        // No applications area entered, so the mowable area stands in.
        assert_eq!(update.application_sqft, Some(dec!(8000)));
        assert_eq!(update.edging_ft, Some(dec!(40)));
        assert_eq!(update.maintenance_tier, Some(MaintenanceTier::Large));
    }

    #[test]
    fn update_prefers_explicit_application_area() {
        let mut d = draft();
        d.services.applications = Some(ApplicationInputs {
            application_sqft: Some(dec!(3500)),
            ..Default::default()
        });

        let update = CustomerUpdate::from_draft(&d).unwrap();

        assert_eq!(update.application_sqft, Some(dec!(3500)));
    }

    #[test]
    fn apply_keeps_stored_contact_when_update_is_blank() {
        let mut existing = record();
        let update = CustomerUpdate::from_draft(&draft()).unwrap();

        existing.apply(&update);

        assert_eq!(existing.phone, "217-555-0101");
        assert_eq!(existing.email, "dana@example.com");
        assert_eq!(existing.address, "12 Elm St");
        assert_eq!(existing.mow_sqft, Some(dec!(8000)));
        assert_eq!(existing.edging_ft, Some(dec!(40)));
        assert_eq!(existing.maintenance_tier, MaintenanceTier::Large);
    }

    #[test]
    fn fill_contact_requires_matching_name() {
        let mut d = EstimateDraft {
            customer: Customer {
                name: "dana whitfield".to_string(),
                address: "12 Elm St".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(d.fill_contact_from(&record()));
        assert_eq!(d.customer.phone, "217-555-0000");
        assert_eq!(d.customer.email, "dana@example.com");
        assert_eq!(d.customer.address, "12 Elm St");

        let mut other = EstimateDraft::default();
        other.customer.name = "Dan".to_string();
        assert!(!other.fill_contact_from(&record()));
        assert_eq!(other.customer.phone, "");
    }

    #[test]
    fn fill_contact_keeps_what_the_draft_already_has() {
        let mut d = EstimateDraft {
            customer: Customer {
                name: "Dana Whitfield".to_string(),
                phone: "217-555-0222".to_string(),
                email: "  ".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(d.fill_contact_from(&record()));
        assert_eq!(d.customer.phone, "217-555-0222");
        assert_eq!(d.customer.email, "dana@example.com");
        assert_eq!(d.customer.address, "");

        let mut complete = d.clone();
        assert!(!complete.fill_contact_from(&record()));
        assert_eq!(complete, d);
    }
}
