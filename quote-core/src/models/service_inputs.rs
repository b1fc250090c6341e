//! Everything entered for one estimate, grouped by service category.
//!
//! A category's sub-record is either present (the category is selected) or
//! absent. A present record with empty fields means "selected but not yet
//! measured" and prices to nothing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::choice::{AccessDifficulty, BedCover, Frequency, LeafDepth, MaintenanceTier, PaverTier};
use super::lenient;

/// Default contract length when none is entered.
pub const DEFAULT_CONTRACT_MONTHS: i64 = 8;

/// Highest applications-per-year count a treatment accepts.
pub const MAX_APPLICATIONS_PER_YEAR: i64 = 4;

/// The five service lines, in the order they appear on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Landscape,
    Applications,
    Hardscape,
    Maintenance,
    Seasonal,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Landscape,
        Category::Applications,
        Category::Hardscape,
        Category::Maintenance,
        Category::Seasonal,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Landscape => "Mowing & Bed Refurbishing",
            Self::Applications => "Applications",
            Self::Hardscape => "Hardscape",
            Self::Maintenance => "Maintenance",
            Self::Seasonal => "Seasonal",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Applications => "applications",
            Self::Hardscape => "hardscape",
            Self::Maintenance => "maintenance",
            Self::Seasonal => "seasonal",
        }
    }
}

/// Mowing and bed refurbishment measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandscapeInputs {
    #[serde(deserialize_with = "lenient::decimal")]
    pub mow_sqft: Option<Decimal>,
    #[serde(deserialize_with = "lenient::whole")]
    pub bed_count: Option<i64>,
    #[serde(deserialize_with = "lenient::choice")]
    pub bed_cover: BedCover,
    #[serde(deserialize_with = "lenient::decimal")]
    pub bed_avg_depth_in: Option<Decimal>,
    #[serde(deserialize_with = "lenient::decimal")]
    pub bed_sqft_total: Option<Decimal>,
    #[serde(deserialize_with = "lenient::decimal")]
    pub sod_sqft: Option<Decimal>,
    #[serde(deserialize_with = "lenient::decimal")]
    pub edging_ft: Option<Decimal>,
}

/// One lawn treatment: whether it is included and how many times a year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Treatment {
    #[serde(deserialize_with = "lenient::toggle")]
    pub enabled: bool,
    #[serde(deserialize_with = "lenient::whole")]
    pub per_year: Option<i64>,
}

impl Treatment {
    pub fn new(per_year: i64) -> Self {
        Self {
            enabled: true,
            per_year: Some(per_year),
        }
    }

    /// Applications per year, clamped to `0..=4`.
    pub fn count(&self) -> i64 {
        self.per_year
            .unwrap_or(0)
            .clamp(0, MAX_APPLICATIONS_PER_YEAR)
    }
}

/// Per-square-foot lawn treatments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationInputs {
    /// Treated area; falls back to the mowable area when unset.
    #[serde(deserialize_with = "lenient::decimal")]
    pub application_sqft: Option<Decimal>,
    pub fertilization: Treatment,
    pub weed_control: Treatment,
    pub pest_control: Treatment,
    pub disease_control: Treatment,
    pub aeration: Treatment,
    pub overseeding: Treatment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardscapeInputs {
    #[serde(deserialize_with = "lenient::decimal")]
    pub patio_sqft: Option<Decimal>,
    #[serde(deserialize_with = "lenient::choice")]
    pub paver_tier: PaverTier,
    #[serde(deserialize_with = "lenient::decimal")]
    pub border_ft: Option<Decimal>,
    #[serde(deserialize_with = "lenient::decimal")]
    pub drainage_ft: Option<Decimal>,
    #[serde(deserialize_with = "lenient::whole")]
    pub steps_count: Option<i64>,
    #[serde(deserialize_with = "lenient::whole")]
    pub lighting_count: Option<i64>,
    #[serde(deserialize_with = "lenient::choice")]
    pub access_difficulty: AccessDifficulty,
}

/// Recurring maintenance contract. Base mowing is always part of the
/// contract; the other sub-services are opt-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceInputs {
    #[serde(deserialize_with = "lenient::choice")]
    pub tier: MaintenanceTier,
    #[serde(deserialize_with = "lenient::choice")]
    pub base_frequency: Frequency,
    #[serde(deserialize_with = "lenient::toggle")]
    pub include_trim: bool,
    #[serde(deserialize_with = "lenient::choice")]
    pub trim_frequency: Frequency,
    #[serde(deserialize_with = "lenient::toggle")]
    pub include_beds: bool,
    #[serde(deserialize_with = "lenient::choice")]
    pub beds_frequency: Frequency,
    #[serde(deserialize_with = "lenient::toggle")]
    pub include_edge: bool,
    #[serde(deserialize_with = "lenient::choice")]
    pub edge_frequency: Frequency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalInputs {
    #[serde(deserialize_with = "lenient::choice")]
    pub leaf_depth: LeafDepth,
    #[serde(deserialize_with = "lenient::whole")]
    pub clean_beds_count: Option<i64>,
    #[serde(deserialize_with = "lenient::toggle")]
    pub gutter_clean: bool,
    #[serde(deserialize_with = "lenient::toggle")]
    pub haul_away: bool,
    #[serde(deserialize_with = "lenient::decimal")]
    pub limb_volume_yd3: Option<Decimal>,
}

/// Estimate-wide billing controls.
///
/// `months` doubles as the maintenance contract length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentControls {
    #[serde(deserialize_with = "lenient::toggle")]
    pub monthly_payments: bool,
    #[serde(deserialize_with = "lenient::whole")]
    pub months: Option<i64>,
    #[serde(deserialize_with = "lenient::decimal")]
    pub prepay_discount_percent: Option<Decimal>,
}

impl PaymentControls {
    /// Contract months, defaulting to eight when unset.
    pub fn contract_months(&self) -> i64 {
        self.months.unwrap_or(DEFAULT_CONTRACT_MONTHS)
    }
}

/// The full Service Input Set for one estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInputs {
    pub landscape: Option<LandscapeInputs>,
    pub applications: Option<ApplicationInputs>,
    pub hardscape: Option<HardscapeInputs>,
    pub maintenance: Option<MaintenanceInputs>,
    pub seasonal: Option<SeasonalInputs>,
    pub payment: PaymentControls,
}

/// The inputs of one selected category, borrowed from a [`ServiceInputs`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CategoryInputs<'a> {
    Landscape(&'a LandscapeInputs),
    Applications(&'a ApplicationInputs),
    Hardscape(&'a HardscapeInputs),
    Maintenance(&'a MaintenanceInputs),
    Seasonal(&'a SeasonalInputs),
}

impl ServiceInputs {
    /// The inputs for `category`, or `None` when the category is not selected.
    pub fn category(&self, category: Category) -> Option<CategoryInputs<'_>> {
        match category {
            Category::Landscape => self.landscape.as_ref().map(CategoryInputs::Landscape),
            Category::Applications => self.applications.as_ref().map(CategoryInputs::Applications),
            Category::Hardscape => self.hardscape.as_ref().map(CategoryInputs::Hardscape),
            Category::Maintenance => self.maintenance.as_ref().map(CategoryInputs::Maintenance),
            Category::Seasonal => self.seasonal.as_ref().map(CategoryInputs::Seasonal),
        }
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.category(category).is_some()
    }

    /// Selected categories in quote order.
    pub fn enabled_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }

    /// Mowable area entered under Mowing & Bed Refurbishing, if any.
    pub fn mow_sqft(&self) -> Option<Decimal> {
        self.landscape.as_ref().and_then(|l| l.mow_sqft)
    }
}
