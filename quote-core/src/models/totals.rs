use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::service_inputs::Category;
use crate::calculations::common::total;

/// Per-category totals, zero for categories that are not selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTotals {
    pub landscape: Decimal,
    pub applications: Decimal,
    pub hardscape: Decimal,
    pub maintenance: Decimal,
    pub seasonal: Decimal,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> Decimal {
        match category {
            Category::Landscape => self.landscape,
            Category::Applications => self.applications,
            Category::Hardscape => self.hardscape,
            Category::Maintenance => self.maintenance,
            Category::Seasonal => self.seasonal,
        }
    }

    pub fn set(
        &mut self,
        category: Category,
        amount: Decimal,
    ) {
        let slot = match category {
            Category::Landscape => &mut self.landscape,
            Category::Applications => &mut self.applications,
            Category::Hardscape => &mut self.hardscape,
            Category::Maintenance => &mut self.maintenance,
            Category::Seasonal => &mut self.seasonal,
        };
        *slot = amount;
    }

    pub fn sum(&self) -> Decimal {
        total(Category::ALL.iter().map(|c| self.get(*c)))
    }
}

/// Estimate-wide monthly payment schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPlan {
    pub enabled: bool,
    pub months: i64,
    /// Pre-tax, pre-discount subtotal spread over `months`. Zero when disabled.
    pub per_month_amount: Decimal,
}

/// The rolled-up figures of one estimate.
///
/// `subtotal = subtotal_before_discount - prepay_discount` and
/// `total = subtotal + tax` hold exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub per_category: CategoryTotals,
    pub subtotal_before_discount: Decimal,
    pub prepay_discount: Decimal,
    /// What the prepay discount would be if it were applied.
    pub prepay_potential: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub monthly_plan: MonthlyPlan,
}
