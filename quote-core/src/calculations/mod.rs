//! Pricing calculations for landscaping estimates.
//!
//! This module turns a [`ServiceInputs`] and a [`RateTable`] into priced
//! category groups and the estimate-wide totals. Everything here is a pure
//! function of its inputs.

pub mod aggregate;
pub mod builders;
pub mod common;

pub use aggregate::Aggregator;
pub use builders::{build_category_line_items, build_line_items};

use serde::{Deserialize, Serialize};

use crate::models::{AggregateTotals, CategoryGroup, CategoryTotals, RateTable, ServiceInputs};

/// A fully priced estimate: the line items of every selected category and
/// the totals they roll up to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedEstimate {
    pub groups: Vec<CategoryGroup>,
    pub totals: AggregateTotals,
}

/// Prices an estimate end to end.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::{HardscapeInputs, PaverTier, AccessDifficulty, RateTable, ServiceInputs, price_estimate};
///
/// let inputs = ServiceInputs {
///     hardscape: Some(HardscapeInputs {
///         patio_sqft: Some(dec!(500)),
///         paver_tier: PaverTier::Mid,
///         access_difficulty: AccessDifficulty::Steep,
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
///
/// let priced = price_estimate(&inputs, &RateTable::default());
///
/// assert_eq!(priced.totals.per_category.hardscape, dec!(10800));
/// assert_eq!(priced.totals.total, dec!(10800));
/// ```
pub fn price_estimate(
    inputs: &ServiceInputs,
    rates: &RateTable,
) -> PricedEstimate {
    let groups = build_line_items(inputs, rates);

    let mut per_category = CategoryTotals::default();
    for group in &groups {
        per_category.set(group.category, group.total);
    }

    let totals = Aggregator::new(rates).aggregate(per_category, &inputs.payment);

    tracing::debug!(
        groups = groups.len(),
        subtotal = %totals.subtotal,
        total = %totals.total,
        monthly = totals.monthly_plan.enabled,
        "priced estimate"
    );

    PricedEstimate { groups, totals }
}
