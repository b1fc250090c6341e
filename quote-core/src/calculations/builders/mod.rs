//! Line-item builders, one per service category.
//!
//! Builders return raw rows; [`build_category_line_items`] turns them into a
//! [`CategoryGroup`], dropping negligible rows and rounding to cents.

pub mod applications;
pub mod hardscape;
pub mod landscape;
pub mod maintenance;
pub mod seasonal;

pub use applications::ApplicationsBuilder;
pub use hardscape::HardscapeBuilder;
pub use landscape::LandscapeBuilder;
pub use maintenance::MaintenanceBuilder;
pub use seasonal::SeasonalBuilder;

use rust_decimal::Decimal;

use crate::models::{Category, CategoryGroup, CategoryInputs, LineItem, RateTable, ServiceInputs};

/// Prices one category. `None` when the category is not selected or has
/// nothing to charge.
pub fn build_category_line_items(
    category: Category,
    inputs: &ServiceInputs,
    rates: &RateTable,
) -> Option<CategoryGroup> {
    let rows = match inputs.category(category)? {
        CategoryInputs::Landscape(input) => LandscapeBuilder::new(rates).build(input),
        CategoryInputs::Applications(input) => {
            ApplicationsBuilder::new(rates).build(input, inputs.mow_sqft())
        }
        CategoryInputs::Hardscape(input) => HardscapeBuilder::new(rates).build(input),
        CategoryInputs::Maintenance(input) => {
            MaintenanceBuilder::new(rates).build(input, inputs.payment.contract_months())
        }
        CategoryInputs::Seasonal(input) => SeasonalBuilder::new(rates).build(input),
    };

    CategoryGroup::from_rows(category, rows)
}

/// Prices every selected category, in quote order.
pub fn build_line_items(
    inputs: &ServiceInputs,
    rates: &RateTable,
) -> Vec<CategoryGroup> {
    Category::ALL
        .into_iter()
        .filter_map(|category| build_category_line_items(category, inputs, rates))
        .collect()
}

/// Appends a row when its amount is positive.
pub(crate) fn push_positive(
    rows: &mut Vec<LineItem>,
    label: impl Into<String>,
    amount: Decimal,
) {
    if amount > Decimal::ZERO {
        rows.push(LineItem::new(label, amount));
    }
}
