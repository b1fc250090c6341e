use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::service_inputs::Category;
use crate::calculations::common::{round_half_up, total};

/// Rows whose amount does not exceed this are dropped from a group.
pub const NEGLIGIBLE_AMOUNT: Decimal = dec!(0.009);

/// One priced, labeled row of a category group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Decimal,
    /// Shown on the quote but not summed into the category total.
    #[serde(default)]
    pub informational: bool,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
            informational: false,
        }
    }

    /// A restatement row whose cost is already counted elsewhere.
    pub fn informational(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            informational: true,
            ..Self::new(label, amount)
        }
    }
}

/// The priced rows of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub title: String,
    pub rows: Vec<LineItem>,
    /// Sum of the counted rows.
    pub total: Decimal,
}

impl CategoryGroup {
    /// Builds a group from raw builder rows.
    ///
    /// Negligible rows are dropped and the rest are rounded to cents. Returns
    /// `None` when nothing is left.
    pub fn from_rows(
        category: Category,
        rows: Vec<LineItem>,
    ) -> Option<Self> {
        let rows: Vec<LineItem> = rows
            .into_iter()
            .filter(|row| row.amount.abs() > NEGLIGIBLE_AMOUNT)
            .map(|row| LineItem {
                amount: round_half_up(row.amount),
                ..row
            })
            .collect();

        if rows.is_empty() {
            return None;
        }

        let total = total(
            rows.iter()
                .filter(|row| !row.informational)
                .map(|row| row.amount),
        );

        Some(Self {
            category,
            title: category.title().to_string(),
            rows,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_rows_drops_negligible_rows() {
        let group = CategoryGroup::from_rows(
            Category::Landscape,
            vec![
                LineItem::new("Sod (100 sqft)", dec!(70.2)),
                LineItem::new("Mowing labor (0.00 hrs)", dec!(0.004)),
            ],
        )
        .unwrap();

        assert_eq!(group.rows.len(), 1);
        assert_eq!(group.title, "Mowing & Bed Refurbishing");
        assert_eq!(group.total, dec!(70.20));
    }

    #[test]
    fn from_rows_returns_none_when_all_rows_vanish() {
        let group = CategoryGroup::from_rows(
            Category::Hardscape,
            vec![LineItem::new("Steps (0)", Decimal::ZERO)],
        );

        assert_eq!(group, None);
    }

    #[test]
    fn from_rows_rounds_each_row_before_summing() {
        let group = CategoryGroup::from_rows(
            Category::Applications,
            vec![
                LineItem::new("a", dec!(0.005)),
                LineItem::new("b", dec!(0.005)),
                LineItem::new("c", dec!(141.075)),
            ],
        )
        .unwrap();

        let amounts: Vec<Decimal> = group.rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![dec!(0.01), dec!(0.01), dec!(141.08)]);
        assert_eq!(group.total, dec!(141.10));
    }

    #[test]
    fn informational_rows_are_kept_but_not_summed() {
        let group = CategoryGroup::from_rows(
            Category::Seasonal,
            vec![
                LineItem::new("Cleanup labor (3.8 hrs)", dec!(206.25)),
                LineItem::informational("Gutter cleaning", dec!(41.25)),
            ],
        )
        .unwrap();

        assert_eq!(group.rows.len(), 2);
        assert!(group.rows[1].informational);
        assert_eq!(group.total, dec!(206.25));
    }
}
