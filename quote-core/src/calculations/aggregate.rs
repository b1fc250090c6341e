//! Rolls category totals into the estimate's subtotal, discount, tax, total
//! and monthly payment plan.
//!
//! | Figure | Rule |
//! |--------|------|
//! | Subtotal before discount | sum of category totals |
//! | Prepay potential | subtotal before discount × percent / 100 |
//! | Prepay discount | prepay potential, or zero when paying monthly |
//! | Subtotal | subtotal before discount - prepay discount |
//! | Tax | subtotal × tax rate |
//! | Total | subtotal + tax |
//! | Per month | subtotal before discount / months, when paying monthly |
//!
//! Every figure is rounded to cents as it is produced, so the identities in
//! the table hold exactly.
//! Figures too large for a `Decimal` are capped at `Decimal::MAX`, where
//! the identities no longer apply.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{max, product, quotient, round_half_up, total};
use crate::models::{AggregateTotals, CategoryTotals, MonthlyPlan, PaymentControls, RateTable, non_negative};

const ONE_HUNDRED: Decimal = dec!(100);

/// Calculator for the estimate-wide totals.
#[derive(Debug, Clone)]
pub struct Aggregator<'a> {
    rates: &'a RateTable,
}

impl<'a> Aggregator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    pub fn aggregate(
        &self,
        per_category: CategoryTotals,
        controls: &PaymentControls,
    ) -> AggregateTotals {
        let subtotal_before_discount = round_half_up(per_category.sum());

        let prepay_potential =
            self.prepay_potential(subtotal_before_discount, controls.prepay_discount_percent);
        let prepay_discount = if controls.monthly_payments {
            Decimal::ZERO
        } else {
            prepay_potential
        };

        let subtotal = subtotal_before_discount - prepay_discount;
        let tax = round_half_up(product(&[subtotal, non_negative(self.rates.tax_rate)]));
        let total = total([subtotal, tax]);

        let monthly_plan = self.monthly_plan(
            subtotal_before_discount,
            controls.monthly_payments,
            controls.contract_months(),
        );

        AggregateTotals {
            per_category,
            subtotal_before_discount,
            prepay_discount,
            prepay_potential,
            subtotal,
            tax,
            total,
            monthly_plan,
        }
    }

    /// Discount the customer would get for paying up front. The percent is
    /// clamped to `0..=100`.
    fn prepay_potential(
        &self,
        subtotal_before_discount: Decimal,
        percent: Option<Decimal>,
    ) -> Decimal {
        let percent = max(percent.unwrap_or_default(), Decimal::ZERO).min(ONE_HUNDRED);
        if percent.is_zero() {
            return Decimal::ZERO;
        }
        round_half_up(product(&[subtotal_before_discount, percent / ONE_HUNDRED]))
    }

    fn monthly_plan(
        &self,
        subtotal_before_discount: Decimal,
        requested: bool,
        months: i64,
    ) -> MonthlyPlan {
        let enabled = requested && months > 0;
        let per_month_amount = if enabled {
            round_half_up(quotient(subtotal_before_discount, Decimal::from(months)))
        } else {
            Decimal::ZERO
        };

        MonthlyPlan {
            enabled,
            months,
            per_month_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn totals(amount: Decimal) -> CategoryTotals {
        CategoryTotals {
            hardscape: amount,
            ..Default::default()
        }
    }

    fn taxed_rates() -> RateTable {
        RateTable {
            tax_rate: dec!(0.0825),
            ..Default::default()
        }
    }

    // =========================================================================
    // aggregate tests
    // =========================================================================

    #[test]
    fn nothing_selected_totals_zero() {
        let rates = RateTable::default();

        let result = Aggregator::new(&rates).aggregate(CategoryTotals::default(), &PaymentControls::default());

        assert_eq!(result.subtotal_before_discount, Decimal::ZERO);
        assert_eq!(result.total, Decimal::ZERO);
        assert!(!result.monthly_plan.enabled);
    }

    #[test]
    fn prepay_discount_applies_when_paying_up_front() {
        let rates = taxed_rates();
        let controls = PaymentControls {
            prepay_discount_percent: Some(dec!(5)),
            ..Default::default()
        };

        let result = Aggregator::new(&rates).aggregate(totals(dec!(2000)), &controls);

        assert_eq!(result.prepay_potential, dec!(100.00));
        assert_eq!(result.prepay_discount, dec!(100.00));
        assert_eq!(result.subtotal, dec!(1900.00));
        assert_eq!(result.tax, dec!(156.75));
        assert_eq!(result.total, dec!(2056.75));
    }

    #[test]
    fn monthly_payments_suppress_discount_but_keep_potential() {
        let rates = taxed_rates();
        let controls = PaymentControls {
            monthly_payments: true,
            months: Some(8),
            prepay_discount_percent: Some(dec!(5)),
        };

        let result = Aggregator::new(&rates).aggregate(totals(dec!(2000)), &controls);

        assert_eq!(result.prepay_discount, Decimal::ZERO);
        assert_eq!(result.prepay_potential, dec!(100.00));
        assert_eq!(result.subtotal, dec!(2000));
        assert_eq!(
            result.monthly_plan,
            MonthlyPlan {
                enabled: true,
                months: 8,
                per_month_amount: dec!(250.00),
            }
        );
    }

    #[test]
    fn monthly_plan_defaults_to_eight_months() {
        let rates = RateTable::default();
        let controls = PaymentControls {
            monthly_payments: true,
            ..Default::default()
        };

        let result = Aggregator::new(&rates).aggregate(totals(dec!(1000)), &controls);

        assert_eq!(result.monthly_plan.months, 8);
        assert_eq!(result.monthly_plan.per_month_amount, dec!(125.00));
    }

    #[test]
    fn zero_months_disable_the_plan() {
        let rates = RateTable::default();
        let controls = PaymentControls {
            monthly_payments: true,
            months: Some(0),
            prepay_discount_percent: Some(dec!(10)),
        };

        let result = Aggregator::new(&rates).aggregate(totals(dec!(1000)), &controls);

        assert!(!result.monthly_plan.enabled);
        assert_eq!(result.monthly_plan.per_month_amount, Decimal::ZERO);
        // Monthly was still requested, so no discount either.
        assert_eq!(result.prepay_discount, Decimal::ZERO);
    }

    #[test]
    fn identities_hold_after_rounding() {
        let rates = taxed_rates();
        let controls = PaymentControls {
            prepay_discount_percent: Some(dec!(7.5)),
            ..Default::default()
        };
        let per_category = CategoryTotals {
            landscape: dec!(361.45),
            applications: dec!(240.00),
            seasonal: dec!(206.25),
            ..Default::default()
        };

        let result = Aggregator::new(&rates).aggregate(per_category, &controls);

        assert_eq!(result.subtotal_before_discount, dec!(807.70));
        assert_eq!(
            result.subtotal,
            result.subtotal_before_discount - result.prepay_discount
        );
        assert_eq!(result.total, result.subtotal + result.tax);
    }

    // =========================================================================
    // helper tests
    // =========================================================================

    #[test]
    fn prepay_percent_is_clamped() {
        let rates = RateTable::default();
        let aggregator = Aggregator::new(&rates);

        assert_eq!(aggregator.prepay_potential(dec!(500), Some(dec!(150))), dec!(500));
        assert_eq!(aggregator.prepay_potential(dec!(500), Some(dec!(-5))), Decimal::ZERO);
        assert_eq!(aggregator.prepay_potential(dec!(500), None), Decimal::ZERO);
    }

    #[test]
    fn per_month_amount_rounds_to_cents() {
        let rates = RateTable::default();
        let aggregator = Aggregator::new(&rates);

        let plan = aggregator.monthly_plan(dec!(1000), true, 3);

        assert_eq!(plan.per_month_amount, dec!(333.33));
    }
}
