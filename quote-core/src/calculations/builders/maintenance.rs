//! Recurring maintenance contract line items.
//!
//! Each sub-service is priced as `visits × hours per visit × labor rate`,
//! where visits are the frequency's visits per month times the contract
//! months. A flat trip charge is added for every base mowing visit.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::push_positive;
use crate::calculations::common::{fixed, money_label, product};
use crate::models::{Frequency, LineItem, MaintenanceInputs, MaintenanceTier, RateTable, non_negative};

const TRIM_HOURS_PER_VISIT: Decimal = dec!(0.2);
const BEDS_HOURS_PER_VISIT: Decimal = dec!(0.3);
const EDGE_HOURS_PER_VISIT: Decimal = dec!(0.1);
const TRIP_CHARGE_PER_VISIT: Decimal = dec!(10);

/// Builder for the Maintenance category.
#[derive(Debug, Clone)]
pub struct MaintenanceBuilder<'a> {
    rates: &'a RateTable,
}

impl<'a> MaintenanceBuilder<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Produces the contract's rows for `months` months. Zero or negative
    /// months mean no visits.
    pub fn build(
        &self,
        input: &MaintenanceInputs,
        months: i64,
    ) -> Vec<LineItem> {
        let labor = non_negative(self.rates.labor_per_hour);
        let base_hours = self.base_hours(input.tier);

        let base_visits = self.visits(input.base_frequency, true, months);
        let trim_visits = self.visits(input.trim_frequency, input.include_trim, months);
        let beds_visits = self.visits(input.beds_frequency, input.include_beds, months);
        let edge_visits = self.visits(input.edge_frequency, input.include_edge, months);

        let mut rows = Vec::new();
        push_positive(
            &mut rows,
            format!(
                "Mowing labor ({} hrs/visit × {base_visits} visits)",
                fixed(base_hours, 1)
            ),
            self.labor_cost(base_visits, base_hours, labor),
        );

        for (name, hours, visits) in [
            ("Shrub trimming", TRIM_HOURS_PER_VISIT, trim_visits),
            ("Bed touch-ups", BEDS_HOURS_PER_VISIT, beds_visits),
            ("Edging & Weed Whipping", EDGE_HOURS_PER_VISIT, edge_visits),
        ] {
            push_positive(
                &mut rows,
                format!("{name} ({} hrs/visit × {visits} visits)", fixed(hours, 1)),
                self.labor_cost(visits, hours, labor),
            );
        }

        push_positive(
            &mut rows,
            format!(
                "Trip/consumables ({} × {base_visits} base visits)",
                money_label(TRIP_CHARGE_PER_VISIT)
            ),
            product(&[Decimal::from(base_visits), TRIP_CHARGE_PER_VISIT]),
        );

        rows
    }

    /// Hours per base mowing visit for a property size tier.
    fn base_hours(
        &self,
        tier: MaintenanceTier,
    ) -> Decimal {
        match tier {
            MaintenanceTier::Small => dec!(0.6),
            MaintenanceTier::Medium => dec!(1.0),
            MaintenanceTier::Large => dec!(1.6),
            MaintenanceTier::ExtraLarge => dec!(2.4),
            MaintenanceTier::None => Decimal::ZERO,
        }
    }

    /// Visits over the contract for one sub-service.
    fn visits(
        &self,
        frequency: Frequency,
        included: bool,
        months: i64,
    ) -> i64 {
        if !included || months <= 0 {
            return 0;
        }
        frequency.visits_per_month().saturating_mul(months)
    }

    fn labor_cost(
        &self,
        visits: i64,
        hours_per_visit: Decimal,
        labor: Decimal,
    ) -> Decimal {
        product(&[Decimal::from(visits), hours_per_visit, labor])
    }
}
