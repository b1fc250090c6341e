//! Lawn treatment line items: `area × per-sqft rate × applications per year`
//! for each enabled treatment.

use rust_decimal::Decimal;

use crate::calculations::common::{product, quantity};
use crate::models::lenient::qty;
use crate::models::{ApplicationInputs, LineItem, RateTable, Treatment, non_negative};

/// Builder for the Applications category.
#[derive(Debug, Clone)]
pub struct ApplicationsBuilder<'a> {
    rates: &'a RateTable,
}

impl<'a> ApplicationsBuilder<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Produces one row per priced treatment.
    ///
    /// `fallback_sqft` is used as the treated area when the input leaves it
    /// unset (normally the mowable area).
    pub fn build(
        &self,
        input: &ApplicationInputs,
        fallback_sqft: Option<Decimal>,
    ) -> Vec<LineItem> {
        let area = qty(input.application_sqft.or(fallback_sqft));
        if area <= Decimal::ZERO {
            return Vec::new();
        }

        self.treatments(input)
            .into_iter()
            .filter_map(|(name, treatment, rate)| self.row(name, treatment, rate, area))
            .collect()
    }

    fn treatments<'i>(
        &self,
        input: &'i ApplicationInputs,
    ) -> [(&'static str, &'i Treatment, Decimal); 6] {
        let r = self.rates;
        [
            ("Fertilization", &input.fertilization, r.fertilization_per_sqft),
            ("Weed control", &input.weed_control, r.weed_control_per_sqft),
            ("Pest control", &input.pest_control, r.pest_control_per_sqft),
            ("Disease control", &input.disease_control, r.disease_control_per_sqft),
            ("Aeration", &input.aeration, r.aeration_per_sqft),
            ("Overseeding", &input.overseeding, r.overseeding_per_sqft),
        ]
    }

    fn row(
        &self,
        name: &str,
        treatment: &Treatment,
        rate: Decimal,
        area: Decimal,
    ) -> Option<LineItem> {
        let count = treatment.count();
        let rate = non_negative(rate);
        if !treatment.enabled || count == 0 || rate.is_zero() {
            return None;
        }

        let plural = if count == 1 { "" } else { "s" };
        Some(LineItem::new(
            format!("{name} ({count} app{plural} × {} sqft)", quantity(area)),
            product(&[area, rate, Decimal::from(count)]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn fertilize_twice() -> ApplicationInputs {
        ApplicationInputs {
            application_sqft: Some(dec!(10000)),
            fertilization: Treatment::new(2),
            ..Default::default()
        }
    }

    #[test]
    fn fertilization_prices_area_rate_and_count() {
        let rates = RateTable::default();

        let rows = ApplicationsBuilder::new(&rates).build(&fertilize_twice(), None);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Fertilization (2 apps × 10000 sqft)");
        assert_eq!(rows[0].amount, dec!(240.00));
    }

    #[test]
    fn single_application_label_is_singular() {
        let rates = RateTable::default();
        let input = ApplicationInputs {
            application_sqft: Some(dec!(5000)),
            aeration: Treatment::new(1),
            ..Default::default()
        };

        let rows = ApplicationsBuilder::new(&rates).build(&input, None);

        assert_eq!(rows[0].label, "Aeration (1 app × 5000 sqft)");
        assert_eq!(rows[0].amount, dec!(80));
    }

    #[test]
    fn area_falls_back_to_mowable_area() {
        let rates = RateTable::default();
        let input = ApplicationInputs {
            application_sqft: None,
            ..fertilize_twice()
        };

        let rows = ApplicationsBuilder::new(&rates).build(&input, Some(dec!(6000)));

        assert_eq!(rows[0].label, "Fertilization (2 apps × 6000 sqft)");
        assert_eq!(rows[0].amount, dec!(144));
    }

    #[test]
    fn disabled_or_zero_count_treatments_are_skipped() {
        let rates = RateTable::default();
        let input = ApplicationInputs {
            application_sqft: Some(dec!(10000)),
            weed_control: Treatment {
                enabled: false,
                per_year: Some(3),
            },
            pest_control: Treatment::new(0),
            ..Default::default()
        };

        let rows = ApplicationsBuilder::new(&rates).build(&input, None);

        assert!(rows.is_empty());
    }

    #[test]
    fn zero_rate_skips_treatment() {
        let mut rates = RateTable::default();
        rates.fertilization_per_sqft = Decimal::ZERO;

        let rows = ApplicationsBuilder::new(&rates).build(&fertilize_twice(), None);

        assert!(rows.is_empty());
    }

    #[test]
    fn counts_above_four_are_clamped() {
        let rates = RateTable::default();
        let input = ApplicationInputs {
            application_sqft: Some(dec!(1000)),
            overseeding: Treatment::new(9),
            ..Default::default()
        };

        let rows = ApplicationsBuilder::new(&rates).build(&input, None);

        assert_eq!(rows[0].label, "Overseeding (4 apps × 1000 sqft)");
        assert_eq!(rows[0].amount, dec!(80));
    }

    #[test]
    fn treatments_are_additive_in_fixed_order() {
        let rates = RateTable::default();
        let input = ApplicationInputs {
            application_sqft: Some(dec!(10000)),
            overseeding: Treatment::new(1),
            fertilization: Treatment::new(4),
            disease_control: Treatment::new(2),
            ..Default::default()
        };

        let rows = ApplicationsBuilder::new(&rates).build(&input, None);

        let names: Vec<&str> = rows
            .iter()
            .map(|r| r.label.split(" (").next().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["Fertilization", "Disease control", "Overseeding"]);
        assert_eq!(rows.iter().map(|r| r.amount).sum::<Decimal>(), dec!(900));
    }

    #[test]
    fn no_area_means_no_rows() {
        let rates = RateTable::default();
        let input = ApplicationInputs {
            application_sqft: None,
            ..fertilize_twice()
        };

        let rows = ApplicationsBuilder::new(&rates).build(&input, None);

        assert!(rows.is_empty());
    }
}
