//! Mowing & Bed Refurbishing line items.
//!
//! Rows, in order:
//!
//! | Row | Amount |
//! |-----|--------|
//! | Mowing labor | mowable sqft / productivity × labor rate |
//! | Mulch, Rock or Topsoil | bed yards × cover rate × (1 + margin) |
//! | Sod | sod sqft × sod rate × (1 + margin) |
//! | Edging & weed whipping | edging ft × steel edging rate × (1 + margin) |
//! | Install labor | (yards × 0.6 + sod × 0.015 + edging × 0.01) hrs × labor rate |
//! | Green waste disposal | yards × disposal rate × 0.5, only above one yard |
//!
//! Bed yards are `bed sqft × depth in / 12 / 27`, plus 10% waste when a
//! cover material is chosen.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::push_positive;
use crate::calculations::common::{fixed, product, quantity, quotient, total};
use crate::models::lenient::qty;
use crate::models::{BedCover, LandscapeInputs, LineItem, RateTable, non_negative};

const COVER_WASTE_FACTOR: Decimal = dec!(1.1);
const INSTALL_HOURS_PER_YD3: Decimal = dec!(0.6);
const INSTALL_HOURS_PER_SOD_SQFT: Decimal = dec!(0.015);
const INSTALL_HOURS_PER_EDGING_FT: Decimal = dec!(0.01);
const DISPOSAL_SHARE: Decimal = dec!(0.5);

/// Builder for the Mowing & Bed Refurbishing category.
#[derive(Debug, Clone)]
pub struct LandscapeBuilder<'a> {
    rates: &'a RateTable,
}

impl<'a> LandscapeBuilder<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Produces the category's rows. Zero-valued rows are left out.
    pub fn build(
        &self,
        input: &LandscapeInputs,
    ) -> Vec<LineItem> {
        let labor = non_negative(self.rates.labor_per_hour);
        let markup = total([Decimal::ONE, non_negative(self.rates.material_margin)]);

        let sod_sqft = qty(input.sod_sqft);
        let edging_ft = qty(input.edging_ft);
        let yards = self.bed_yards(input);

        let mut rows = Vec::new();

        let mowing_hours = self.mowing_hours(qty(input.mow_sqft));
        push_positive(
            &mut rows,
            format!("Mowing labor ({} hrs)", fixed(mowing_hours, 2)),
            product(&[mowing_hours, labor]),
        );

        if let Some((name, rate)) = self.cover_rate(input.bed_cover) {
            push_positive(
                &mut rows,
                format!("{name} ({} yd³ incl. waste)", fixed(yards, 2)),
                product(&[yards, rate, markup]),
            );
        }

        push_positive(
            &mut rows,
            format!("Sod ({} sqft)", quantity(sod_sqft)),
            product(&[sod_sqft, non_negative(self.rates.sod_per_sqft), markup]),
        );

        push_positive(
            &mut rows,
            format!("Edging & weed whipping ({} ft)", quantity(edging_ft)),
            product(&[edging_ft, non_negative(self.rates.edging_steel_per_ft), markup]),
        );

        let install_hours = self.install_hours(yards, sod_sqft, edging_ft);
        push_positive(
            &mut rows,
            format!("Install labor ({} hrs)", fixed(install_hours, 1)),
            product(&[install_hours, labor]),
        );

        push_positive(
            &mut rows,
            "Green waste disposal (est.)",
            self.disposal(yards),
        );

        rows
    }

    /// Cubic yards of bed material, including waste when a cover is chosen.
    fn bed_yards(
        &self,
        input: &LandscapeInputs,
    ) -> Decimal {
        let depth_ft = qty(input.bed_avg_depth_in) / dec!(12);
        let yards = product(&[qty(input.bed_sqft_total), depth_ft]) / dec!(27);

        if input.bed_cover == BedCover::None {
            yards
        } else {
            product(&[yards, COVER_WASTE_FACTOR])
        }
    }

    fn mowing_hours(
        &self,
        mow_sqft: Decimal,
    ) -> Decimal {
        let productivity = non_negative(self.rates.mow_productivity_sqft_per_hr);
        if mow_sqft > Decimal::ZERO && productivity > Decimal::ZERO {
            quotient(mow_sqft, productivity)
        } else {
            Decimal::ZERO
        }
    }

    fn cover_rate(
        &self,
        cover: BedCover,
    ) -> Option<(&'static str, Decimal)> {
        let (name, rate) = match cover {
            BedCover::Mulch => ("Mulch", self.rates.mulch_per_yd3),
            BedCover::Rock => ("Rock", self.rates.rock_per_yd3),
            BedCover::Topsoil => ("Topsoil", self.rates.topsoil_per_yd3),
            BedCover::None => return None,
        };
        Some((name, non_negative(rate)))
    }

    fn install_hours(
        &self,
        yards: Decimal,
        sod_sqft: Decimal,
        edging_ft: Decimal,
    ) -> Decimal {
        total([
            product(&[yards, INSTALL_HOURS_PER_YD3]),
            product(&[sod_sqft, INSTALL_HOURS_PER_SOD_SQFT]),
            product(&[edging_ft, INSTALL_HOURS_PER_EDGING_FT]),
        ])
    }

    fn disposal(
        &self,
        yards: Decimal,
    ) -> Decimal {
        if yards > Decimal::ONE {
            product(&[
                yards,
                non_negative(self.rates.green_waste_disposal_per_yd3),
                DISPOSAL_SHARE,
            ])
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::common::round_half_up;

    fn labels(rows: &[LineItem]) -> Vec<&str> {
        rows.iter().map(|r| r.label.as_str()).collect()
    }

    fn mulch_beds() -> LandscapeInputs {
        LandscapeInputs {
            bed_sqft_total: Some(dec!(270)),
            bed_avg_depth_in: Some(dec!(3)),
            bed_cover: BedCover::Mulch,
            ..Default::default()
        }
    }

    // =========================================================================
    // build tests
    // =========================================================================

    #[test]
    fn empty_inputs_produce_no_rows() {
        let rates = RateTable::default();

        let rows = LandscapeBuilder::new(&rates).build(&LandscapeInputs::default());

        assert!(rows.is_empty());
    }

    #[test]
    fn mulch_beds_price_material_install_and_disposal() {
        let rates = RateTable::default();

        let rows = LandscapeBuilder::new(&rates).build(&mulch_beds());

        assert_eq!(
            labels(&rows),
            vec![
                "Mulch (2.75 yd³ incl. waste)",
                "Install labor (1.7 hrs)",
                "Green waste disposal (est.)",
            ]
        );
        // 2.75 yd × $38 × 1.35
        assert_eq!(rows[0].amount, dec!(141.075));
        // 2.75 × 0.6 hrs × $55
        assert_eq!(rows[1].amount, dec!(90.75));
        // 2.75 yd × $95 × 0.5
        assert_eq!(rows[2].amount, dec!(130.625));
    }

    #[test]
    fn only_selected_cover_is_charged() {
        let rates = RateTable::default();
        let input = LandscapeInputs {
            bed_cover: BedCover::Rock,
            ..mulch_beds()
        };

        let rows = LandscapeBuilder::new(&rates).build(&input);

        assert_eq!(rows[0].label, "Rock (2.75 yd³ incl. waste)");
        assert_eq!(rows[0].amount, dec!(445.50));
        assert!(!labels(&rows).iter().any(|l| l.starts_with("Mulch")));
    }

    #[test]
    fn no_cover_still_counts_install_labor_without_waste() {
        let rates = RateTable::default();
        let input = LandscapeInputs {
            bed_cover: BedCover::None,
            ..mulch_beds()
        };

        let rows = LandscapeBuilder::new(&rates).build(&input);

        // 2.5 yd, no material row, disposal still applies above one yard.
        assert_eq!(
            labels(&rows),
            vec!["Install labor (1.5 hrs)", "Green waste disposal (est.)"]
        );
        assert_eq!(rows[0].amount, dec!(82.5));
    }

    #[test]
    fn mowing_labor_uses_productivity() {
        let rates = RateTable::default();
        let input = LandscapeInputs {
            mow_sqft: Some(dec!(8000)),
            ..Default::default()
        };

        let rows = LandscapeBuilder::new(&rates).build(&input);

        assert_eq!(labels(&rows), vec!["Mowing labor (0.67 hrs)"]);
        assert_eq!(round_half_up(rows[0].amount), dec!(36.67));
    }

    #[test]
    fn zero_productivity_disables_mowing_labor() {
        let mut rates = RateTable::default();
        rates.mow_productivity_sqft_per_hr = Decimal::ZERO;
        let input = LandscapeInputs {
            mow_sqft: Some(dec!(8000)),
            ..Default::default()
        };

        let rows = LandscapeBuilder::new(&rates).build(&input);

        assert!(rows.is_empty());
    }

    #[test]
    fn sod_and_edging_carry_margin() {
        let rates = RateTable::default();
        let input = LandscapeInputs {
            sod_sqft: Some(dec!(100)),
            edging_ft: Some(dec!(50)),
            ..Default::default()
        };

        let rows = LandscapeBuilder::new(&rates).build(&input);

        assert_eq!(
            labels(&rows),
            vec![
                "Sod (100 sqft)",
                "Edging & weed whipping (50 ft)",
                "Install labor (2.0 hrs)",
            ]
        );
        assert_eq!(rows[0].amount, dec!(70.20));
        assert_eq!(rows[1].amount, dec!(162.00));
        assert_eq!(rows[2].amount, dec!(110.00));
    }

    #[test]
    fn small_beds_skip_disposal() {
        let rates = RateTable::default();
        let input = LandscapeInputs {
            bed_sqft_total: Some(dec!(90)),
            ..mulch_beds()
        };

        let rows = LandscapeBuilder::new(&rates).build(&input);

        // 90 × 0.25 / 27 × 1.1 = 0.9167 yd
        assert!(!labels(&rows).contains(&"Green waste disposal (est.)"));
    }

    #[test]
    fn negative_measurements_count_as_zero() {
        let rates = RateTable::default();
        let input = LandscapeInputs {
            sod_sqft: Some(dec!(-100)),
            ..Default::default()
        };

        let rows = LandscapeBuilder::new(&rates).build(&input);

        assert!(rows.is_empty());
    }

    // =========================================================================
    // helper tests
    // =========================================================================

    #[test]
    fn bed_yards_adds_waste_for_cover() {
        let rates = RateTable::default();
        let builder = LandscapeBuilder::new(&rates);

        assert_eq!(builder.bed_yards(&mulch_beds()), dec!(2.75));
    }

    #[test]
    fn install_hours_sum_components() {
        let rates = RateTable::default();
        let builder = LandscapeBuilder::new(&rates);

        let hours = builder.install_hours(dec!(2), dec!(100), dec!(50));

        assert_eq!(hours, dec!(3.2));
    }
}
