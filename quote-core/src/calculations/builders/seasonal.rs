//! Seasonal cleanup line items.
//!
//! "Cleanup labor" carries every cleanup hour, including bed cleanup and
//! gutter cleaning. Those two are also broken out as informational rows so
//! the customer can see what the hours cover; they are not summed again.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::push_positive;
use crate::calculations::common::{fixed, product, quantity, total};
use crate::models::lenient::{count, qty};
use crate::models::{LeafDepth, LineItem, RateTable, SeasonalInputs, non_negative};

const LEAF_BASE_HOURS: Decimal = dec!(3);
const BED_CLEANUP_HOURS: Decimal = dec!(0.25);
const GUTTER_HOURS: Decimal = dec!(0.75);

/// Builder for the Seasonal category.
#[derive(Debug, Clone)]
pub struct SeasonalBuilder<'a> {
    rates: &'a RateTable,
}

impl<'a> SeasonalBuilder<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    pub fn build(
        &self,
        input: &SeasonalInputs,
    ) -> Vec<LineItem> {
        let labor = non_negative(self.rates.labor_per_hour);
        let beds = count(input.clean_beds_count);
        let bed_hours = product(&[Decimal::from(beds), BED_CLEANUP_HOURS]);
        let gutter_hours = if input.gutter_clean {
            GUTTER_HOURS
        } else {
            Decimal::ZERO
        };
        let hours = total([
            product(&[self.leaf_multiplier(input.leaf_depth), LEAF_BASE_HOURS]),
            bed_hours,
            gutter_hours,
        ]);

        let mut rows = Vec::new();
        push_positive(
            &mut rows,
            format!("Cleanup labor ({} hrs)", fixed(hours, 1)),
            product(&[hours, labor]),
        );

        if beds > 0 {
            rows.push(LineItem::informational(
                format!("Bed cleanup ({beds} beds)"),
                product(&[bed_hours, labor]),
            ));
        }
        if input.gutter_clean {
            rows.push(LineItem::informational(
                "Gutter cleaning",
                product(&[gutter_hours, labor]),
            ));
        }

        if input.haul_away {
            let volume = qty(input.limb_volume_yd3);
            push_positive(
                &mut rows,
                format!("Haul away / disposal ({} yd³)", quantity(volume)),
                product(&[volume, non_negative(self.rates.green_waste_disposal_per_yd3)]),
            );
        }

        rows
    }

    fn leaf_multiplier(
        &self,
        depth: LeafDepth,
    ) -> Decimal {
        match depth {
            LeafDepth::None => Decimal::ZERO,
            LeafDepth::Light => Decimal::ONE,
            LeafDepth::Medium => dec!(1.5),
            LeafDepth::Heavy => dec!(2.2),
        }
    }
}
