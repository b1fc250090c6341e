//! Hardscape line items.
//!
//! Only the paver surface rate comes from the rate table. Border, drainage,
//! steps and lighting are priced at fixed unit costs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::push_positive;
use crate::calculations::common::{product, quantity, total};
use crate::models::lenient::{count, qty};
use crate::models::{AccessDifficulty, HardscapeInputs, LineItem, PaverTier, RateTable, non_negative};

const BORDER_PER_FT: Decimal = dec!(6);
const DRAINAGE_PER_FT: Decimal = dec!(8);
const STEP_EACH: Decimal = dec!(120);
const LIGHT_FIXTURE_EACH: Decimal = dec!(85);

/// Builder for the Hardscape category.
#[derive(Debug, Clone)]
pub struct HardscapeBuilder<'a> {
    rates: &'a RateTable,
}

impl<'a> HardscapeBuilder<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    pub fn build(
        &self,
        input: &HardscapeInputs,
    ) -> Vec<LineItem> {
        let patio_sqft = qty(input.patio_sqft);
        let border_ft = qty(input.border_ft);
        let drainage_ft = qty(input.drainage_ft);
        let steps = count(input.steps_count);
        let lights = count(input.lighting_count);

        let tier = input.paver_tier;
        let paver_rate = self.paver_rate(tier);

        let patio = product(&[patio_sqft, paver_rate]);
        let border = product(&[border_ft, BORDER_PER_FT]);
        let drainage = product(&[drainage_ft, DRAINAGE_PER_FT]);
        let step_cost = product(&[Decimal::from(steps), STEP_EACH]);
        let lighting = product(&[Decimal::from(lights), LIGHT_FIXTURE_EACH]);

        let mut rows = Vec::new();
        push_positive(
            &mut rows,
            format!(
                "Paver surface ({} sqft @ ${}/sqft, {tier})",
                quantity(patio_sqft),
                quantity(paver_rate)
            ),
            patio,
        );
        push_positive(
            &mut rows,
            format!("Paver border ({} ft)", quantity(border_ft)),
            border,
        );
        push_positive(
            &mut rows,
            format!("Drainage ({} ft)", quantity(drainage_ft)),
            drainage,
        );
        push_positive(&mut rows, format!("Steps ({steps})"), step_cost);
        push_positive(&mut rows, format!("Lighting fixtures ({lights})"), lighting);

        let subtotal = total([patio, border, drainage, step_cost, lighting]);
        push_positive(
            &mut rows,
            "Access difficulty adjustment",
            self.access_adjustment(subtotal, input.access_difficulty),
        );

        rows
    }

    fn paver_rate(
        &self,
        tier: PaverTier,
    ) -> Decimal {
        non_negative(match tier {
            PaverTier::Economy => self.rates.paver_economy_per_sqft,
            PaverTier::Mid => self.rates.paver_mid_per_sqft,
            PaverTier::Premium => self.rates.paver_premium_per_sqft,
        })
    }

    /// Extra charged on top of the hardscape subtotal for difficult access.
    fn access_adjustment(
        &self,
        subtotal: Decimal,
        access: AccessDifficulty,
    ) -> Decimal {
        let multiplier = match access {
            AccessDifficulty::None => Decimal::ONE,
            AccessDifficulty::Moderate => dec!(1.1),
            AccessDifficulty::Steep => dec!(1.2),
        };
        product(&[subtotal, multiplier - Decimal::ONE])
    }
}
