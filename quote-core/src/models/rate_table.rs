//! The price book every builder reads from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("unknown rate: {0}")]
    UnknownRate(String),
}

/// Named pricing constants.
///
/// Stored tables may be partial; missing entries take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    pub labor_per_hour: Decimal,
    pub mulch_per_yd3: Decimal,
    pub rock_per_yd3: Decimal,
    pub topsoil_per_yd3: Decimal,
    pub sod_per_sqft: Decimal,
    pub paver_economy_per_sqft: Decimal,
    pub paver_mid_per_sqft: Decimal,
    pub paver_premium_per_sqft: Decimal,
    pub edging_steel_per_ft: Decimal,
    pub green_waste_disposal_per_yd3: Decimal,
    pub tax_rate: Decimal,
    pub material_margin: Decimal,
    /// Square feet mowed per labor hour.
    pub mow_productivity_sqft_per_hr: Decimal,
    pub fertilization_per_sqft: Decimal,
    pub weed_control_per_sqft: Decimal,
    pub pest_control_per_sqft: Decimal,
    pub disease_control_per_sqft: Decimal,
    pub aeration_per_sqft: Decimal,
    pub overseeding_per_sqft: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            labor_per_hour: dec!(55),
            mulch_per_yd3: dec!(38),
            rock_per_yd3: dec!(120),
            topsoil_per_yd3: dec!(32),
            sod_per_sqft: dec!(0.52),
            paver_economy_per_sqft: dec!(12),
            paver_mid_per_sqft: dec!(18),
            paver_premium_per_sqft: dec!(24),
            edging_steel_per_ft: dec!(2.4),
            green_waste_disposal_per_yd3: dec!(95),
            tax_rate: dec!(0),
            material_margin: dec!(0.35),
            mow_productivity_sqft_per_hr: dec!(12000),
            fertilization_per_sqft: dec!(0.012),
            weed_control_per_sqft: dec!(0.010),
            pest_control_per_sqft: dec!(0.009),
            disease_control_per_sqft: dec!(0.011),
            aeration_per_sqft: dec!(0.016),
            overseeding_per_sqft: dec!(0.020),
        }
    }
}

macro_rules! rate_names {
    ($($field:ident),+ $(,)?) => {
        impl RateTable {
            /// Every rate name, in display order.
            pub const NAMES: &'static [&'static str] = &[$(stringify!($field)),+];

            /// `(name, value)` pairs in display order.
            pub fn entries(&self) -> Vec<(&'static str, Decimal)> {
                vec![$((stringify!($field), self.$field)),+]
            }

            pub fn get(&self, name: &str) -> Option<Decimal> {
                match name {
                    $(stringify!($field) => Some(self.$field),)+
                    _ => None,
                }
            }

            /// Replaces a single rate by name.
            pub fn set(&mut self, name: &str, value: Decimal) -> Result<(), RateTableError> {
                match name {
                    $(stringify!($field) => self.$field = value,)+
                    _ => return Err(RateTableError::UnknownRate(name.to_string())),
                }
                Ok(())
            }
        }
    };
}

rate_names!(
    labor_per_hour,
    mulch_per_yd3,
    rock_per_yd3,
    topsoil_per_yd3,
    sod_per_sqft,
    paver_economy_per_sqft,
    paver_mid_per_sqft,
    paver_premium_per_sqft,
    edging_steel_per_ft,
    green_waste_disposal_per_yd3,
    tax_rate,
    material_margin,
    mow_productivity_sqft_per_hr,
    fertilization_per_sqft,
    weed_control_per_sqft,
    pest_control_per_sqft,
    disease_control_per_sqft,
    aeration_per_sqft,
    overseeding_per_sqft,
);

/// Reads a rate for pricing; negative values have no effect.
pub fn non_negative(rate: Decimal) -> Decimal {
    if rate.is_sign_negative() {
        Decimal::ZERO
    } else {
        rate
    }
}
