//! Common utility functions for pricing calculations.
//!
//! This module provides shared functionality used across the line-item
//! builders and the aggregator, including rounding and label formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(141.075)), dec!(141.08));
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Multiplies non-negative factors, capping at [`Decimal::MAX`] instead of
/// overflowing. A zero factor always gives zero.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::product;
///
/// assert_eq!(product(&[dec!(2.75), dec!(38), dec!(1.35)]), dec!(141.0750));
/// assert_eq!(product(&[Decimal::MAX, dec!(18)]), Decimal::MAX);
/// assert_eq!(product(&[Decimal::MAX, dec!(18), Decimal::ZERO]), Decimal::ZERO);
/// ```
pub fn product(factors: &[Decimal]) -> Decimal {
    if factors.iter().any(Decimal::is_zero) {
        return Decimal::ZERO;
    }
    let mut acc = Decimal::ONE;
    for factor in factors {
        match acc.checked_mul(*factor) {
            Some(next) => acc = next,
            None => {
                tracing::warn!("amount out of range, capped");
                return Decimal::MAX;
            }
        }
    }
    acc
}

/// Divides `numerator` by `denominator`, giving zero for a zero denominator
/// and capping at [`Decimal::MAX`].
pub fn quotient(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        tracing::warn!("amount out of range, capped");
        Decimal::MAX
    })
}

/// Adds non-negative amounts, capping at [`Decimal::MAX`].
pub fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).unwrap_or(Decimal::MAX)
    })
}

/// Formats a value with exactly `dp` decimal places (half-up).
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::fixed;
///
/// assert_eq!(fixed(dec!(2.75), 2), "2.75");
/// assert_eq!(fixed(dec!(3.25), 1), "3.3");
/// assert_eq!(fixed(dec!(1), 1), "1.0");
/// ```
pub fn fixed(
    value: Decimal,
    dp: u32,
) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

/// Formats an entered quantity without trailing zeros.
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::quantity;
///
/// assert_eq!(quantity(dec!(10000)), "10000");
/// assert_eq!(quantity(dec!(12.50)), "12.5");
/// ```
pub fn quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Formats a money amount with thousands separators and two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::format_money;
///
/// assert_eq!(format_money(dec!(10800)), "10,800.00");
/// assert_eq!(format_money(dec!(141.075)), "141.08");
/// ```
pub fn format_money(value: Decimal) -> String {
    let digits = fixed(value, 2);
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{cents}")
}

/// Money with a `$` prefix, as written inside line-item labels.
pub fn money_label(value: Decimal) -> String {
    format!("${}", format_money(value))
}
