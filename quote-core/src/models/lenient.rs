//! Forgiving deserializers for form-sourced fields.
//!
//! Estimate inputs come straight from form widgets, so a field may hold a
//! number, a numeric string, an empty string, `null`, or something that is
//! not a number at all. Every one of those deserializes successfully here;
//! anything that cannot be read as a number becomes `None`, which the
//! builders treat as zero.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(Decimal),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn parse_text(text: &str) -> Option<Decimal> {
    let normalized = text.trim().replace(',', "");
    if normalized.is_empty() {
        return None;
    }
    match normalized.parse::<Decimal>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(input = %text, "non-numeric input treated as zero: {}", e);
            None
        }
    }
}

fn read<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawNumber::Number(value)) => Some(value),
        Some(RawNumber::Text(text)) => parse_text(&text),
        Some(RawNumber::Other(_)) | None => None,
    })
}

/// Deserializes an optional decimal, mapping anything non-numeric to `None`.
pub fn decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    read(deserializer)
}

/// Deserializes an optional whole number. Fractions are truncated.
pub fn whole<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(read(deserializer)?.and_then(|value| value.trunc().to_i64()))
}

/// Deserializes a boolean toggle. Accepts JSON booleans, `"true"`/`"on"`/`"1"`
/// strings and non-zero numbers; everything else is `false`.
pub fn toggle<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawToggle {
        Flag(bool),
        Number(Decimal),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let raw: Option<RawToggle> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawToggle::Flag(flag)) => flag,
        Some(RawToggle::Number(value)) => !value.is_zero(),
        Some(RawToggle::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "1"
        ),
        Some(RawToggle::Other(_)) | None => false,
    })
}

/// Deserializes a form choice. `null`, numbers and other non-string values
/// fall back to the choice's default entry.
pub fn choice<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawChoice {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let raw: Option<RawChoice> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawChoice::Text(text)) => T::from(text),
        Some(RawChoice::Other(_)) | None => T::default(),
    })
}

/// Reads an optional measurement as a quantity. Missing and negative
/// measurements count as zero.
pub fn qty(value: Option<Decimal>) -> Decimal {
    value
        .filter(|v| v.is_sign_positive())
        .unwrap_or(Decimal::ZERO)
}

/// Reads an optional count, treating missing and negative counts as zero.
pub fn count(value: Option<i64>) -> i64 {
    value.unwrap_or(0).max(0)
}
