use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace, a leading `$` and thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    s.trim().trim_start_matches('$').replace(',', "")
}

/// Parses a command-line amount into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and a leading
/// dollar sign. Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an optional measurement for display, using "—" when `None`.
pub fn opt_decimal_display(d: &Option<Decimal>) -> String {
    d.as_ref()
        .map(|v| v.normalize().to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// A `mailto:` link with percent-encoded subject and body.
pub fn mailto_url(
    to: &str,
    subject: &str,
    body: &str,
) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        to.trim(),
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
