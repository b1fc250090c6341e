//! Plain-text and delimited renderings of a priced estimate.

mod csv;
mod quote_text;

pub use self::csv::{LINE_ITEM_HEADERS, line_items_csv, write_line_items_csv};
pub use quote_text::{quote_email_subject, render_quote_text};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_money;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Who the quote is from and how its money is labeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub phone: String,
    /// ISO currency code. Only the label changes; amounts are never converted.
    pub currency: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "Landscaping Services".to_string(),
            phone: String::new(),
            currency: "USD".to_string(),
        }
    }
}

impl CompanyProfile {
    /// Formats an amount with this company's currency label.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use quote_core::export::CompanyProfile;
    ///
    /// let mut profile = CompanyProfile::default();
    /// assert_eq!(profile.money(dec!(1234.5)), "$1,234.50");
    ///
    /// profile.currency = "CAD".to_string();
    /// assert_eq!(profile.money(dec!(1234.5)), "CAD 1,234.50");
    /// ```
    pub fn money(
        &self,
        amount: Decimal,
    ) -> String {
        let code = self.currency.trim();
        if code.is_empty() || code.eq_ignore_ascii_case("USD") {
            format!("${}", format_money(amount))
        } else {
            format!("{} {}", code.to_ascii_uppercase(), format_money(amount))
        }
    }
}
