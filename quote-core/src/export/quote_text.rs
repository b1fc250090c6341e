use rust_decimal::Decimal;

use super::CompanyProfile;
use crate::models::{AggregateTotals, EstimateDraft};

const MISSING: &str = "—";

fn or_missing(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { MISSING } else { value }
}

/// Renders the customer-facing quote used for clipboard copy and email.
///
/// Category lines appear for every selected category, in quote order, even
/// when the category prices to zero.
pub fn render_quote_text(
    draft: &EstimateDraft,
    totals: &AggregateTotals,
    profile: &CompanyProfile,
) -> String {
    let money = |amount| profile.money(amount);
    let mut lines: Vec<String> = Vec::new();

    let company = profile.name.trim();
    let phone = profile.phone.trim();
    if phone.is_empty() {
        lines.push(format!("{company} — Estimate"));
    } else {
        lines.push(format!("{company} ({phone}) — Estimate"));
    }
    lines.push(format!(
        "Estimate #: {}",
        or_missing(draft.estimate_number.as_deref().unwrap_or_default())
    ));
    lines.push(String::new());

    let date = draft
        .created_at
        .map(|at| at.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| MISSING.to_string());
    lines.push(format!("Date: {date}"));
    lines.push(format!("Customer: {}", or_missing(&draft.customer.name)));
    lines.push(format!("Phone: {}", or_missing(&draft.customer.phone)));
    lines.push(format!("Email: {}", or_missing(&draft.customer.email)));
    lines.push(format!("Address: {}", or_missing(&draft.customer.address)));
    lines.push(String::new());

    for category in draft.services.enabled_categories() {
        lines.push(format!(
            "{}: {}",
            category.title(),
            money(totals.per_category.get(category))
        ));
    }
    lines.push(String::new());

    lines.push(format!(
        "Subtotal (before discount): {}",
        money(totals.subtotal_before_discount)
    ));
    if totals.prepay_discount > Decimal::ZERO {
        lines.push(format!("Prepay discount: -{}", money(totals.prepay_discount)));
    }
    lines.push(format!("Subtotal: {}", money(totals.subtotal)));
    lines.push(format!("Tax: {}", money(totals.tax)));
    lines.push(format!("Total: {}", money(totals.total)));

    let plan = &totals.monthly_plan;
    if plan.enabled {
        lines.push(format!(
            "Monthly payments selected (estimate-wide): {} months @ {} each (pre-tax).",
            plan.months,
            money(plan.per_month_amount)
        ));
        if totals.prepay_potential > Decimal::ZERO {
            lines.push(format!(
                "Prepay savings (if paid upfront): {}.",
                money(totals.prepay_potential)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Notes: {}", or_missing(&draft.notes)));
    lines.push(String::new());
    lines.push("Thank you for the opportunity!".to_string());

    lines.join("\n")
}

/// Email subject line for a quote.
pub fn quote_email_subject(draft: &EstimateDraft) -> String {
    let name = match draft.customer.name.trim() {
        "" => "Customer",
        name => name,
    };
    match draft.estimate_number.as_deref().map(str::trim) {
        Some(number) if !number.is_empty() => format!("Estimate {number} — {name}"),
        _ => format!("Estimate — {name}"),
    }
}
