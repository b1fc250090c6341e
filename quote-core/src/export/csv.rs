//! Line-item download.
//!
//! One record per row, in builder order:
//!
//! ```csv
//! Category,Item,Amount,Counted
//! Hardscape,"Paver surface (500 sqft @ $18/sqft, mid)",9000.00,yes
//! ```
//!
//! `Counted` is `no` for informational rows that are not part of the
//! category total.

use std::io::Write;

use csv::WriterBuilder;

use super::ExportError;
use crate::calculations::common::fixed;
use crate::models::CategoryGroup;

pub const LINE_ITEM_HEADERS: [&str; 4] = ["Category", "Item", "Amount", "Counted"];

/// Writes the line items of `groups` as CSV to `writer`.
pub fn write_line_items_csv<W: Write>(
    groups: &[CategoryGroup],
    writer: W,
) -> Result<(), ExportError> {
    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(LINE_ITEM_HEADERS)?;

    for group in groups {
        for row in &group.rows {
            let counted = if row.informational { "no" } else { "yes" };
            out.write_record([
                group.title.as_str(),
                row.label.as_str(),
                fixed(row.amount, 2).as_str(),
                counted,
            ])?;
        }
    }

    out.flush()?;
    Ok(())
}

/// The line-item CSV as a string.
pub fn line_items_csv(groups: &[CategoryGroup]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_line_items_csv(groups, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
