//! Report export - CSV artifact and plain-text rendering of the grouped
//! outstanding report.
//!
//! Both paths walk the same grouped structure and re-derive the per-row
//! balance, so an exported file can never disagree with the on-screen
//! numbers. Column schema: Sl No, Billing Date, Billing No, Total Amount,
//! Tax Value, Discount Value, Other Value, Received, Balance, with a heading
//! row per buyer and per vendor and a subtotal row per vendor group.

use std::fmt::Write as _;
use std::io;

use csv::WriterBuilder;

use crate::core::report::OutstandingReport;
use crate::errors::Result;

const COLUMNS: [&str; 9] = [
    "Sl No",
    "Billing Date",
    "Billing No",
    "Total Amount",
    "Tax Value",
    "Discount Value",
    "Other Value",
    "Received",
    "Balance",
];

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Writes the grouped report as CSV. Heading and subtotal rows are shorter
/// than data rows, so the writer runs in flexible mode.
pub fn write_csv<W: io::Write>(report: &OutstandingReport, writer: W) -> Result<()> {
    let mut csv = WriterBuilder::new().flexible(true).from_writer(writer);

    for buyer in &report.buyers {
        csv.write_record([format!("Buyer: {}", buyer.buyer)])?;
        for vendor in &buyer.vendors {
            csv.write_record([format!("Vendor: {}", vendor.vendor)])?;
            csv.write_record(COLUMNS)?;
            for (index, row) in vendor.rows.iter().enumerate() {
                csv.write_record([
                    (index + 1).to_string(),
                    row.display_date(),
                    row.billing_no.clone(),
                    money(row.billing_total_amount),
                    money(row.billing_tax),
                    money(row.billing_discount),
                    money(row.billing_other),
                    money(row.total_received_sum),
                    money(row.balance()),
                ])?;
            }
            csv.write_record(["Subtotal".to_string(), money(vendor.balance())])?;
        }
    }
    csv.write_record(["Grand Total".to_string(), money(report.balance())])?;

    csv.flush()?;
    Ok(())
}

/// The CSV artifact as a string, for callers that hand the bytes elsewhere.
pub fn to_csv_string(report: &OutstandingReport) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Renders the grouped report as a fixed-width text table, the printable
/// form of the report screen.
pub fn render_text(report: &OutstandingReport) -> String {
    if report.is_empty() {
        return "No outstanding records for the selected filters.\n".to_string();
    }

    let mut out = String::new();
    for buyer in &report.buyers {
        let _ = writeln!(out, "Buyer: {}", buyer.buyer);
        for vendor in &buyer.vendors {
            let _ = writeln!(out, "  Vendor: {}", vendor.vendor);
            let _ = writeln!(
                out,
                "  {:>5}  {:<12}  {:<14}  {:>12}  {:>10}  {:>10}  {:>10}  {:>12}  {:>12}",
                COLUMNS[0],
                COLUMNS[1],
                COLUMNS[2],
                COLUMNS[3],
                COLUMNS[4],
                COLUMNS[5],
                COLUMNS[6],
                COLUMNS[7],
                COLUMNS[8],
            );
            for (index, row) in vendor.rows.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {:>5}  {:<12}  {:<14}  {:>12}  {:>10}  {:>10}  {:>10}  {:>12}  {:>12}",
                    index + 1,
                    row.display_date(),
                    row.billing_no,
                    money(row.billing_total_amount),
                    money(row.billing_tax),
                    money(row.billing_discount),
                    money(row.billing_other),
                    money(row.total_received_sum),
                    money(row.balance()),
                );
            }
            let _ = writeln!(out, "  Subtotal: {}", money(vendor.balance()));
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "Grand Total: {}", money(report.balance()));
    out
}
