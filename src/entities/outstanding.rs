//! Outstanding-report row entity.
//!
//! One flat transaction record of the buyer outstanding report, tagged with
//! the two categorical keys the aggregator groups by. The per-row balance is
//! derived on demand and never stored; a negative balance is valid and shown
//! as-is.

use chrono::NaiveDate;
use serde::Deserialize;

/// A single outstanding-report record as served by the panel.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct OutstandingRow {
    #[serde(default)]
    pub buyer_company: String,
    #[serde(default)]
    pub vendor_company: String,
    #[serde(default)]
    pub billing_date: String,
    #[serde(default)]
    pub billing_no: String,
    #[serde(default)]
    pub billing_total_amount: f64,
    #[serde(default)]
    pub billing_tax: f64,
    #[serde(default)]
    pub billing_discount: f64,
    #[serde(default)]
    pub billing_other: f64,
    #[serde(default)]
    pub total_received_sum: f64,
}

impl OutstandingRow {
    /// `balance = total_amount - discount - total_received`. No sign
    /// invariant: overpaid bills show a negative balance.
    pub fn balance(&self) -> f64 {
        self.billing_total_amount - self.billing_discount - self.total_received_sum
    }

    /// Billing date reformatted for display (DD-MM-YYYY). Falls back to the
    /// raw value when the server string is not an ISO date.
    pub fn display_date(&self) -> String {
        NaiveDate::parse_from_str(&self.billing_date, "%Y-%m-%d")
            .map(|d| d.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|_| self.billing_date.clone())
    }
}
