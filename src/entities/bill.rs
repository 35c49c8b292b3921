//! Eligible bill entity - A billable unit a payment line may reference.

use serde::Deserialize;

/// Summary of a bill that is still payable for a (buyer, vendor) pair.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EligibleBill {
    #[serde(default)]
    pub billing_no: String,
    #[serde(default)]
    pub billing_total_amount: f64,
    /// Sum already received against this bill.
    #[serde(default)]
    pub total_sum: f64,
}

impl EligibleBill {
    /// Amount still open on this bill, shown next to the bill number in the
    /// picker.
    pub fn remaining_payable(&self) -> f64 {
        self.billing_total_amount - self.total_sum
    }
}
