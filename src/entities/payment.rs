//! Payment entity - The payment record and its ordered sub-lines.
//!
//! A `PaymentLine` with an empty `id` exists only in memory; a non-empty `id`
//! means the line is persisted server-side. That flag value is the sole
//! discriminator for the deletion policy in the editor.

use serde::{Deserialize, Serialize};

/// Editable payment record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id: String,
    pub pay_date: String,
    pub pay_year: String,
    pub payment_from_id: String,
    pub payment_to_id: String,
    pub pay_total: String,
    pub pay_reference: String,
}

/// One editable payment sub-line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaymentLine {
    pub id: String,
    pub payment_bill_no: String,
    pub payment_amount: String,
}

impl PaymentLine {
    /// A fresh, unsaved row.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Whether this line exists server-side.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Update payload PUT back to the server on submit. Lines travel in full
/// (id, bill reference, amount); an empty line id tells the server to create
/// the sub-record.
#[derive(Clone, Debug, Serialize)]
pub struct PaymentUpdate {
    pub pay_date: String,
    pub pay_year: String,
    pub payment_from_id: String,
    pub payment_to_id: String,
    pub pay_total: String,
    pub pay_reference: String,
    pub payment_data: Vec<PaymentLine>,
}

/// Wire shape of a fetched payment record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaymentPayload {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub pay_date: Option<String>,
    #[serde(default)]
    pub pay_year: Option<String>,
    #[serde(default)]
    pub payment_from_id: Option<serde_json::Value>,
    #[serde(default)]
    pub payment_to_id: Option<serde_json::Value>,
    #[serde(default)]
    pub pay_total: Option<serde_json::Value>,
    #[serde(default)]
    pub pay_reference: Option<String>,
}

impl PaymentPayload {
    pub fn merged(self) -> Payment {
        Payment {
            id: super::scalar_string(self.id),
            pay_date: self.pay_date.unwrap_or_default(),
            pay_year: self.pay_year.unwrap_or_default(),
            payment_from_id: super::scalar_string(self.payment_from_id),
            payment_to_id: super::scalar_string(self.payment_to_id),
            pay_total: super::scalar_string(self.pay_total),
            pay_reference: self.pay_reference.unwrap_or_default(),
        }
    }
}

/// Wire shape of a fetched payment sub-line.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaymentLinePayload {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub payment_bill_no: Option<String>,
    #[serde(default)]
    pub payment_amount: Option<serde_json::Value>,
}

impl PaymentLinePayload {
    pub fn merged(self) -> PaymentLine {
        PaymentLine {
            id: super::scalar_string(self.id),
            payment_bill_no: self.payment_bill_no.unwrap_or_default(),
            payment_amount: super::scalar_string(self.payment_amount),
        }
    }
}
