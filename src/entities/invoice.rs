//! Invoice entity - The invoice record and its ordered sub-lines.
//!
//! Unlike the payment flow, the invoice total is derived: the editor
//! recomputes it as the sum of the sub-line totals, and each line carries a
//! derived `invoice_price = sub_total - commission` held as a fixed
//! two-decimal string. Derived fields are display-only and are never sent
//! back to the server.

use serde::{Deserialize, Serialize};

/// Editable invoice record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_date: String,
    pub invoice_year: String,
    pub invoice_no: String,
    pub invoice_from_id: String,
    pub invoice_to_id: String,
    pub invoice_total: String,
}

/// One editable invoice sub-line. `invoice_price` is the derived net.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    pub id: String,
    pub invoice_sub_bill_no: String,
    pub invoice_sub_total: String,
    pub invoice_comm: String,
    pub invoice_price: String,
}

impl InvoiceLine {
    /// A fresh, unsaved row.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Whether this line exists server-side.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Update payload PUT back to the server on submit. Lines are trimmed to the
/// server-relevant fields; the derived net and the sub-total are never sent.
#[derive(Clone, Debug, Serialize)]
pub struct InvoiceUpdate {
    pub invoice_date: String,
    pub invoice_year: String,
    pub invoice_no: String,
    pub invoice_from_id: String,
    pub invoice_to_id: String,
    pub invoice_total: String,
    pub invoice_data: Vec<InvoiceLineUpdate>,
}

/// The trimmed line shape inside [`InvoiceUpdate`].
#[derive(Clone, Debug, Serialize)]
pub struct InvoiceLineUpdate {
    pub id: String,
    pub invoice_sub_bill_no: String,
    pub invoice_comm: String,
}

impl From<&InvoiceLine> for InvoiceLineUpdate {
    fn from(line: &InvoiceLine) -> Self {
        InvoiceLineUpdate {
            id: line.id.clone(),
            invoice_sub_bill_no: line.invoice_sub_bill_no.clone(),
            invoice_comm: line.invoice_comm.clone(),
        }
    }
}

/// Wire shape of a fetched invoice record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InvoicePayload {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub invoice_date: Option<String>,
    #[serde(default)]
    pub invoice_year: Option<String>,
    #[serde(default)]
    pub invoice_no: Option<String>,
    #[serde(default)]
    pub invoice_from_id: Option<serde_json::Value>,
    #[serde(default)]
    pub invoice_to_id: Option<serde_json::Value>,
    #[serde(default)]
    pub invoice_total: Option<serde_json::Value>,
}

impl InvoicePayload {
    pub fn merged(self) -> Invoice {
        Invoice {
            id: super::scalar_string(self.id),
            invoice_date: self.invoice_date.unwrap_or_default(),
            invoice_year: self.invoice_year.unwrap_or_default(),
            invoice_no: self.invoice_no.unwrap_or_default(),
            invoice_from_id: super::scalar_string(self.invoice_from_id),
            invoice_to_id: super::scalar_string(self.invoice_to_id),
            invoice_total: super::scalar_string(self.invoice_total),
        }
    }
}

/// Wire shape of a fetched invoice sub-line.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InvoiceLinePayload {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub invoice_sub_bill_no: Option<String>,
    #[serde(default)]
    pub invoice_sub_total: Option<serde_json::Value>,
    #[serde(default)]
    pub invoice_comm: Option<serde_json::Value>,
}

impl InvoiceLinePayload {
    /// Merge into editor shape with the derived net precomputed.
    pub fn merged(self) -> InvoiceLine {
        let mut line = InvoiceLine {
            id: super::scalar_string(self.id),
            invoice_sub_bill_no: self.invoice_sub_bill_no.unwrap_or_default(),
            invoice_sub_total: super::scalar_string(self.invoice_sub_total),
            invoice_comm: super::scalar_string(self.invoice_comm),
            invoice_price: String::new(),
        };
        line.invoice_price = crate::core::validate::net_of(&line.invoice_sub_total, &line.invoice_comm);
        line
    }
}
