//! Entity module - Plain data model for the back-office records.
//!
//! These structs mirror the panel API's JSON shapes. Editor state keeps
//! numeric fields string-encoded, exactly as the forms hold them; wire
//! structs (`*Payload`) use `Option` fields and merge into defaults with a
//! defined precedence (server value wins if present and non-null).

pub mod bill;
pub mod buyer;
pub mod counterparty;
pub mod invoice;
pub mod outstanding;
pub mod payment;

pub use bill::EligibleBill;
pub use buyer::{Buyer, BuyerPayload, BuyerUpdate, STATUS_OPTIONS};
pub use counterparty::{BuyerOption, Counterparty, VendorOption};
pub use invoice::{
    Invoice, InvoiceLine, InvoiceLinePayload, InvoiceLineUpdate, InvoicePayload, InvoiceUpdate,
};
pub use outstanding::OutstandingRow;
pub use payment::{Payment, PaymentLine, PaymentLinePayload, PaymentPayload, PaymentUpdate};

/// Normalizes a server-side scalar (id, amount, total) into the string form
/// the editors hold. The panel serves these both as JSON numbers and strings;
/// absent or null values become the empty string, which for ids is the
/// "not yet persisted" flag value.
pub(crate) fn scalar_string(value: Option<serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
