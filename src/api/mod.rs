//! Store contracts for the panel API collaborators.
//!
//! The editors and the report aggregator never talk HTTP directly; they are
//! written against these async traits so tests can drive them with in-memory
//! fakes. [`client::PanelClient`] is the production implementation. The
//! host-provided confirmation dialog is abstracted the same way, as the
//! [`Confirm`] capability injected into deletion flows.

pub mod client;

use async_trait::async_trait;

use crate::entities::{
    Buyer, BuyerUpdate, Counterparty, EligibleBill, Invoice, InvoiceLine, InvoiceUpdate,
    OutstandingRow, Payment, PaymentLine, PaymentUpdate,
};
use crate::errors::Result;

pub use client::PanelClient;

/// A fetched payment record together with its server-side sub-lines.
#[derive(Clone, Debug, Default)]
pub struct PaymentBundle {
    pub payment: Payment,
    pub lines: Vec<PaymentLine>,
}

/// A fetched invoice record together with its server-side sub-lines.
#[derive(Clone, Debug, Default)]
pub struct InvoiceBundle {
    pub invoice: Invoice,
    pub lines: Vec<InvoiceLine>,
}

/// Date range and party filters for the outstanding report.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct OutstandingQuery {
    pub from_date: String,
    pub to_date: String,
    pub billing_from_id: String,
    pub billing_to_id: String,
}

/// Buyer record persistence.
#[async_trait]
pub trait BuyerStore {
    async fn fetch_buyer(&self, id: &str) -> Result<Buyer>;
    async fn update_buyer(&self, id: &str, update: &BuyerUpdate) -> Result<()>;
}

/// Payment record persistence, including per-line deletes.
#[async_trait]
pub trait PaymentStore {
    async fn fetch_payment(&self, id: &str) -> Result<PaymentBundle>;
    async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> Result<()>;
    async fn delete_payment_line(&self, line_id: &str) -> Result<()>;
}

/// Invoice record persistence, including per-line deletes.
#[async_trait]
pub trait InvoiceStore {
    async fn fetch_invoice(&self, id: &str) -> Result<InvoiceBundle>;
    async fn update_invoice(&self, id: &str, update: &InvoiceUpdate) -> Result<()>;
    async fn delete_invoice_line(&self, line_id: &str) -> Result<()>;
}

/// Counterparty lookup lists for the two selectors.
#[async_trait]
pub trait LookupStore {
    async fn list_buyers(&self) -> Result<Vec<Counterparty>>;
    async fn list_vendors(&self) -> Result<Vec<Counterparty>>;
}

/// Bills still payable for a (buyer, vendor) pair.
#[async_trait]
pub trait BillStore {
    async fn list_eligible_bills(&self, from_id: &str, to_id: &str) -> Result<Vec<EligibleBill>>;
}

/// Flat outstanding-report rows for a session's filters.
#[async_trait]
pub trait ReportStore {
    async fn fetch_outstanding(&self, query: &OutstandingQuery) -> Result<Vec<OutstandingRow>>;
}

/// Everything the payment editor needs from the backend.
pub trait PaymentApi: PaymentStore + LookupStore + BillStore {}
impl<T: PaymentStore + LookupStore + BillStore> PaymentApi for T {}

/// Everything the invoice editor needs from the backend.
pub trait InvoiceApi: InvoiceStore + LookupStore {}
impl<T: InvoiceStore + LookupStore> InvoiceApi for T {}

/// Host-provided confirmation dialog, injected so deletion flows are
/// deterministic under test.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Confirmation that always proceeds, for headless callers.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}
