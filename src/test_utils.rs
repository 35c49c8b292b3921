//! Shared test utilities for `billing-desk`.
//!
//! Provides an in-memory mock store implementing every store contract, with
//! a call log for asserting which network operations an editor performed,
//! plus sample editors with sensible defaults.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::api::{
    BillStore, BuyerStore, Confirm, InvoiceBundle, InvoiceStore, LookupStore, OutstandingQuery,
    PaymentBundle, PaymentStore, ReportStore,
};
use crate::core::payment::{PaymentEditor, PaymentLineField};
use crate::entities::{
    Buyer, BuyerUpdate, Counterparty, EligibleBill, Invoice, InvoiceLine, InvoiceLinePayload,
    InvoiceUpdate, OutstandingRow, Payment, PaymentLine, PaymentUpdate,
};
use crate::errors::{Error, Result};

/// Confirmation stub with a fixed answer.
pub struct StubConfirm(pub bool);

impl Confirm for StubConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// In-memory store over fixed sample records. Every call is appended to the
/// log as `"{operation}:{args}"`; mutations can be switched to fail with a
/// 500 to exercise error paths.
pub struct MockApi {
    payment: Payment,
    payment_lines: Vec<PaymentLine>,
    invoice: Invoice,
    invoice_lines: Vec<InvoiceLine>,
    buyer: Buyer,
    buyers: Vec<Counterparty>,
    vendors: Vec<Counterparty>,
    bills: Vec<EligibleBill>,
    outstanding: Vec<OutstandingRow>,
    calls: Mutex<Vec<String>>,
    last_payment_update: Mutex<Option<PaymentUpdate>>,
    last_invoice_update: Mutex<Option<InvoiceUpdate>>,
    last_buyer_update: Mutex<Option<BuyerUpdate>>,
    fail_bills: AtomicBool,
    fail_deletes: AtomicBool,
    fail_updates: AtomicBool,
}

fn server_error() -> Error {
    Error::Api {
        status: 500,
        message: "internal error".to_string(),
    }
}

impl MockApi {
    /// Sample records with no sub-lines: a payment and an invoice that both
    /// already carry counterparty ids, a complete buyer, two entries per
    /// lookup list, and a non-empty eligible-bill list.
    pub fn new() -> Self {
        MockApi {
            payment: Payment {
                id: "1".to_string(),
                pay_date: "2024-03-01".to_string(),
                pay_year: "2024-25".to_string(),
                payment_from_id: "2".to_string(),
                payment_to_id: "9".to_string(),
                pay_total: String::new(),
                pay_reference: String::new(),
            },
            payment_lines: Vec::new(),
            invoice: Invoice {
                id: "9".to_string(),
                invoice_date: "2024-03-05".to_string(),
                invoice_year: "2024-25".to_string(),
                invoice_no: "INV-77".to_string(),
                invoice_from_id: "2".to_string(),
                invoice_to_id: "9".to_string(),
                invoice_total: "150".to_string(),
            },
            invoice_lines: Vec::new(),
            buyer: Buyer {
                id: "12".to_string(),
                buyer_company: "Acme Textiles".to_string(),
                buyer_name: "R. Sharma".to_string(),
                buyer_mobile: "9876543210".to_string(),
                buyer_email: "accounts@acme.example".to_string(),
                buyer_address: "14 Mill Road".to_string(),
                buyer_status: "Active".to_string(),
            },
            buyers: vec![
                Counterparty {
                    id: "2".to_string(),
                    company: "Acme Textiles".to_string(),
                },
                Counterparty {
                    id: "5".to_string(),
                    company: "Zenith Traders".to_string(),
                },
            ],
            vendors: vec![
                Counterparty {
                    id: "9".to_string(),
                    company: "Mills North".to_string(),
                },
                Counterparty {
                    id: "7".to_string(),
                    company: "Mills South".to_string(),
                },
            ],
            bills: vec![
                EligibleBill {
                    billing_no: "B-102".to_string(),
                    billing_total_amount: 500.0,
                    total_sum: 120.0,
                },
                EligibleBill {
                    billing_no: "B-103".to_string(),
                    billing_total_amount: 300.0,
                    total_sum: 0.0,
                },
            ],
            outstanding: Vec::new(),
            calls: Mutex::new(Vec::new()),
            last_payment_update: Mutex::new(None),
            last_invoice_update: Mutex::new(None),
            last_buyer_update: Mutex::new(None),
            fail_bills: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Like [`new`](Self::new), with `count` persisted payment sub-lines
    /// (ids "10", "11", ...).
    pub fn with_payment_lines(count: usize) -> Self {
        let mut api = Self::new();
        api.payment_lines = (0..count)
            .map(|i| PaymentLine {
                id: (10 + i).to_string(),
                payment_bill_no: format!("B-10{i}"),
                payment_amount: "40".to_string(),
            })
            .collect();
        api
    }

    /// Like [`new`](Self::new), with `count` persisted invoice sub-lines
    /// (ids "20", "21", ...), each 100 gross with a 10 commission.
    pub fn with_invoice_lines(count: usize) -> Self {
        let mut api = Self::new();
        api.invoice_lines = (0..count)
            .map(|i| {
                InvoiceLinePayload {
                    id: Some(serde_json::json!((20 + i).to_string())),
                    invoice_sub_bill_no: Some(format!("120{i}")),
                    invoice_sub_total: Some(serde_json::json!("100")),
                    invoice_comm: Some(serde_json::json!("10")),
                }
                .merged()
            })
            .collect();
        api
    }

    pub fn with_outstanding(rows: Vec<OutstandingRow>) -> Self {
        let mut api = Self::new();
        api.outstanding = rows;
        api
    }

    fn log(&self, entry: impl Into<String>) {
        self.calls.lock().unwrap().push(entry.into());
    }

    /// Number of logged calls starting with `prefix`.
    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn set_fail_bills(&self, fail: bool) {
        self.fail_bills.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn last_payment_update(&self) -> Option<PaymentUpdate> {
        self.last_payment_update.lock().unwrap().clone()
    }

    pub fn last_invoice_update(&self) -> Option<InvoiceUpdate> {
        self.last_invoice_update.lock().unwrap().clone()
    }

    pub fn last_buyer_update(&self) -> Option<BuyerUpdate> {
        self.last_buyer_update.lock().unwrap().clone()
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BuyerStore for MockApi {
    async fn fetch_buyer(&self, id: &str) -> Result<Buyer> {
        self.log(format!("fetch_buyer:{id}"));
        Ok(self.buyer.clone())
    }

    async fn update_buyer(&self, id: &str, update: &BuyerUpdate) -> Result<()> {
        self.log(format!("update_buyer:{id}"));
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        *self.last_buyer_update.lock().unwrap() = Some(update.clone());
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for MockApi {
    async fn fetch_payment(&self, id: &str) -> Result<PaymentBundle> {
        self.log(format!("fetch_payment:{id}"));
        Ok(PaymentBundle {
            payment: self.payment.clone(),
            lines: self.payment_lines.clone(),
        })
    }

    async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> Result<()> {
        self.log(format!("update_payment:{id}"));
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        *self.last_payment_update.lock().unwrap() = Some(update.clone());
        Ok(())
    }

    async fn delete_payment_line(&self, line_id: &str) -> Result<()> {
        self.log(format!("delete_payment_line:{line_id}"));
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for MockApi {
    async fn fetch_invoice(&self, id: &str) -> Result<InvoiceBundle> {
        self.log(format!("fetch_invoice:{id}"));
        Ok(InvoiceBundle {
            invoice: self.invoice.clone(),
            lines: self.invoice_lines.clone(),
        })
    }

    async fn update_invoice(&self, id: &str, update: &InvoiceUpdate) -> Result<()> {
        self.log(format!("update_invoice:{id}"));
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        *self.last_invoice_update.lock().unwrap() = Some(update.clone());
        Ok(())
    }

    async fn delete_invoice_line(&self, line_id: &str) -> Result<()> {
        self.log(format!("delete_invoice_line:{line_id}"));
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(())
    }
}

#[async_trait]
impl LookupStore for MockApi {
    async fn list_buyers(&self) -> Result<Vec<Counterparty>> {
        self.log("list_buyers");
        Ok(self.buyers.clone())
    }

    async fn list_vendors(&self) -> Result<Vec<Counterparty>> {
        self.log("list_vendors");
        Ok(self.vendors.clone())
    }
}

#[async_trait]
impl BillStore for MockApi {
    async fn list_eligible_bills(&self, from_id: &str, to_id: &str) -> Result<Vec<EligibleBill>> {
        self.log(format!("list_eligible_bills:{from_id}/{to_id}"));
        if self.fail_bills.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self.bills.clone())
    }
}

#[async_trait]
impl ReportStore for MockApi {
    async fn fetch_outstanding(&self, _query: &OutstandingQuery) -> Result<Vec<OutstandingRow>> {
        self.log("fetch_outstanding");
        Ok(self.outstanding.clone())
    }
}

/// A payment editor loaded from the sample record and filled in so that only
/// the total is left to set: two unsaved lines of 40 and 60 against known
/// bill numbers.
pub async fn sample_payment_editor(api: &MockApi) -> Result<PaymentEditor> {
    let mut editor = PaymentEditor::new();
    editor.load(api, "1").await?;
    editor.set_line_field(0, PaymentLineField::BillNo, "B-102");
    editor.set_line_field(0, PaymentLineField::Amount, "40");
    editor.add_line();
    editor.set_line_field(1, PaymentLineField::BillNo, "B-103");
    editor.set_line_field(1, PaymentLineField::Amount, "60");
    Ok(editor)
}
