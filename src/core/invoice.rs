//! Invoice editor - business logic behind the invoice edit screen.
//!
//! Same surface as the payment editor, with two differences in the numbers:
//! the numeric filter is decimal-aware, and the totals are derived rather
//! than checked. Every line change recomputes the row's net
//! (`sub_total - commission`, two decimals) and the record total (sum of the
//! row sub-totals), so the record is consistent by construction and submit
//! carries no sum check.

use tracing::info;

use crate::api::{Confirm, InvoiceApi};
use crate::core::RemoveOutcome;
use crate::core::validate::{self, NumericKind};
use crate::entities::{
    Counterparty, Invoice, InvoiceLine, InvoiceLineUpdate, InvoiceUpdate,
};
use crate::errors::{Error, Result};

/// Editable fields of the invoice record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvoiceField {
    Date,
    Year,
    No,
    FromId,
    ToId,
    Total,
}

/// Editable fields of an invoice sub-line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvoiceLineField {
    BillNo,
    SubTotal,
    Comm,
}

/// In-memory state of one invoice edit screen.
#[derive(Debug, Default)]
pub struct InvoiceEditor {
    pub invoice: Invoice,
    pub lines: Vec<InvoiceLine>,
    pub buyers: Vec<Counterparty>,
    pub vendors: Vec<Counterparty>,
}

impl InvoiceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the record and both lookup lists. Server-provided sub-lines
    /// seed the collection with their derived net precomputed; without any,
    /// the editor starts with a single blank row.
    pub async fn load<A: InvoiceApi>(&mut self, api: &A, id: &str) -> Result<()> {
        let bundle = api.fetch_invoice(id).await?;
        self.buyers = api.list_buyers().await?;
        self.vendors = api.list_vendors().await?;

        self.invoice = bundle.invoice;
        self.lines = if bundle.lines.is_empty() {
            vec![InvoiceLine::blank()]
        } else {
            bundle.lines
        };
        Ok(())
    }

    /// Applies one record field change. The total is decimal-filtered;
    /// changing either counterparty id resets the lines to one blank row
    /// (the eligible bill set depends on the pair) and recomputes the
    /// derived total accordingly.
    pub fn set_field(&mut self, field: InvoiceField, value: &str) {
        match field {
            InvoiceField::Date => self.invoice.invoice_date = value.to_string(),
            InvoiceField::Year => self.invoice.invoice_year = value.to_string(),
            InvoiceField::No => self.invoice.invoice_no = value.to_string(),
            InvoiceField::Total => {
                self.invoice.invoice_total =
                    validate::filtered(NumericKind::Decimal, &self.invoice.invoice_total, value);
            }
            InvoiceField::FromId | InvoiceField::ToId => {
                if field == InvoiceField::FromId {
                    self.invoice.invoice_from_id = value.to_string();
                } else {
                    self.invoice.invoice_to_id = value.to_string();
                }
                if !self.invoice.invoice_from_id.is_empty()
                    && !self.invoice.invoice_to_id.is_empty()
                {
                    self.lines = vec![InvoiceLine::blank()];
                    self.recompute_total();
                }
            }
        }
    }

    /// Appends a blank line. No upper bound.
    pub fn add_line(&mut self) {
        self.lines.push(InvoiceLine::blank());
    }

    /// Applies one line field change. All three fields are decimal-filtered;
    /// a sub-total or commission change recomputes the row's net, and every
    /// accepted change recomputes the record total from the row sub-totals.
    /// Out-of-range indices are ignored.
    pub fn set_line_field(&mut self, index: usize, field: InvoiceLineField, value: &str) {
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };
        match field {
            InvoiceLineField::BillNo => {
                line.invoice_sub_bill_no =
                    validate::filtered(NumericKind::Decimal, &line.invoice_sub_bill_no, value);
            }
            InvoiceLineField::SubTotal => {
                line.invoice_sub_total =
                    validate::filtered(NumericKind::Decimal, &line.invoice_sub_total, value);
                line.invoice_price = validate::net_of(&line.invoice_sub_total, &line.invoice_comm);
            }
            InvoiceLineField::Comm => {
                line.invoice_comm =
                    validate::filtered(NumericKind::Decimal, &line.invoice_comm, value);
                line.invoice_price = validate::net_of(&line.invoice_sub_total, &line.invoice_comm);
            }
        }
        self.recompute_total();
    }

    /// Removes the line at `index` per the deletion policy shared with the
    /// payment editor: the collection never becomes empty, persisted lines
    /// are deleted server-side first and kept on failure, and a successful
    /// remote delete is followed by a reload.
    pub async fn remove_line<A: InvoiceApi>(
        &mut self,
        api: &A,
        confirm: &dyn Confirm,
        index: usize,
    ) -> Result<RemoveOutcome> {
        if self.lines.len() <= 1 {
            return Ok(RemoveOutcome::Refused);
        }
        let Some(line) = self.lines.get(index) else {
            return Ok(RemoveOutcome::Refused);
        };

        if !line.is_persisted() {
            self.lines.remove(index);
            self.recompute_total();
            return Ok(RemoveOutcome::RemovedLocally);
        }

        if !confirm.confirm("Are you sure you want to delete this invoice entry?") {
            return Ok(RemoveOutcome::Cancelled);
        }

        let line_id = line.id.clone();
        api.delete_invoice_line(&line_id).await?;
        info!("Deleted invoice line {line_id}");

        self.lines.remove(index);
        let record_id = self.invoice.id.clone();
        self.load(api, &record_id).await?;
        Ok(RemoveOutcome::Deleted)
    }

    /// Validates and persists the record. Lines are trimmed to the
    /// server-relevant fields; the derived net is never sent. No sum check:
    /// the total is derived, so it is consistent by construction.
    pub async fn submit<A: InvoiceApi>(&mut self, api: &A) -> Result<()> {
        if self.invoice.invoice_date.is_empty()
            || self.invoice.invoice_from_id.is_empty()
            || self.invoice.invoice_to_id.is_empty()
            || self.invoice.invoice_total.is_empty()
        {
            return Err(Error::validation("Please fill all required fields"));
        }

        let update = InvoiceUpdate {
            invoice_date: self.invoice.invoice_date.clone(),
            invoice_year: self.invoice.invoice_year.clone(),
            invoice_no: self.invoice.invoice_no.clone(),
            invoice_from_id: self.invoice.invoice_from_id.clone(),
            invoice_to_id: self.invoice.invoice_to_id.clone(),
            invoice_total: self.invoice.invoice_total.clone(),
            invoice_data: self.lines.iter().map(InvoiceLineUpdate::from).collect(),
        };

        api.update_invoice(&self.invoice.id, &update).await?;
        info!("Updated invoice {}", self.invoice.id);
        Ok(())
    }

    // Derived record total: sum of the row sub-totals, serialized the short
    // way ("150", not "150.00").
    fn recompute_total(&mut self) {
        let total: f64 = self
            .lines
            .iter()
            .map(|line| validate::num(&line.invoice_sub_total))
            .sum();
        self.invoice.invoice_total = total.to_string();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn load_precomputes_line_nets() -> Result<()> {
        let api = MockApi::with_invoice_lines(2);
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;

        assert_eq!(editor.lines.len(), 2);
        assert_eq!(editor.lines[0].invoice_price, "90.00");
        Ok(())
    }

    #[tokio::test]
    async fn load_seeds_blank_line_when_no_subs() -> Result<()> {
        let api = MockApi::new();
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;

        assert_eq!(editor.lines, vec![InvoiceLine::blank()]);
        Ok(())
    }

    #[tokio::test]
    async fn entering_rows_derives_net_and_total() -> Result<()> {
        let api = MockApi::new();
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;
        editor.add_line();

        editor.set_line_field(0, InvoiceLineField::SubTotal, "100");
        editor.set_line_field(0, InvoiceLineField::Comm, "10");
        editor.set_line_field(1, InvoiceLineField::SubTotal, "50");
        editor.set_line_field(1, InvoiceLineField::Comm, "5");

        assert_eq!(editor.lines[0].invoice_price, "90.00");
        assert_eq!(editor.lines[1].invoice_price, "45.00");
        assert_eq!(editor.invoice.invoice_total, "150");
        Ok(())
    }

    #[tokio::test]
    async fn line_fields_are_decimal_filtered() -> Result<()> {
        let api = MockApi::new();
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;

        editor.set_line_field(0, InvoiceLineField::SubTotal, "12.5");
        assert_eq!(editor.lines[0].invoice_sub_total, "12.5");

        editor.set_line_field(0, InvoiceLineField::SubTotal, "12.5.0");
        assert_eq!(editor.lines[0].invoice_sub_total, "12.5");

        editor.set_line_field(0, InvoiceLineField::BillNo, "1201x");
        assert_eq!(editor.lines[0].invoice_sub_bill_no, "");
        Ok(())
    }

    #[tokio::test]
    async fn counterparty_change_resets_lines() -> Result<()> {
        let api = MockApi::with_invoice_lines(3);
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;

        editor.set_field(InvoiceField::FromId, "5");

        assert_eq!(editor.lines, vec![InvoiceLine::blank()]);
        assert_eq!(editor.invoice.invoice_total, "0");
        Ok(())
    }

    #[tokio::test]
    async fn removing_unsaved_line_recomputes_total() -> Result<()> {
        let api = MockApi::new();
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;
        editor.add_line();
        editor.set_line_field(0, InvoiceLineField::SubTotal, "100");
        editor.set_line_field(1, InvoiceLineField::SubTotal, "50");

        let outcome = editor.remove_line(&api, &StubConfirm(true), 1).await?;

        assert_eq!(outcome, RemoveOutcome::RemovedLocally);
        assert_eq!(editor.invoice.invoice_total, "100");
        Ok(())
    }

    #[tokio::test]
    async fn removing_persisted_line_deletes_then_reloads() -> Result<()> {
        let api = MockApi::with_invoice_lines(2);
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;
        api.clear_calls();

        let outcome = editor.remove_line(&api, &StubConfirm(true), 0).await?;

        assert_eq!(outcome, RemoveOutcome::Deleted);
        assert_eq!(api.calls_matching("delete_invoice_line:20"), 1);
        assert_eq!(api.calls_matching("fetch_invoice:9"), 1);
        Ok(())
    }

    #[tokio::test]
    async fn remove_delete_failure_keeps_row() -> Result<()> {
        let api = MockApi::with_invoice_lines(2);
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;
        api.set_fail_deletes(true);
        api.clear_calls();

        let result = editor.remove_line(&api, &StubConfirm(true), 0).await;

        assert!(result.is_err());
        assert_eq!(editor.lines.len(), 2);
        assert_eq!(api.calls_matching("fetch_invoice"), 0);
        Ok(())
    }

    #[tokio::test]
    async fn submit_trims_lines_to_server_fields() -> Result<()> {
        let api = MockApi::with_invoice_lines(1);
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;
        editor.set_field(InvoiceField::Date, "2024-04-01");
        api.clear_calls();

        editor.submit(&api).await?;

        assert_eq!(api.calls_matching("update_invoice:9"), 1);
        let update = api.last_invoice_update().unwrap();
        assert_eq!(update.invoice_data.len(), 1);
        assert_eq!(update.invoice_data[0].invoice_comm, "10");
        Ok(())
    }

    #[tokio::test]
    async fn submit_with_missing_required_is_blocked() -> Result<()> {
        let api = MockApi::with_invoice_lines(1);
        let mut editor = InvoiceEditor::new();
        editor.load(&api, "9").await?;
        editor.set_field(InvoiceField::Date, "");
        api.clear_calls();

        let result = editor.submit(&api).await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        assert_eq!(api.call_count(), 0);
        Ok(())
    }
}
