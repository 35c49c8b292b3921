//! Payment editor - business logic behind the payment edit screen.
//!
//! Holds the payment record, its ordered sub-lines, the eligible-bills list
//! for the current (buyer, vendor) pair, and the two counterparty lookups.
//! The total is entered by the user and checked against the line sum on
//! submit; line deletion is routed by the line's id (remote delete for
//! persisted lines, local removal for unsaved ones).

use tracing::info;

use crate::api::{Confirm, PaymentApi};
use crate::core::RemoveOutcome;
use crate::core::validate::{self, NumericKind};
use crate::entities::{Counterparty, EligibleBill, Payment, PaymentLine, PaymentUpdate};
use crate::errors::{Error, Result};

/// Editable fields of the payment record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentField {
    PayDate,
    PayYear,
    FromId,
    ToId,
    Total,
    Reference,
}

/// Editable fields of a payment sub-line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentLineField {
    BillNo,
    Amount,
}

/// In-memory state of one payment edit screen.
#[derive(Debug, Default)]
pub struct PaymentEditor {
    pub payment: Payment,
    pub lines: Vec<PaymentLine>,
    pub eligible_bills: Vec<EligibleBill>,
    pub buyers: Vec<Counterparty>,
    pub vendors: Vec<Counterparty>,
}

impl PaymentEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the record, both lookup lists, and, when the record already
    /// carries both counterparty ids, the eligible bills for that pair.
    /// Server-provided sub-lines seed the line collection; without any, the
    /// editor starts with a single blank row.
    pub async fn load<A: PaymentApi>(&mut self, api: &A, id: &str) -> Result<()> {
        let bundle = api.fetch_payment(id).await?;
        self.buyers = api.list_buyers().await?;
        self.vendors = api.list_vendors().await?;

        self.payment = bundle.payment;
        self.lines = if bundle.lines.is_empty() {
            vec![PaymentLine::blank()]
        } else {
            bundle.lines
        };

        self.eligible_bills.clear();
        if !self.payment.payment_from_id.is_empty() && !self.payment.payment_to_id.is_empty() {
            self.eligible_bills = api
                .list_eligible_bills(&self.payment.payment_from_id, &self.payment.payment_to_id)
                .await?;
        }

        Ok(())
    }

    /// Applies one field change. The total accepts only digits (a rejected
    /// value is a silent no-op). Changing either counterparty id detaches
    /// every line from its persisted identity, resets the collection to one
    /// blank row, and refetches the eligible bills for the new pair; a
    /// refetch failure leaves the reset in place with an empty bill list.
    pub async fn set_field<A: PaymentApi>(
        &mut self,
        api: &A,
        field: PaymentField,
        value: &str,
    ) -> Result<()> {
        match field {
            PaymentField::PayDate => self.payment.pay_date = value.to_string(),
            PaymentField::PayYear => self.payment.pay_year = value.to_string(),
            PaymentField::Reference => self.payment.pay_reference = value.to_string(),
            PaymentField::Total => {
                self.payment.pay_total =
                    validate::filtered(NumericKind::Digits, &self.payment.pay_total, value);
            }
            PaymentField::FromId | PaymentField::ToId => {
                if field == PaymentField::FromId {
                    self.payment.payment_from_id = value.to_string();
                } else {
                    self.payment.payment_to_id = value.to_string();
                }
                if !self.payment.payment_from_id.is_empty()
                    && !self.payment.payment_to_id.is_empty()
                {
                    self.lines = vec![PaymentLine::blank()];
                    self.eligible_bills.clear();
                    self.eligible_bills = api
                        .list_eligible_bills(
                            &self.payment.payment_from_id,
                            &self.payment.payment_to_id,
                        )
                        .await?;
                }
            }
        }
        Ok(())
    }

    /// Appends a blank line. No upper bound.
    pub fn add_line(&mut self) {
        self.lines.push(PaymentLine::blank());
    }

    /// Applies one line field change; the amount is digits-filtered in
    /// place. Out-of-range indices are ignored.
    pub fn set_line_field(&mut self, index: usize, field: PaymentLineField, value: &str) {
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };
        match field {
            PaymentLineField::BillNo => line.payment_bill_no = value.to_string(),
            PaymentLineField::Amount => {
                line.payment_amount =
                    validate::filtered(NumericKind::Digits, &line.payment_amount, value);
            }
        }
    }

    /// Removes the line at `index` per the deletion policy. The collection
    /// never becomes empty; a persisted line is deleted server-side first
    /// and stays in place when that call fails. After a successful remote
    /// delete the editor reloads to resynchronize with the server.
    pub async fn remove_line<A: PaymentApi>(
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
            return Ok(RemoveOutcome::RemovedLocally);
        }

        if !confirm.confirm("Are you sure you want to delete this payment entry?") {
            return Ok(RemoveOutcome::Cancelled);
        }

        let line_id = line.id.clone();
        api.delete_payment_line(&line_id).await?;
        info!("Deleted payment line {line_id}");

        self.lines.remove(index);
        let record_id = self.payment.id.clone();
        self.load(api, &record_id).await?;
        Ok(RemoveOutcome::Deleted)
    }

    /// Sum of the line amounts after numeric coercion.
    pub fn line_amount_sum(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| validate::num(&line.payment_amount))
            .sum()
    }

    fn check_required(&self) -> Result<()> {
        let record_ok = !self.payment.pay_date.is_empty()
            && !self.payment.pay_year.is_empty()
            && !self.payment.payment_from_id.is_empty()
            && !self.payment.payment_to_id.is_empty()
            && !self.payment.pay_total.is_empty();
        let lines_ok = self
            .lines
            .iter()
            .all(|line| !line.payment_bill_no.is_empty() && !line.payment_amount.is_empty());
        if record_ok && lines_ok {
            Ok(())
        } else {
            Err(Error::validation("Fill all required"))
        }
    }

    /// Validates and persists the record with its full line collection. A
    /// validation failure never reaches the network; a transport failure
    /// leaves the editor state intact.
    #[allow(clippy::float_cmp)] // exact equality after coercion, as the form checks it
    pub async fn submit<A: PaymentApi>(&mut self, api: &A) -> Result<()> {
        self.check_required()?;

        if validate::num(&self.payment.pay_total) != self.line_amount_sum() {
            return Err(Error::validation(
                "Total amount must equal sum of individual payment amounts",
            ));
        }

        let update = PaymentUpdate {
            pay_date: self.payment.pay_date.clone(),
            pay_year: self.payment.pay_year.clone(),
            payment_from_id: self.payment.payment_from_id.clone(),
            payment_to_id: self.payment.payment_to_id.clone(),
            pay_total: self.payment.pay_total.clone(),
            pay_reference: self.payment.pay_reference.clone(),
            payment_data: self.lines.clone(),
        };

        api.update_payment(&self.payment.id, &update).await?;
        info!("Updated payment {}", self.payment.id);
        Ok(())
    }
}
