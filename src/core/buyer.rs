//! Buyer editor - business logic behind the buyer edit screen.
//!
//! The simplest of the three editors: a flat record, no sub-lines and no
//! derived fields. The mobile number is digits-only; every field is required
//! on submit.

use tracing::info;

use crate::api::BuyerStore;
use crate::core::validate::{self, NumericKind};
use crate::entities::{Buyer, BuyerUpdate};
use crate::errors::{Error, Result};

/// Editable fields of the buyer record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuyerField {
    Company,
    Name,
    Mobile,
    Email,
    Address,
    Status,
}

/// In-memory state of one buyer edit screen.
#[derive(Debug, Default)]
pub struct BuyerEditor {
    pub buyer: Buyer,
}

impl BuyerEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: BuyerStore>(&mut self, api: &A, id: &str) -> Result<()> {
        self.buyer = api.fetch_buyer(id).await?;
        Ok(())
    }

    /// Applies one field change. The mobile number accepts only digits; a
    /// rejected value is a silent no-op.
    pub fn set_field(&mut self, field: BuyerField, value: &str) {
        match field {
            BuyerField::Company => self.buyer.buyer_company = value.to_string(),
            BuyerField::Name => self.buyer.buyer_name = value.to_string(),
            BuyerField::Mobile => {
                self.buyer.buyer_mobile =
                    validate::filtered(NumericKind::Digits, &self.buyer.buyer_mobile, value);
            }
            BuyerField::Email => self.buyer.buyer_email = value.to_string(),
            BuyerField::Address => self.buyer.buyer_address = value.to_string(),
            BuyerField::Status => self.buyer.buyer_status = value.to_string(),
        }
    }

    /// Validates and persists the record. Every field is required; a
    /// validation failure never reaches the network.
    pub async fn submit<A: BuyerStore>(&mut self, api: &A) -> Result<()> {
        let complete = !self.buyer.buyer_company.is_empty()
            && !self.buyer.buyer_name.is_empty()
            && !self.buyer.buyer_mobile.is_empty()
            && !self.buyer.buyer_email.is_empty()
            && !self.buyer.buyer_address.is_empty()
            && !self.buyer.buyer_status.is_empty();
        if !complete {
            return Err(Error::validation("Please fill all required fields"));
        }

        api.update_buyer(&self.buyer.id, &BuyerUpdate::from(&self.buyer))
            .await?;
        info!("Updated buyer {}", self.buyer.id);
        Ok(())
    }
}
