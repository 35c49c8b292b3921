//! Buyer entity - The flat record behind the buyer edit screen.

use serde::{Deserialize, Serialize};

/// Status values the panel accepts for a buyer.
pub const STATUS_OPTIONS: [&str; 2] = ["Active", "Inactive"];

/// Editable buyer record. All fields are held string-encoded, the way the
/// form holds them; `id` is empty until the record has been persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Buyer {
    pub id: String,
    pub buyer_company: String,
    pub buyer_name: String,
    pub buyer_mobile: String,
    pub buyer_email: String,
    pub buyer_address: String,
    pub buyer_status: String,
}

/// Update payload PUT back to the server on submit; the id travels in the
/// URL, not the body.
#[derive(Clone, Debug, Serialize)]
pub struct BuyerUpdate {
    pub buyer_company: String,
    pub buyer_name: String,
    pub buyer_mobile: String,
    pub buyer_email: String,
    pub buyer_address: String,
    pub buyer_status: String,
}

impl From<&Buyer> for BuyerUpdate {
    fn from(buyer: &Buyer) -> Self {
        BuyerUpdate {
            buyer_company: buyer.buyer_company.clone(),
            buyer_name: buyer.buyer_name.clone(),
            buyer_mobile: buyer.buyer_mobile.clone(),
            buyer_email: buyer.buyer_email.clone(),
            buyer_address: buyer.buyer_address.clone(),
            buyer_status: buyer.buyer_status.clone(),
        }
    }
}

/// Wire shape of a fetched buyer. Every field is optional so a sparse or
/// null-laden server response still deserializes.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BuyerPayload {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub buyer_company: Option<String>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub buyer_mobile: Option<String>,
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default)]
    pub buyer_address: Option<String>,
    #[serde(default)]
    pub buyer_status: Option<String>,
}

impl BuyerPayload {
    /// Merge-with-defaults: server value wins if present, else the default
    /// (empty string).
    pub fn merged(self) -> Buyer {
        Buyer {
            id: super::scalar_string(self.id),
            buyer_company: self.buyer_company.unwrap_or_default(),
            buyer_name: self.buyer_name.unwrap_or_default(),
            buyer_mobile: self.buyer_mobile.unwrap_or_default(),
            buyer_email: self.buyer_email.unwrap_or_default(),
            buyer_address: self.buyer_address.unwrap_or_default(),
            buyer_status: self.buyer_status.unwrap_or_default(),
        }
    }
}
