//! Counterparty entity - A lookup option for the buyer/vendor selectors.

use serde::Deserialize;

/// One selectable counterparty: an opaque id plus its display name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counterparty {
    pub id: String,
    pub company: String,
}

/// Wire shape of a buyer lookup entry.
#[derive(Clone, Debug, Deserialize)]
pub struct BuyerOption {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub buyer_company: Option<String>,
}

/// Wire shape of a vendor lookup entry.
#[derive(Clone, Debug, Deserialize)]
pub struct VendorOption {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub vendor_company: Option<String>,
}

impl From<BuyerOption> for Counterparty {
    fn from(option: BuyerOption) -> Self {
        Counterparty {
            id: super::scalar_string(option.id),
            company: option.buyer_company.unwrap_or_default(),
        }
    }
}

impl From<VendorOption> for Counterparty {
    fn from(option: VendorOption) -> Self {
        Counterparty {
            id: super::scalar_string(option.id),
            company: option.vendor_company.unwrap_or_default(),
        }
    }
}
