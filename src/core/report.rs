//! Outstanding-report aggregation.
//!
//! Pure grouping of the flat server rows into the two-level hierarchy the
//! report renders: buyer company, then vendor company within each buyer.
//! Group order is first-seen order from the input, and rows keep their
//! relative order inside each group, so the output is deterministic for a
//! given input sequence.

use crate::entities::OutstandingRow;

/// Rows for one vendor under a buyer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VendorGroup {
    pub vendor: String,
    pub rows: Vec<OutstandingRow>,
}

impl VendorGroup {
    /// Sum of the per-row balances in this group.
    pub fn balance(&self) -> f64 {
        self.rows.iter().map(OutstandingRow::balance).sum()
    }
}

/// All vendor groups for one buyer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuyerGroup {
    pub buyer: String,
    pub vendors: Vec<VendorGroup>,
}

impl BuyerGroup {
    pub fn balance(&self) -> f64 {
        self.vendors.iter().map(VendorGroup::balance).sum()
    }
}

/// The grouped outstanding report.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutstandingReport {
    pub buyers: Vec<BuyerGroup>,
}

impl OutstandingReport {
    pub fn is_empty(&self) -> bool {
        self.buyers.is_empty()
    }

    /// Grand total across every group.
    pub fn balance(&self) -> f64 {
        self.buyers.iter().map(BuyerGroup::balance).sum()
    }
}

/// Groups flat rows by buyer company, then vendor company. Keys are compared
/// verbatim, so differently cased or padded names form distinct groups.
pub fn group(rows: &[OutstandingRow]) -> OutstandingReport {
    let mut report = OutstandingReport::default();
    for row in rows {
        let buyer_idx = report
            .buyers
            .iter()
            .position(|g| g.buyer == row.buyer_company)
            .unwrap_or_else(|| {
                report.buyers.push(BuyerGroup {
                    buyer: row.buyer_company.clone(),
                    vendors: Vec::new(),
                });
                report.buyers.len() - 1
            });
        let buyer = &mut report.buyers[buyer_idx];
        let vendor_idx = buyer
            .vendors
            .iter()
            .position(|g| g.vendor == row.vendor_company)
            .unwrap_or_else(|| {
                buyer.vendors.push(VendorGroup {
                    vendor: row.vendor_company.clone(),
                    rows: Vec::new(),
                });
                buyer.vendors.len() - 1
            });
        buyer.vendors[vendor_idx].rows.push(row.clone());
    }
    report
}
