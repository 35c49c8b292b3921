//! Production store implementation over the panel's JSON API.
//!
//! One `reqwest` client, one opaque bearer token attached to every call.
//! Endpoint paths and response envelopes follow the panel conventions
//! (`panel-fetch-*`, `panel-update-*`, `panel-delete-*`). Retry policy and
//! timeouts are left to the transport layer; this client maps a non-success
//! status to [`Error::Api`] and everything below that to [`Error::Transport`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::entities::{
    Buyer, BuyerOption, BuyerPayload, BuyerUpdate, Counterparty, EligibleBill, InvoiceLinePayload,
    InvoicePayload, InvoiceUpdate, OutstandingRow, PaymentLinePayload, PaymentPayload,
    PaymentUpdate, VendorOption,
};
use crate::errors::{Error, Result};

use super::{
    BillStore, BuyerStore, InvoiceBundle, InvoiceStore, LookupStore, OutstandingQuery,
    PaymentBundle, PaymentStore, ReportStore,
};

/// HTTP-backed implementation of all store contracts.
pub struct PanelClient {
    client: Client,
    base_url: String,
    token: String,
}

impl PanelClient {
    /// Creates a client for `base_url` (no trailing slash) using `token` as
    /// the bearer credential on every request.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        PanelClient {
            client: Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }

    /// Sends the request and decodes a JSON body, mapping non-success
    /// statuses to `Error::Api` with the server's message text.
    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder, url: &str) -> Result<T> {
        let response = self
            .authed(builder)
            .send()
            .await
            .inspect_err(|e| error!("Request to {url} failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Request to {url} returned {status}");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Request to {url} succeeded");
        response.json::<T>().await.map_err(Into::into)
    }

    /// Like [`execute`](Self::execute) for mutations whose response body does
    /// not matter.
    async fn execute_unit(&self, builder: RequestBuilder, url: &str) -> Result<()> {
        let response = self
            .authed(builder)
            .send()
            .await
            .inspect_err(|e| error!("Request to {url} failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Request to {url} returned {status}");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Request to {url} succeeded");
        Ok(())
    }
}

// Response envelopes. The panel wraps every resource in a named key.

#[derive(Deserialize)]
struct PaymentEnvelope {
    #[serde(default)]
    payment: PaymentPayload,
    #[serde(default, rename = "paymentSub")]
    payment_sub: Vec<PaymentLinePayload>,
}

#[derive(Deserialize)]
struct InvoiceEnvelope {
    #[serde(default)]
    invoice: InvoicePayload,
    #[serde(default, rename = "invoiceSub")]
    invoice_sub: Vec<InvoiceLinePayload>,
}

#[derive(Deserialize)]
struct BuyerEnvelope {
    #[serde(default)]
    buyer: BuyerPayload,
}

#[derive(Deserialize)]
struct BuyerListEnvelope {
    #[serde(default)]
    buyer: Vec<BuyerOption>,
}

#[derive(Deserialize)]
struct VendorListEnvelope {
    #[serde(default)]
    vendor: Vec<VendorOption>,
}

#[derive(Deserialize)]
struct BillListEnvelope {
    #[serde(default)]
    payment_billno: Vec<EligibleBill>,
}

#[derive(Deserialize)]
struct OutstandingEnvelope {
    #[serde(default, rename = "buyerOutstanding")]
    buyer_outstanding: Vec<OutstandingRow>,
}

#[async_trait]
impl BuyerStore for PanelClient {
    async fn fetch_buyer(&self, id: &str) -> Result<Buyer> {
        let url = self.url(&format!("panel-fetch-buyer-by-id/{id}"));
        let envelope: BuyerEnvelope = self.execute(self.client.get(&url), &url).await?;
        Ok(envelope.buyer.merged())
    }

    async fn update_buyer(&self, id: &str, update: &BuyerUpdate) -> Result<()> {
        let url = self.url(&format!("panel-update-buyer/{id}"));
        self.execute_unit(self.client.put(&url).json(update), &url).await
    }
}

#[async_trait]
impl PaymentStore for PanelClient {
    async fn fetch_payment(&self, id: &str) -> Result<PaymentBundle> {
        let url = self.url(&format!("panel-fetch-payment-by-id/{id}"));
        let envelope: PaymentEnvelope = self.execute(self.client.get(&url), &url).await?;
        Ok(PaymentBundle {
            payment: envelope.payment.merged(),
            lines: envelope
                .payment_sub
                .into_iter()
                .map(PaymentLinePayload::merged)
                .collect(),
        })
    }

    async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> Result<()> {
        let url = self.url(&format!("panel-update-payment/{id}"));
        self.execute_unit(self.client.put(&url).json(update), &url).await
    }

    async fn delete_payment_line(&self, line_id: &str) -> Result<()> {
        let url = self.url(&format!("panel-delete-paymentSub/{line_id}"));
        self.execute_unit(self.client.delete(&url), &url).await
    }
}

#[async_trait]
impl InvoiceStore for PanelClient {
    async fn fetch_invoice(&self, id: &str) -> Result<InvoiceBundle> {
        let url = self.url(&format!("panel-fetch-invoice-by-id/{id}"));
        let envelope: InvoiceEnvelope = self.execute(self.client.get(&url), &url).await?;
        Ok(InvoiceBundle {
            invoice: envelope.invoice.merged(),
            lines: envelope
                .invoice_sub
                .into_iter()
                .map(InvoiceLinePayload::merged)
                .collect(),
        })
    }

    async fn update_invoice(&self, id: &str, update: &InvoiceUpdate) -> Result<()> {
        let url = self.url(&format!("panel-update-invoice/{id}"));
        self.execute_unit(self.client.put(&url).json(update), &url).await
    }

    async fn delete_invoice_line(&self, line_id: &str) -> Result<()> {
        let url = self.url(&format!("panel-delete-invoiceSub/{line_id}"));
        self.execute_unit(self.client.delete(&url), &url).await
    }
}

#[async_trait]
impl LookupStore for PanelClient {
    async fn list_buyers(&self) -> Result<Vec<Counterparty>> {
        let url = self.url("panel-fetch-buyer");
        let envelope: BuyerListEnvelope = self.execute(self.client.get(&url), &url).await?;
        Ok(envelope.buyer.into_iter().map(Counterparty::from).collect())
    }

    async fn list_vendors(&self) -> Result<Vec<Counterparty>> {
        let url = self.url("panel-fetch-vendor");
        let envelope: VendorListEnvelope = self.execute(self.client.get(&url), &url).await?;
        Ok(envelope.vendor.into_iter().map(Counterparty::from).collect())
    }
}

#[async_trait]
impl BillStore for PanelClient {
    async fn list_eligible_bills(&self, from_id: &str, to_id: &str) -> Result<Vec<EligibleBill>> {
        // Panel convention: vendor id first in the path, buyer id second.
        let url = self.url(&format!("panel-fetch-payment-billingno/{to_id}/{from_id}"));
        let envelope: BillListEnvelope = self.execute(self.client.get(&url), &url).await?;
        Ok(envelope.payment_billno)
    }
}

#[async_trait]
impl ReportStore for PanelClient {
    async fn fetch_outstanding(&self, query: &OutstandingQuery) -> Result<Vec<OutstandingRow>> {
        let url = self.url("panel-fetch-buyer-outstanding-report");
        let envelope: OutstandingEnvelope =
            self.execute(self.client.post(&url).json(query), &url).await?;
        Ok(envelope.buyer_outstanding)
    }
}
