//! # Billing Resources
//!
//! Invoices, customer receipts (payments), and sales returns.

use atlas_core::document::{
    CustomerReceipt, ReceiptDraft, SalesInvoice, SalesInvoiceDraft, SalesReturn, SalesReturnDraft,
};
use atlas_core::validation;

use crate::client::ApiClient;
use crate::error::ApiResult;

/// `/invoices` endpoints.
pub struct InvoicesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> InvoicesApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<SalesInvoice>> {
        self.client.get("/invoices").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<SalesInvoice> {
        self.client.get(&format!("/invoices/{}", id)).await
    }

    pub async fn create(&self, draft: &SalesInvoiceDraft) -> ApiResult<SalesInvoice> {
        self.client.post("/invoices", draft).await
    }

    /// Draft → Approved. Locks the financials.
    pub async fn approve(&self, id: &str) -> ApiResult<SalesInvoice> {
        self.client
            .post_action(&format!("/invoices/{}/approve", id))
            .await
    }

    /// Approved → Sent.
    pub async fn send(&self, id: &str) -> ApiResult<SalesInvoice> {
        self.client
            .post_action(&format!("/invoices/{}/send", id))
            .await
    }

    pub async fn cancel(&self, id: &str) -> ApiResult<SalesInvoice> {
        self.client
            .post_action(&format!("/invoices/{}/cancel", id))
            .await
    }
}

/// `/payments` endpoints (customer receipts).
pub struct ReceiptsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReceiptsApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<CustomerReceipt>> {
        self.client.get("/payments").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<CustomerReceipt> {
        self.client.get(&format!("/payments/{}", id)).await
    }

    /// Records a receipt. The server applies it to the linked invoice (or
    /// to the customer balance when unlinked) and is the authority for the
    /// resulting amounts.
    pub async fn create(&self, draft: &ReceiptDraft) -> ApiResult<CustomerReceipt> {
        validation::validate_payment_amount(draft.amount)?;
        self.client.post("/payments", draft).await
    }
}

/// `/sales-returns` endpoints.
pub struct ReturnsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReturnsApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<SalesReturn>> {
        self.client.get("/sales-returns").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<SalesReturn> {
        self.client.get(&format!("/sales-returns/{}", id)).await
    }

    pub async fn create(&self, draft: &SalesReturnDraft) -> ApiResult<SalesReturn> {
        self.client.post("/sales-returns", draft).await
    }

    /// pending → approved.
    pub async fn approve(&self, id: &str) -> ApiResult<SalesReturn> {
        self.client
            .post_action(&format!("/sales-returns/{}/approve", id))
            .await
    }

    /// pending → rejected.
    pub async fn reject(&self, id: &str) -> ApiResult<SalesReturn> {
        self.client
            .post_action(&format!("/sales-returns/{}/reject", id))
            .await
    }

    /// approved → refunded. The server performs the full cascade: refund
    /// payout, invoice reversal, customer balance credit, and the
    /// reversing stock movements.
    pub async fn refund(&self, id: &str) -> ApiResult<SalesReturn> {
        self.client
            .post_action(&format!("/sales-returns/{}/refund", id))
            .await
    }
}

impl ApiClient {
    pub fn invoices(&self) -> InvoicesApi<'_> {
        InvoicesApi { client: self }
    }

    pub fn receipts(&self) -> ReceiptsApi<'_> {
        ReceiptsApi { client: self }
    }

    pub fn returns(&self) -> ReturnsApi<'_> {
        ReturnsApi { client: self }
    }
}
