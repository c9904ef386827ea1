//! # Purchasing Resources
//!
//! Purchase orders and their receipt transition.

use atlas_core::document::{PurchaseOrder, PurchaseOrderDraft};

use crate::client::ApiClient;
use crate::error::ApiResult;

/// `/purchase-orders` endpoints.
pub struct PurchaseOrdersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PurchaseOrdersApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<PurchaseOrder>> {
        self.client.get("/purchase-orders").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<PurchaseOrder> {
        self.client.get(&format!("/purchase-orders/{}", id)).await
    }

    pub async fn create(&self, draft: &PurchaseOrderDraft) -> ApiResult<PurchaseOrder> {
        self.client.post("/purchase-orders", draft).await
    }

    /// pending → received. The server appends the "in" stock movement for
    /// every line.
    pub async fn receive(&self, id: &str) -> ApiResult<PurchaseOrder> {
        self.client
            .post_action(&format!("/purchase-orders/{}/receive", id))
            .await
    }

    /// pending → cancelled.
    pub async fn cancel(&self, id: &str) -> ApiResult<PurchaseOrder> {
        self.client
            .post_action(&format!("/purchase-orders/{}/cancel", id))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/purchase-orders/{}", id))
            .await
    }
}

impl ApiClient {
    pub fn purchase_orders(&self) -> PurchaseOrdersApi<'_> {
        PurchaseOrdersApi { client: self }
    }
}
