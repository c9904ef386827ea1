//! # Sales Resources
//!
//! Sales orders and delivery orders, including their transition endpoints.
//!
//! Transition calls return the updated document as confirmed by the
//! server; the client never flips a status optimistically.

use atlas_core::document::{
    DeliveryOrder, DeliveryOrderDraft, LineItem, SalesOrder, SalesOrderDraft,
};

use crate::client::ApiClient;
use crate::error::ApiResult;

/// `/sales-orders` endpoints.
pub struct SalesOrdersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SalesOrdersApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<SalesOrder>> {
        self.client.get("/sales-orders").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<SalesOrder> {
        self.client.get(&format!("/sales-orders/{}", id)).await
    }

    /// Creates the order. The draft carries no number; the server assigns
    /// one.
    pub async fn create(&self, draft: &SalesOrderDraft) -> ApiResult<SalesOrder> {
        draft.validate()?;
        self.client.post("/sales-orders", draft).await
    }

    /// Replaces the line items of a Draft order.
    pub async fn update_items(&self, id: &str, items: &[LineItem]) -> ApiResult<SalesOrder> {
        self.client
            .put(&format!("/sales-orders/{}/items", id), items)
            .await
    }

    /// Draft → Confirmed.
    pub async fn approve(&self, id: &str) -> ApiResult<SalesOrder> {
        self.client
            .post_action(&format!("/sales-orders/{}/approve", id))
            .await
    }

    pub async fn cancel(&self, id: &str) -> ApiResult<SalesOrder> {
        self.client
            .post_action(&format!("/sales-orders/{}/cancel", id))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("/sales-orders/{}", id)).await
    }
}

/// `/delivery-orders` endpoints.
pub struct DeliveriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DeliveriesApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<DeliveryOrder>> {
        self.client.get("/delivery-orders").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<DeliveryOrder> {
        self.client.get(&format!("/delivery-orders/{}", id)).await
    }

    pub async fn create(&self, draft: &DeliveryOrderDraft) -> ApiResult<DeliveryOrder> {
        self.client.post("/delivery-orders", draft).await
    }

    /// Pending → Approved.
    pub async fn approve(&self, id: &str) -> ApiResult<DeliveryOrder> {
        self.client
            .post_action(&format!("/delivery-orders/{}/approve", id))
            .await
    }

    /// Approved → In Transit.
    pub async fn start_transit(&self, id: &str) -> ApiResult<DeliveryOrder> {
        self.client
            .post_action(&format!("/delivery-orders/{}/transit", id))
            .await
    }

    /// In Transit → Delivered.
    pub async fn mark_delivered(&self, id: &str) -> ApiResult<DeliveryOrder> {
        self.client
            .post_action(&format!("/delivery-orders/{}/deliver", id))
            .await
    }

    pub async fn cancel(&self, id: &str) -> ApiResult<DeliveryOrder> {
        self.client
            .post_action(&format!("/delivery-orders/{}/cancel", id))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/delivery-orders/{}", id))
            .await
    }
}

impl ApiClient {
    pub fn sales_orders(&self) -> SalesOrdersApi<'_> {
        SalesOrdersApi { client: self }
    }

    pub fn deliveries(&self) -> DeliveriesApi<'_> {
        DeliveriesApi { client: self }
    }
}
