//! # Inventory Resources
//!
//! The stock movement log. Movements are append-only: there is no update
//! or delete endpoint, by design.

use atlas_core::ledger::{MovementDraft, StockMovement};

use crate::client::ApiClient;
use crate::error::ApiResult;

/// `/stock-movements` endpoints.
pub struct StockMovementsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> StockMovementsApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<StockMovement>> {
        self.client.get("/stock-movements").await
    }

    pub async fn list_for_product(&self, product_id: &str) -> ApiResult<Vec<StockMovement>> {
        self.client
            .get(&format!("/stock-movements?productId={}", product_id))
            .await
    }

    /// Appends a movement to the ledger.
    pub async fn create(&self, draft: &MovementDraft) -> ApiResult<StockMovement> {
        draft.validate()?;
        self.client.post("/stock-movements", draft).await
    }
}

impl ApiClient {
    pub fn stock_movements(&self) -> StockMovementsApi<'_> {
        StockMovementsApi { client: self }
    }
}
