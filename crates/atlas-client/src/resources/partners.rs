//! # Partner Resources
//!
//! Customers and suppliers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use atlas_core::money::Money;
use atlas_core::types::{Customer, CustomerStatus, Supplier};
use atlas_core::validation;

use crate::client::ApiClient;
use crate::error::ApiResult;

// =============================================================================
// Payloads
// =============================================================================

/// Create/update payload for a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub credit_limit: Money,
    pub status: CustomerStatus,
    /// Sparse productId → override unit price mapping.
    #[serde(default)]
    pub customer_prices: HashMap<String, Money>,
}

impl CustomerInput {
    pub fn validate(&self) -> ApiResult<()> {
        validation::validate_name(&self.name)?;
        validation::validate_unit_price(self.credit_limit)?;
        for price in self.customer_prices.values() {
            validation::validate_unit_price(*price)?;
        }
        Ok(())
    }
}

/// Create/update payload for a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub active: bool,
}

impl SupplierInput {
    pub fn validate(&self) -> ApiResult<()> {
        validation::validate_name(&self.name)?;
        Ok(())
    }
}

// =============================================================================
// Resources
// =============================================================================

/// `/customers` endpoints.
pub struct CustomersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CustomersApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<Customer>> {
        self.client.get("/customers").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Customer> {
        self.client.get(&format!("/customers/{}", id)).await
    }

    pub async fn create(&self, input: &CustomerInput) -> ApiResult<Customer> {
        input.validate()?;
        self.client.post("/customers", input).await
    }

    pub async fn update(&self, id: &str, input: &CustomerInput) -> ApiResult<Customer> {
        input.validate()?;
        self.client.put(&format!("/customers/{}", id), input).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("/customers/{}", id)).await
    }
}

/// `/suppliers` endpoints.
pub struct SuppliersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SuppliersApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<Supplier>> {
        self.client.get("/suppliers").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Supplier> {
        self.client.get(&format!("/suppliers/{}", id)).await
    }

    pub async fn create(&self, input: &SupplierInput) -> ApiResult<Supplier> {
        input.validate()?;
        self.client.post("/suppliers", input).await
    }

    pub async fn update(&self, id: &str, input: &SupplierInput) -> ApiResult<Supplier> {
        input.validate()?;
        self.client.put(&format!("/suppliers/{}", id), input).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("/suppliers/{}", id)).await
    }
}

impl ApiClient {
    pub fn customers(&self) -> CustomersApi<'_> {
        CustomersApi { client: self }
    }

    pub fn suppliers(&self) -> SuppliersApi<'_> {
        SuppliersApi { client: self }
    }
}
