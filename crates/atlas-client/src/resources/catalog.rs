//! # Catalog Resources
//!
//! Products, categories, and colors.

use serde::{Deserialize, Serialize};

use atlas_core::money::Money;
use atlas_core::types::{Category, Color, Product, ProductType};
use atlas_core::validation;

use crate::client::ApiClient;
use crate::error::ApiResult;

// =============================================================================
// Payloads
// =============================================================================

/// Create/update payload for a product. No id: the server assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub category_id: Option<String>,
    pub price: Money,
    pub cost: Money,
    pub uom: String,
    pub reorder_level: i64,
    #[serde(default)]
    pub color_ids: Vec<String>,
    #[serde(rename = "isHaveLid", default)]
    pub has_lid: bool,
    pub supplier_id: Option<String>,
    pub active: bool,
}

impl ProductInput {
    /// Client-side checks before the payload may be sent.
    pub fn validate(&self) -> ApiResult<()> {
        validation::validate_sku(&self.sku)?;
        validation::validate_name(&self.name)?;
        validation::validate_unit_price(self.price)?;
        validation::validate_unit_price(self.cost)?;
        Ok(())
    }
}

/// Create/update payload for a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

/// Create/update payload for a color.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInput {
    pub name: String,
    pub code: Option<String>,
}

// =============================================================================
// Resources
// =============================================================================

/// `/products` endpoints.
pub struct ProductsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductsApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        self.client.get("/products").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Product> {
        self.client.get(&format!("/products/{}", id)).await
    }

    pub async fn create(&self, input: &ProductInput) -> ApiResult<Product> {
        input.validate()?;
        self.client.post("/products", input).await
    }

    pub async fn update(&self, id: &str, input: &ProductInput) -> ApiResult<Product> {
        input.validate()?;
        self.client.put(&format!("/products/{}", id), input).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("/products/{}", id)).await
    }
}

/// `/categories` endpoints.
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        self.client.get("/categories").await
    }

    pub async fn create(&self, input: &CategoryInput) -> ApiResult<Category> {
        self.client.post("/categories", input).await
    }

    pub async fn update(&self, id: &str, input: &CategoryInput) -> ApiResult<Category> {
        self.client.put(&format!("/categories/{}", id), input).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("/categories/{}", id)).await
    }
}

/// `/colors` endpoints.
pub struct ColorsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ColorsApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<Color>> {
        self.client.get("/colors").await
    }

    pub async fn create(&self, input: &ColorInput) -> ApiResult<Color> {
        self.client.post("/colors", input).await
    }

    pub async fn update(&self, id: &str, input: &ColorInput) -> ApiResult<Color> {
        self.client.put(&format!("/colors/{}", id), input).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("/colors/{}", id)).await
    }
}

impl ApiClient {
    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi { client: self }
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi { client: self }
    }

    pub fn colors(&self) -> ColorsApi<'_> {
        ColorsApi { client: self }
    }
}
