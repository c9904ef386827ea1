//! # Master Data Types
//!
//! Canonical in-memory representations of the catalog and partner entities.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Master Data                                     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │    Supplier     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (server)    │   │  id (server)    │   │  id (server)    │       │
//! │  │  sku (business) │   │  credit_limit   │   │  contact        │       │
//! │  │  price, cost    │   │  balance        │   └─────────────────┘       │
//! │  │  reorder_level  │   │  price overrides│                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Product stock is NOT a field here: it is derived from the stock       │
//! │  ledger (see the ledger module). Products only carry reorder_level.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Every entity is owned by the external system of record. This crate caches
//! and recomputes derived fields for display and validation; it is never the
//! sole source of truth for monetary totals.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// Classification of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Sellable item that appears on sales documents.
    FinishedGood,
    /// Input material that appears on purchase orders.
    RawMaterial,
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the server.
    pub id: String,

    /// Stock Keeping Unit - business identifier, unique.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Finished good or raw material.
    #[serde(rename = "type")]
    pub product_type: ProductType,

    /// Category reference.
    pub category_id: Option<String>,

    /// Standard unit price. Invariant: never negative.
    #[ts(as = "String")]
    pub price: Money,

    /// Unit cost (for margin reporting). Invariant: never negative.
    #[ts(as = "String")]
    pub cost: Money,

    /// Unit of measure (e.g., "pcs", "kg").
    pub uom: String,

    /// Stock level at or below which the product is flagged low.
    pub reorder_level: i64,

    /// Available variant colors, by Color id.
    #[serde(default)]
    pub color_ids: Vec<String>,

    /// Whether fulfilment must include a lid for this product.
    /// Surfaced as a cross-cutting note, not a separate inventory item.
    #[serde(rename = "isHaveLid", default)]
    pub has_lid: bool,

    /// Preferred supplier reference.
    pub supplier_id: Option<String>,

    /// Whether the product is active (soft delete).
    pub active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product may appear on newly authored documents.
    #[inline]
    pub fn selectable(&self) -> bool {
        self.active
    }

    /// Whether a color id is valid for this product.
    ///
    /// Products without a color dimension accept no color at all.
    pub fn allows_color(&self, color_id: &str) -> bool {
        self.color_ids.iter().any(|c| c == color_id)
    }
}

// =============================================================================
// Color & Category
// =============================================================================

/// A product variant color.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: String,
    pub name: String,
    /// Hex code for swatch display (e.g., "#1d4ed8").
    pub code: Option<String>,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier of raw materials or finished goods.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub active: bool,
}

// =============================================================================
// Customer
// =============================================================================

/// Customer account status.
///
/// Inactive customers are excluded from new-document pickers but keep
/// their history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[serde(alias = "Active", alias = "ACTIVE")]
    Active,
    #[serde(alias = "Inactive", alias = "INACTIVE")]
    Inactive,
}

/// A customer account.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,

    /// Maximum outstanding exposure permitted. Invariant: never negative.
    #[ts(as = "String")]
    pub credit_limit: Money,

    /// Sum of unpaid invoice amounts. A credit (negative) balance is
    /// conceptually allowed but not produced by normal flows.
    #[ts(as = "String")]
    pub balance: Money,

    pub status: CustomerStatus,

    /// Sparse productId → override unit price mapping.
    /// Absent key = use the product's standard price.
    #[serde(default)]
    #[ts(as = "HashMap<String, String>")]
    pub customer_prices: HashMap<String, Money>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Whether the customer may appear in new-document pickers.
    #[inline]
    pub fn selectable(&self) -> bool {
        self.status == CustomerStatus::Active
    }

    /// Returns the override unit price for a product, if one is configured.
    #[inline]
    pub fn price_override(&self, product_id: &str) -> Option<Money> {
        self.customer_prices.get(product_id).copied()
    }

    /// Whether adding `additional` exposure would exceed the credit limit.
    ///
    /// A zero credit limit means "no limit configured" and never trips.
    /// This drives a client-side warning; the server makes the final call.
    pub fn would_exceed_credit(&self, additional: Money) -> bool {
        if self.credit_limit.is_zero() {
            return false;
        }
        self.balance + additional > self.credit_limit
    }
}

// =============================================================================
// User Account
// =============================================================================

/// A console user, as returned by the user administration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    /// Raw role name as administered on the server.
    /// Parse with [`crate::access::Role::from_name`] before policy checks.
    pub role: String,
    pub active: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            product_type: ProductType::FinishedGood,
            category_id: None,
            price: Money::from_cents(price_cents),
            cost: Money::from_cents(price_cents / 2),
            uom: "pcs".to_string(),
            reorder_level: 10,
            color_ids: Vec::new(),
            has_lid: false,
            supplier_id: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_customer(id: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: format!("Customer {}", id),
            email: None,
            phone: None,
            address: None,
            credit_limit: Money::zero(),
            balance: Money::zero(),
            status: CustomerStatus::Active,
            customer_prices: HashMap::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_customer_status_casing() {
        let s: CustomerStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(s, CustomerStatus::Inactive);
        let s: CustomerStatus = serde_json::from_str("\"Inactive\"").unwrap();
        assert_eq!(s, CustomerStatus::Inactive);
    }

    #[test]
    fn test_inactive_customer_not_selectable() {
        let mut customer = test_customer("c-1");
        assert!(customer.selectable());
        customer.status = CustomerStatus::Inactive;
        assert!(!customer.selectable());
    }

    #[test]
    fn test_credit_exposure() {
        let mut customer = test_customer("c-1");
        customer.balance = Money::from_cents(80_00);

        // no limit configured: never trips
        assert!(!customer.would_exceed_credit(Money::from_cents(1_000_00)));

        customer.credit_limit = Money::from_cents(100_00);
        assert!(!customer.would_exceed_credit(Money::from_cents(20_00)));
        assert!(customer.would_exceed_credit(Money::from_cents(20_01)));
    }

    #[test]
    fn test_product_lenient_price_decode() {
        // money comes off the wire as string or number; garbage decodes to 0
        let json = serde_json::json!({
            "id": "p-1",
            "sku": "JAR-1L",
            "name": "Jar 1L",
            "type": "finished_good",
            "categoryId": null,
            "description": null,
            "price": "12.50",
            "cost": "oops",
            "uom": "pcs",
            "reorderLevel": 5,
            "isHaveLid": true,
            "supplierId": null,
            "active": true,
            "createdAt": "2024-03-01T00:00:00Z",
            "updatedAt": "2024-03-01T00:00:00Z"
        });
        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.price, Money::from_cents(1250));
        assert_eq!(product.cost, Money::zero());
        assert!(product.has_lid);
    }

    #[test]
    fn test_color_gating() {
        let mut product = test_product("p-1", 1000);
        assert!(!product.allows_color("col-red"));
        product.color_ids.push("col-red".to_string());
        assert!(product.allows_color("col-red"));
        assert!(!product.allows_color("col-blue"));
    }
}
