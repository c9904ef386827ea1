//! # Pricing Resolver
//!
//! The single place where unit prices are resolved and line/document totals
//! are computed. Every screen of the console delegates here; no call site
//! re-derives totals on its own.
//!
//! ## Resolution & Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pricing Data Flow                                  │
//! │                                                                         │
//! │  Customer.customer_prices[product.id] ──┐                              │
//! │                                         ├─► resolve_unit_price         │
//! │  Product.price ─────────────────────────┘        │                     │
//! │                                                   ▼                     │
//! │  quantity, discount ────────────────────► price_line                   │
//! │                                                   │                     │
//! │            line_subtotal = qty × unit             │                     │
//! │            tax  = (line_subtotal − discount) × 10%                     │
//! │            total = line_subtotal − discount + tax                      │
//! │                                                   ▼                     │
//! │  all lines ─────────────────────────────► document_totals              │
//! │                                                                         │
//! │  Resolution happens FRESH on every line add/edit - never cached        │
//! │  across customer changes.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::document::LineItem;
use crate::error::{CoreError, CoreResult};
use crate::money::{Money, TaxRate};
use crate::types::{Customer, Product};
use crate::validation;
use crate::STANDARD_TAX_RATE;

// =============================================================================
// Unit Price Resolution
// =============================================================================

/// Resolves the unit price for a (customer, product) pair.
///
/// The customer's override price wins when one is configured for the
/// product; otherwise the product's standard price applies. Pure function -
/// call it fresh on every line add/edit.
///
/// ## Example
/// ```rust
/// # use atlas_core::money::Money;
/// # use atlas_core::pricing::resolve_unit_price;
/// # use atlas_core::types::{Customer, CustomerStatus, Product, ProductType};
/// # use std::collections::HashMap;
/// # use chrono::Utc;
/// # let mut customer = Customer {
/// #     id: "c-1".into(), name: "C".into(), email: None, phone: None,
/// #     address: None, credit_limit: Money::zero(), balance: Money::zero(),
/// #     status: CustomerStatus::Active, customer_prices: HashMap::new(),
/// #     created_at: Utc::now(), updated_at: Utc::now(),
/// # };
/// # let product = Product {
/// #     id: "p-1".into(), sku: "P1".into(), name: "P".into(), description: None,
/// #     product_type: ProductType::FinishedGood, category_id: None,
/// #     price: Money::from_cents(10000), cost: Money::zero(), uom: "pcs".into(),
/// #     reorder_level: 0, color_ids: vec![], has_lid: false, supplier_id: None,
/// #     active: true, created_at: Utc::now(), updated_at: Utc::now(),
/// # };
/// assert_eq!(resolve_unit_price(&customer, &product), Money::from_cents(10000));
/// customer.customer_prices.insert("p-1".into(), Money::from_cents(9000));
/// assert_eq!(resolve_unit_price(&customer, &product), Money::from_cents(9000));
/// ```
pub fn resolve_unit_price(customer: &Customer, product: &Product) -> Money {
    customer
        .price_override(&product.id)
        .unwrap_or(product.price)
}

// =============================================================================
// Line Totals
// =============================================================================

/// Computed amounts for one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAmounts {
    /// quantity × unit price, before discount and tax.
    pub line_subtotal: Money,
    /// (line_subtotal − discount) × tax rate.
    pub tax: Money,
    /// line_subtotal − discount + tax.
    pub total: Money,
}

/// Prices one line.
///
/// ## Rules
/// - quantity must be strictly positive
/// - unit price must be non-negative
/// - discount must be non-negative and must not exceed the line subtotal
///   (a larger discount would yield negative tax)
///
/// Violations are rejected with a validation error - never silently clamped.
pub fn price_line(
    quantity: i64,
    unit_price: Money,
    discount: Money,
    rate: TaxRate,
) -> CoreResult<LineAmounts> {
    validation::validate_quantity(quantity)?;
    validation::validate_unit_price(unit_price)?;

    let line_subtotal = unit_price.multiply_quantity(quantity);
    validation::validate_discount(discount, line_subtotal)?;

    let tax = (line_subtotal - discount).calculate_tax(rate);
    let total = line_subtotal - discount + tax;

    Ok(LineAmounts {
        line_subtotal,
        tax,
        total,
    })
}

// =============================================================================
// Document Totals
// =============================================================================

/// Aggregate totals of a document.
///
/// Always derived from the line items, never hand-edited. Recompute on
/// every line change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    #[ts(as = "String")]
    pub subtotal: Money,
    #[ts(as = "String")]
    pub discount: Money,
    #[ts(as = "String")]
    pub tax: Money,
    #[ts(as = "String")]
    pub total: Money,
}

/// Computes document totals as a fold over the line items.
///
/// The empty set of lines yields all-zero totals.
///
/// ## Invariant
/// `total == subtotal − discount + tax` holds by construction.
pub fn document_totals(items: &[LineItem]) -> DocumentTotals {
    let mut totals = DocumentTotals::default();

    for item in items {
        totals.subtotal += item.line_subtotal();
        totals.discount += item.discount;
        totals.tax += item.tax;
    }

    totals.total = totals.subtotal - totals.discount + totals.tax;
    totals
}

// =============================================================================
// Line Item Construction
// =============================================================================

/// Builds a fully priced line item for a document being authored.
///
/// This is the one composition point every screen goes through: it
/// resolves the unit price (customer override first), prices the line at
/// the standard tax rate, and freezes the product snapshot.
///
/// ## Errors
/// - [`CoreError::StaleReference`] when the customer or product was
///   deactivated since the last fetch
/// - Validation errors for bad quantity/discount, or a color the product
///   doesn't offer
pub fn build_line_item(
    customer: &Customer,
    product: &Product,
    quantity: i64,
    discount: Money,
    color_id: Option<String>,
) -> CoreResult<LineItem> {
    if !customer.selectable() {
        return Err(CoreError::stale("Customer", customer.id.clone()));
    }
    if !product.selectable() {
        return Err(CoreError::stale("Product", product.id.clone()));
    }

    if let Some(ref color) = color_id {
        if !product.allows_color(color) {
            return Err(crate::error::ValidationError::NotAllowed {
                field: "color",
                value: color.clone(),
            }
            .into());
        }
    }

    let unit_price = resolve_unit_price(customer, product);
    let amounts = price_line(quantity, unit_price, discount, STANDARD_TAX_RATE)?;

    Ok(LineItem {
        line_id: Uuid::new_v4().to_string(),
        product_id: product.id.clone(),
        sku: product.sku.clone(),
        name: product.name.clone(),
        color_id,
        quantity,
        unit_price,
        discount,
        tax: amounts.tax,
        line_total: amounts.total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerStatus;
    use chrono::Utc;
    use std::collections::HashMap;

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            product_type: crate::types::ProductType::FinishedGood,
            category_id: None,
            price: Money::from_cents(price_cents),
            cost: Money::zero(),
            uom: "pcs".to_string(),
            reorder_level: 0,
            color_ids: Vec::new(),
            has_lid: false,
            supplier_id: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn customer(id: &str) -> Customer {
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
    fn test_override_price_wins_regardless_of_quantity() {
        let mut c = customer("c-1");
        let p = product("p-1", 10000); // standard $100.00
        c.customer_prices
            .insert("p-1".to_string(), Money::from_cents(9000));

        assert_eq!(resolve_unit_price(&c, &p), Money::from_cents(9000));

        // the override applies per unit, for every quantity
        for qty in [1, 3, 250] {
            let line = build_line_item(&c, &p, qty, Money::zero(), None).unwrap();
            assert_eq!(line.unit_price, Money::from_cents(9000));
            assert_eq!(line.line_subtotal(), Money::from_cents(9000 * qty));
        }
    }

    #[test]
    fn test_standard_price_when_no_override() {
        let c = customer("c-1");
        let p = product("p-1", 10000);
        assert_eq!(resolve_unit_price(&c, &p), Money::from_cents(10000));
    }

    #[test]
    fn test_reference_scenario_customer_price_line() {
        // Customer price 90, standard 100, qty 3, discount 10:
        // lineSubtotal = 270, tax = (270 − 10) × 10% = 26, total = 286
        let mut c = customer("c-1");
        let p = product("p-1", 10000);
        c.customer_prices
            .insert("p-1".to_string(), Money::from_cents(9000));

        let line = build_line_item(&c, &p, 3, Money::from_cents(1000), None).unwrap();
        assert_eq!(line.line_subtotal(), Money::from_cents(27000));
        assert_eq!(line.tax, Money::from_cents(2600));
        assert_eq!(line.line_total, Money::from_cents(28600));
    }

    #[test]
    fn test_price_line_rejects_bad_input() {
        let price = Money::from_cents(1000);

        assert!(price_line(0, price, Money::zero(), STANDARD_TAX_RATE).is_err());
        assert!(price_line(-2, price, Money::zero(), STANDARD_TAX_RATE).is_err());
        assert!(price_line(1, Money::from_cents(-1), Money::zero(), STANDARD_TAX_RATE).is_err());
        // discount > line subtotal would yield negative tax
        assert!(price_line(1, price, Money::from_cents(1001), STANDARD_TAX_RATE).is_err());
        // discount == subtotal is fine (tax 0, total 0)
        let amounts = price_line(1, price, Money::from_cents(1000), STANDARD_TAX_RATE).unwrap();
        assert_eq!(amounts.total, Money::zero());
    }

    #[test]
    fn test_document_totals_invariant() {
        let c = customer("c-1");
        let p1 = product("p-1", 9000);
        let p2 = product("p-2", 2500);

        let items = vec![
            build_line_item(&c, &p1, 3, Money::from_cents(1000), None).unwrap(),
            build_line_item(&c, &p2, 2, Money::zero(), None).unwrap(),
        ];

        let totals = document_totals(&items);
        assert_eq!(totals.subtotal, Money::from_cents(27000 + 5000));
        assert_eq!(totals.discount, Money::from_cents(1000));
        assert_eq!(totals.tax, Money::from_cents(2600 + 500));
        assert_eq!(
            totals.total,
            totals.subtotal - totals.discount + totals.tax
        );
    }

    #[test]
    fn test_document_totals_empty() {
        let totals = document_totals(&[]);
        assert_eq!(totals, DocumentTotals::default());
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_build_line_item_rejects_stale_references() {
        let mut c = customer("c-1");
        let mut p = product("p-1", 1000);

        c.status = CustomerStatus::Inactive;
        assert!(matches!(
            build_line_item(&c, &p, 1, Money::zero(), None),
            Err(CoreError::StaleReference { entity: "Customer", .. })
        ));

        c.status = CustomerStatus::Active;
        p.active = false;
        assert!(matches!(
            build_line_item(&c, &p, 1, Money::zero(), None),
            Err(CoreError::StaleReference { entity: "Product", .. })
        ));
    }

    #[test]
    fn test_build_line_item_rejects_unknown_color() {
        let c = customer("c-1");
        let mut p = product("p-1", 1000);
        p.color_ids.push("col-red".to_string());

        let ok = build_line_item(&c, &p, 1, Money::zero(), Some("col-red".to_string()));
        assert!(ok.is_ok());

        let bad = build_line_item(&c, &p, 1, Money::zero(), Some("col-blue".to_string()));
        assert!(matches!(bad, Err(CoreError::Validation(_))));
    }
}
