//! # Stock Ledger
//!
//! Append-only log of inventory-affecting events, and the derived stock
//! levels and alerts computed from it.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Is Always Derived                              │
//! │                                                                         │
//! │  baseline(product)                                                      │
//! │      + Σ signed quantity of movements for that product                  │
//! │      ─────────────────────────────────────────────────                  │
//! │      = current stock                                                    │
//! │                                                                         │
//! │  signed quantity:  in = +qty    out = −qty    adjustment = qty as-is   │
//! │                                                                         │
//! │  The sum is commutative: movement ordering never changes the result.   │
//! │                                                                         │
//! │  Movements are NEVER deleted or mutated. The per-product level kept    │
//! │  here is only a cache, refreshed on every append; `replay` recomputes  │
//! │  from scratch and the two must always agree.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Alerts
//! Low/critical/out-of-stock are pure predicates recomputed on read, not
//! stored flags: `out` at zero, `critical` below half the reorder level,
//! `low` at or below the reorder level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation;

// =============================================================================
// Movement Types
// =============================================================================

/// The direction of a stock movement.
///
/// Direction is carried by the kind, not by the sign of the quantity -
/// except for adjustments, which are signed corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Goods received (purchase receipt, return refund, found stock).
    In,
    /// Goods issued (delivery, sale, damage write-off).
    Out,
    /// Signed correction after a physical count.
    Adjustment,
}

/// An immutable inventory fact.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    /// Positive for in/out (direction in `kind`); signed for adjustments.
    pub quantity: i64,
    /// Source document number or other traceable reference.
    pub reference: String,
    pub reason: Option<String>,
    /// Who recorded the movement.
    pub recorded_by: String,
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
}

impl StockMovement {
    /// The movement's effect on stock: `+qty` for in, `−qty` for out,
    /// `qty` as given for adjustments.
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            MovementKind::In => self.quantity,
            MovementKind::Out => -self.quantity,
            MovementKind::Adjustment => self.quantity,
        }
    }
}

/// Payload for recording a movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MovementDraft {
    pub product_id: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: i64,
    pub reference: String,
    pub reason: Option<String>,
}

impl MovementDraft {
    /// Validates the draft's quantity and reference for its kind.
    ///
    /// ## Rules
    /// - in/out: quantity strictly positive
    /// - adjustment: quantity non-zero (it carries its own sign)
    /// - reference must be present
    pub fn validate(&self) -> CoreResult<()> {
        match self.kind {
            MovementKind::In | MovementKind::Out => {
                validation::validate_quantity(self.quantity)?;
            }
            MovementKind::Adjustment => {
                validation::validate_adjustment_quantity(self.quantity)?;
            }
        }
        validation::validate_reference(&self.reference)?;
        Ok(())
    }
}

// =============================================================================
// Stock Conditions (derived alerts)
// =============================================================================

/// Derived stock alert level, recomputed on every read.
///
/// Ordering follows severity: `Out` sorts before `Critical` before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum StockCondition {
    /// Nothing on hand.
    Out,
    /// Below half the reorder level.
    Critical,
    /// At or below the reorder level.
    Low,
    Normal,
}

/// Classifies a stock level against a product's reorder level.
///
/// ## Example
/// ```rust
/// use atlas_core::ledger::{stock_condition, StockCondition};
///
/// assert_eq!(stock_condition(0, 10), StockCondition::Out);
/// assert_eq!(stock_condition(4, 10), StockCondition::Critical);
/// assert_eq!(stock_condition(10, 10), StockCondition::Low);
/// assert_eq!(stock_condition(11, 10), StockCondition::Normal);
/// ```
pub fn stock_condition(current: i64, reorder_level: i64) -> StockCondition {
    if current <= 0 {
        // negative on-hand can occur when the API allows overselling
        StockCondition::Out
    } else if 2 * current < reorder_level {
        StockCondition::Critical
    } else if current <= reorder_level {
        StockCondition::Low
    } else {
        StockCondition::Normal
    }
}

/// One row of the low-stock report.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub product_id: String,
    pub sku: String,
    pub current_stock: i64,
    pub reorder_level: i64,
    pub condition: StockCondition,
}

// =============================================================================
// Stock Ledger
// =============================================================================

/// The append-only movement log with derived per-product levels.
///
/// The `levels` map is a cache of the fold, refreshed on every append for
/// the affected product. [`StockLedger::replay`] recomputes from the raw
/// movements and must always agree with the cache.
#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    /// Opening stock per product id, before any recorded movement.
    baselines: HashMap<String, i64>,
    /// Every movement ever recorded, in arrival order. Append-only.
    movements: Vec<StockMovement>,
    /// Cached current level per product id.
    levels: HashMap<String, i64>,
}

impl StockLedger {
    pub fn new() -> Self {
        StockLedger::default()
    }

    /// Registers a product with its opening stock.
    ///
    /// Unknown products cannot receive movements; this is what makes a
    /// product known.
    pub fn register_product(&mut self, product_id: impl Into<String>, baseline: i64) {
        let product_id = product_id.into();
        let current = baseline
            + self
                .movements
                .iter()
                .filter(|m| m.product_id == product_id)
                .map(StockMovement::signed_quantity)
                .sum::<i64>();
        self.baselines.insert(product_id.clone(), baseline);
        self.levels.insert(product_id, current);
    }

    /// Seeds the ledger with previously fetched movements (history replay).
    pub fn load_movements(&mut self, movements: Vec<StockMovement>) {
        for movement in movements {
            if let Some(level) = self.levels.get_mut(&movement.product_id) {
                *level += movement.signed_quantity();
            }
            self.movements.push(movement);
        }
    }

    /// Whether a product is known to the ledger.
    pub fn knows(&self, product_id: &str) -> bool {
        self.baselines.contains_key(product_id)
    }

    /// Records a movement.
    ///
    /// ## Rules
    /// - quantity strictly positive for in/out, non-zero for adjustments
    /// - the product must be registered
    ///
    /// Returns the recorded (now immutable) movement.
    pub fn record(
        &mut self,
        draft: MovementDraft,
        recorded_by: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> CoreResult<&StockMovement> {
        draft.validate()?;

        if !self.knows(&draft.product_id) {
            return Err(CoreError::ProductNotFound(draft.product_id));
        }

        let movement = StockMovement {
            id: Uuid::new_v4().to_string(),
            product_id: draft.product_id,
            kind: draft.kind,
            quantity: draft.quantity,
            reference: draft.reference,
            reason: draft.reason,
            recorded_by: recorded_by.into(),
            recorded_at,
        };

        // cache refresh happens on the same append, never later
        *self.levels.entry(movement.product_id.clone()).or_insert(0) +=
            movement.signed_quantity();
        self.movements.push(movement);
        Ok(self.movements.last().expect("just pushed"))
    }

    /// Current stock for a product (cached fold). `None` if unknown.
    pub fn current_stock(&self, product_id: &str) -> Option<i64> {
        if !self.knows(product_id) {
            return None;
        }
        self.levels.get(product_id).copied()
    }

    /// Recomputes current stock from scratch: baseline + signed fold.
    ///
    /// Exists so callers (and tests) can verify the cache. The result is
    /// independent of movement ordering.
    pub fn replay(&self, product_id: &str) -> Option<i64> {
        let baseline = *self.baselines.get(product_id)?;
        Some(
            baseline
                + self
                    .movements
                    .iter()
                    .filter(|m| m.product_id == product_id)
                    .map(StockMovement::signed_quantity)
                    .sum::<i64>(),
        )
    }

    /// All movements for one product, in arrival order.
    pub fn movements_for<'a>(
        &'a self,
        product_id: &'a str,
    ) -> impl Iterator<Item = &'a StockMovement> {
        self.movements
            .iter()
            .filter(move |m| m.product_id == product_id)
    }

    /// Every recorded movement.
    pub fn movements(&self) -> &[StockMovement] {
        &self.movements
    }

    /// Stock condition for a product, `None` if unknown to the ledger.
    pub fn condition(&self, product: &Product) -> Option<StockCondition> {
        let current = self.current_stock(&product.id)?;
        Some(stock_condition(current, product.reorder_level))
    }

    /// Products currently at or below their reorder level, worst first.
    pub fn low_stock_report<'a>(
        &self,
        products: impl IntoIterator<Item = &'a Product>,
    ) -> Vec<StockAlert> {
        let mut alerts: Vec<StockAlert> = products
            .into_iter()
            .filter_map(|product| {
                let current = self.current_stock(&product.id)?;
                let condition = stock_condition(current, product.reorder_level);
                if condition == StockCondition::Normal {
                    return None;
                }
                Some(StockAlert {
                    product_id: product.id.clone(),
                    sku: product.sku.clone(),
                    current_stock: current,
                    reorder_level: product.reorder_level,
                    condition,
                })
            })
            .collect();

        alerts.sort_by_key(|a| (a.condition, a.current_stock));
        alerts
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(product_id: &str, kind: MovementKind, qty: i64) -> MovementDraft {
        MovementDraft {
            product_id: product_id.to_string(),
            kind,
            quantity: qty,
            reference: "TEST-REF".to_string(),
            reason: None,
        }
    }

    fn ledger_with(product_id: &str, baseline: i64) -> StockLedger {
        let mut ledger = StockLedger::new();
        ledger.register_product(product_id, baseline);
        ledger
    }

    #[test]
    fn test_fold_reference_scenario() {
        // baseline 50, in 20, out 5, adjustment −3 ⇒ 62
        let mut ledger = ledger_with("p-1", 50);
        let now = Utc::now();

        ledger.record(draft("p-1", MovementKind::In, 20), "amir", now).unwrap();
        ledger.record(draft("p-1", MovementKind::Out, 5), "amir", now).unwrap();
        ledger
            .record(draft("p-1", MovementKind::Adjustment, -3), "amir", now)
            .unwrap();

        assert_eq!(ledger.current_stock("p-1"), Some(62));
        assert_eq!(ledger.replay("p-1"), Some(62));
    }

    #[test]
    fn test_fold_is_order_independent() {
        let now = Utc::now();
        let drafts = [
            draft("p-1", MovementKind::In, 20),
            draft("p-1", MovementKind::Out, 5),
            draft("p-1", MovementKind::Adjustment, -3),
        ];

        // three different arrival orders, same result
        for order in [[0usize, 1, 2], [2, 0, 1], [1, 2, 0]] {
            let mut ledger = ledger_with("p-1", 50);
            for i in order {
                ledger.record(drafts[i].clone(), "amir", now).unwrap();
            }
            assert_eq!(ledger.current_stock("p-1"), Some(62));
        }
    }

    #[test]
    fn test_cache_agrees_with_replay() {
        let mut ledger = ledger_with("p-1", 10);
        ledger.register_product("p-2", 0);
        let now = Utc::now();

        for (kind, qty) in [
            (MovementKind::In, 7),
            (MovementKind::Out, 3),
            (MovementKind::Adjustment, -1),
            (MovementKind::In, 12),
        ] {
            ledger.record(draft("p-1", kind, qty), "amir", now).unwrap();
            assert_eq!(ledger.current_stock("p-1"), ledger.replay("p-1"));
        }
        // the untouched product is unaffected
        assert_eq!(ledger.current_stock("p-2"), Some(0));
    }

    #[test]
    fn test_record_validation() {
        let mut ledger = ledger_with("p-1", 0);
        let now = Utc::now();

        // zero/negative quantity for directional kinds
        assert!(ledger.record(draft("p-1", MovementKind::In, 0), "amir", now).is_err());
        assert!(ledger.record(draft("p-1", MovementKind::Out, -4), "amir", now).is_err());
        // zero adjustment
        assert!(ledger
            .record(draft("p-1", MovementKind::Adjustment, 0), "amir", now)
            .is_err());
        // negative adjustment is fine
        assert!(ledger
            .record(draft("p-1", MovementKind::Adjustment, -2), "amir", now)
            .is_ok());

        // unknown product
        let err = ledger
            .record(draft("p-404", MovementKind::In, 1), "amir", now)
            .unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));

        // missing reference
        let mut no_ref = draft("p-1", MovementKind::In, 1);
        no_ref.reference = " ".to_string();
        assert!(ledger.record(no_ref, "amir", now).is_err());
    }

    #[test]
    fn test_stock_conditions() {
        assert_eq!(stock_condition(0, 10), StockCondition::Out);
        assert_eq!(stock_condition(-2, 10), StockCondition::Out);
        assert_eq!(stock_condition(4, 10), StockCondition::Critical);
        assert_eq!(stock_condition(5, 10), StockCondition::Low); // exactly half is not critical
        assert_eq!(stock_condition(10, 10), StockCondition::Low);
        assert_eq!(stock_condition(11, 10), StockCondition::Normal);
        // odd reorder level: 2×current < reorder avoids integer-division loss
        assert_eq!(stock_condition(2, 5), StockCondition::Critical);
        assert_eq!(stock_condition(3, 5), StockCondition::Low);
    }

    fn test_product(id: &str, reorder_level: i64) -> crate::types::Product {
        use crate::money::Money;
        use crate::types::{Product, ProductType};

        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            product_type: ProductType::FinishedGood,
            category_id: None,
            price: Money::from_cents(1000),
            cost: Money::zero(),
            uom: "pcs".to_string(),
            reorder_level,
            color_ids: Vec::new(),
            has_lid: false,
            supplier_id: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_report_sorted_worst_first() {
        let p_out = test_product("p-out", 10);
        let p_low = test_product("p-low", 10);
        let p_ok = test_product("p-ok", 10);

        let mut ledger = StockLedger::new();
        ledger.register_product("p-out", 0);
        ledger.register_product("p-low", 8);
        ledger.register_product("p-ok", 50);

        let report = ledger.low_stock_report([&p_low, &p_ok, &p_out]);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].product_id, "p-out");
        assert_eq!(report[0].condition, StockCondition::Out);
        assert_eq!(report[1].product_id, "p-low");
    }

    #[test]
    fn test_load_movements_updates_levels() {
        let mut ledger = ledger_with("p-1", 5);
        let now = Utc::now();
        ledger.load_movements(vec![StockMovement {
            id: "m-1".to_string(),
            product_id: "p-1".to_string(),
            kind: MovementKind::In,
            quantity: 4,
            reference: "PO-7".to_string(),
            reason: None,
            recorded_by: "amir".to_string(),
            recorded_at: now,
        }]);
        assert_eq!(ledger.current_stock("p-1"), Some(9));
    }
}
