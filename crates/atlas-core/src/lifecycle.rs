//! # Document Lifecycle Engine
//!
//! Enforces the allowed status transitions and the cross-document
//! derivation rules of the order-to-cash pipeline.
//!
//! ## Transition Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SalesOrder     Draft ──► Confirmed ──► Processing ──► Completed       │
//! │                   │(edit)                                               │
//! │                   └──────────── any non-terminal ──► Cancelled          │
//! │                   delete: Draft only                                    │
//! │                                                                         │
//! │  DeliveryOrder  Pending ──► Approved ──► In Transit ──► Delivered      │
//! │                   └──────────── any non-terminal ──► Cancelled          │
//! │                   delete: Pending only                                  │
//! │                                                                         │
//! │  SalesInvoice   Draft ──► Approved ──► Sent ──► Partial ──► Paid       │
//! │                   Overdue is DERIVED (due date passed, balance > 0)     │
//! │                   cancel: unpaid only                                   │
//! │                                                                         │
//! │  SalesReturn    pending ──► approved ──► refunded                      │
//! │                   pending ──► rejected                                  │
//! │                                                                         │
//! │  PurchaseOrder  pending ──► received | cancelled                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Anything not in the tables is rejected with
//! [`CoreError::InvalidTransition`], leaving the document untouched -
//! never silently ignored.
//!
//! ## Derivation Is Copy, Not Reference
//! A child document (delivery from order, invoice from delivery) copies the
//! parent's line items by value at creation time, with fresh line ids.
//! Later edits to the parent never retroactively affect existing children.
//!
//! ## Side Effects Are Values
//! This crate performs no I/O, so transitions that *cause* further writes
//! (a refund reversing an invoice, a purchase receipt stocking up) return
//! explicit effect values ([`RefundCascade`], movement drafts) that the
//! caller applies through the API. An effect returned here is required
//! behavior, not a suggestion.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::access::Role;
use crate::document::*;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::ledger::{MovementDraft, MovementKind};
use crate::money::Money;
use crate::pricing::{self, DocumentTotals};
use crate::types::Customer;
use crate::validation;
use crate::STANDARD_TAX_RATE;

// =============================================================================
// Helpers
// =============================================================================

/// Copies line items by value for a child document, issuing fresh line ids.
fn copy_items(items: &[LineItem]) -> Vec<LineItem> {
    items
        .iter()
        .map(|item| LineItem {
            line_id: Uuid::new_v4().to_string(),
            ..item.clone()
        })
        .collect()
}

fn require_items(document: &'static str, items: &[LineItem]) -> CoreResult<()> {
    if items.is_empty() {
        return Err(CoreError::EmptyDocument { document });
    }
    validation::validate_line_count(items.len().saturating_sub(1))?;
    Ok(())
}

// =============================================================================
// Sales Order
// =============================================================================

impl SalesOrderDraft {
    /// Starts a new draft for a customer.
    ///
    /// The order type is filtered through the access policy: a role without
    /// tax privileges always gets `General`, regardless of what was asked.
    pub fn new(customer: &Customer, requested_type: OrderType, role: Role) -> CoreResult<Self> {
        if !customer.selectable() {
            return Err(CoreError::stale("Customer", customer.id.clone()));
        }

        Ok(SalesOrderDraft {
            customer_id: customer.id.clone(),
            order_type: role.effective_order_type(requested_type),
            items: Vec::new(),
            notes: None,
        })
    }

    /// Aggregate totals over the draft's current lines.
    pub fn totals(&self) -> DocumentTotals {
        pricing::document_totals(&self.items)
    }

    /// Validates the draft is submittable.
    pub fn validate(&self) -> CoreResult<()> {
        require_items("SalesOrder", &self.items)
    }
}

impl SalesOrder {
    /// Whether the order may still be edited.
    pub fn editable(&self) -> bool {
        self.status == SalesOrderStatus::Draft
    }

    /// Replaces the line items. Permitted only while Draft.
    ///
    /// Totals are recomputed from the new lines; they are never edited
    /// independently.
    pub fn set_items(&mut self, items: Vec<LineItem>) -> CoreResult<()> {
        if !self.editable() {
            return Err(CoreError::invalid_transition(
                "SalesOrder",
                self.status,
                "edit items",
            ));
        }
        require_items("SalesOrder", &items)?;

        let totals = pricing::document_totals(&items);
        self.items = items;
        self.subtotal = totals.subtotal;
        self.discount = totals.discount;
        self.tax = totals.tax;
        self.total = totals.total;
        Ok(())
    }

    /// Draft → Confirmed. Locks the item snapshot.
    pub fn approve(&mut self) -> CoreResult<()> {
        if self.status != SalesOrderStatus::Draft {
            return Err(CoreError::invalid_transition(
                "SalesOrder",
                self.status,
                "approve",
            ));
        }
        require_items("SalesOrder", &self.items)?;
        self.status = SalesOrderStatus::Confirmed;
        Ok(())
    }

    /// Confirmed → Processing (external fulfillment signal).
    pub fn start_processing(&mut self) -> CoreResult<()> {
        if self.status != SalesOrderStatus::Confirmed {
            return Err(CoreError::invalid_transition(
                "SalesOrder",
                self.status,
                "start processing",
            ));
        }
        self.status = SalesOrderStatus::Processing;
        Ok(())
    }

    /// Processing → Completed.
    pub fn complete(&mut self) -> CoreResult<()> {
        if self.status != SalesOrderStatus::Processing {
            return Err(CoreError::invalid_transition(
                "SalesOrder",
                self.status,
                "complete",
            ));
        }
        self.status = SalesOrderStatus::Completed;
        Ok(())
    }

    /// Any non-terminal status → Cancelled.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.status.is_terminal() {
            return Err(CoreError::invalid_transition(
                "SalesOrder",
                self.status,
                "cancel",
            ));
        }
        self.status = SalesOrderStatus::Cancelled;
        Ok(())
    }

    /// Only Draft orders may be deleted.
    pub fn ensure_deletable(&self) -> CoreResult<()> {
        if self.status != SalesOrderStatus::Draft {
            return Err(CoreError::invalid_transition(
                "SalesOrder",
                self.status,
                "delete",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Delivery Order
// =============================================================================

impl DeliveryOrderDraft {
    /// Derives a delivery from a Confirmed sales order.
    ///
    /// Items and order type are copied by value at this moment; the new
    /// delivery will not follow any later change to the order.
    pub fn from_sales_order(order: &SalesOrder) -> CoreResult<Self> {
        if order.status != SalesOrderStatus::Confirmed {
            return Err(CoreError::invalid_transition(
                "SalesOrder",
                order.status,
                "derive a delivery order",
            ));
        }

        Ok(DeliveryOrderDraft {
            sales_order_id: Some(order.id.clone()),
            customer_id: order.customer_id.clone(),
            order_type: order.order_type,
            items: copy_items(&order.items),
            notes: None,
        })
    }

    /// Starts a direct delivery (no source sales order), items entered
    /// manually.
    pub fn direct(
        customer: &Customer,
        requested_type: OrderType,
        role: Role,
        items: Vec<LineItem>,
    ) -> CoreResult<Self> {
        if !customer.selectable() {
            return Err(CoreError::stale("Customer", customer.id.clone()));
        }
        require_items("DeliveryOrder", &items)?;

        Ok(DeliveryOrderDraft {
            sales_order_id: None,
            customer_id: customer.id.clone(),
            order_type: role.effective_order_type(requested_type),
            items,
            notes: None,
        })
    }

    pub fn totals(&self) -> DocumentTotals {
        pricing::document_totals(&self.items)
    }
}

impl DeliveryOrder {
    /// Pending → Approved.
    pub fn approve(&mut self) -> CoreResult<()> {
        if self.status != DeliveryStatus::Pending {
            return Err(CoreError::invalid_transition(
                "DeliveryOrder",
                self.status,
                "approve",
            ));
        }
        self.status = DeliveryStatus::Approved;
        Ok(())
    }

    /// Approved → In Transit.
    pub fn start_transit(&mut self) -> CoreResult<()> {
        if self.status != DeliveryStatus::Approved {
            return Err(CoreError::invalid_transition(
                "DeliveryOrder",
                self.status,
                "start transit",
            ));
        }
        self.status = DeliveryStatus::InTransit;
        Ok(())
    }

    /// In Transit → Delivered.
    pub fn mark_delivered(&mut self, delivered_at: DateTime<Utc>) -> CoreResult<()> {
        if self.status != DeliveryStatus::InTransit {
            return Err(CoreError::invalid_transition(
                "DeliveryOrder",
                self.status,
                "mark delivered",
            ));
        }
        self.status = DeliveryStatus::Delivered;
        self.delivery_date = Some(delivered_at);
        Ok(())
    }

    /// Any non-terminal status → Cancelled.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.status.is_terminal() {
            return Err(CoreError::invalid_transition(
                "DeliveryOrder",
                self.status,
                "cancel",
            ));
        }
        self.status = DeliveryStatus::Cancelled;
        Ok(())
    }

    /// Only Pending deliveries may be deleted.
    pub fn ensure_deletable(&self) -> CoreResult<()> {
        if self.status != DeliveryStatus::Pending {
            return Err(CoreError::invalid_transition(
                "DeliveryOrder",
                self.status,
                "delete",
            ));
        }
        Ok(())
    }

    /// Whether an invoice may be derived from this delivery.
    pub fn invoiceable(&self) -> bool {
        matches!(
            self.status,
            DeliveryStatus::Approved | DeliveryStatus::InTransit | DeliveryStatus::Delivered
        )
    }
}

// =============================================================================
// Sales Invoice
// =============================================================================

impl SalesInvoiceDraft {
    /// Derives an invoice from an Approved / In Transit / Delivered
    /// delivery order, copying items and recomputing tax at the standard
    /// rate.
    pub fn from_delivery(
        delivery: &DeliveryOrder,
        due_date: Option<DateTime<Utc>>,
    ) -> CoreResult<Self> {
        if !delivery.invoiceable() {
            return Err(CoreError::invalid_transition(
                "DeliveryOrder",
                delivery.status,
                "derive an invoice",
            ));
        }

        let mut items = copy_items(&delivery.items);
        for item in &mut items {
            let amounts = pricing::price_line(
                item.quantity,
                item.unit_price,
                item.discount,
                STANDARD_TAX_RATE,
            )?;
            item.tax = amounts.tax;
            item.line_total = amounts.total;
        }

        Ok(SalesInvoiceDraft {
            delivery_order_id: Some(delivery.id.clone()),
            customer_id: delivery.customer_id.clone(),
            order_type: delivery.order_type,
            items,
            due_date,
        })
    }

    /// Starts a standalone invoice, items entered manually.
    pub fn standalone(
        customer: &Customer,
        requested_type: OrderType,
        role: Role,
        items: Vec<LineItem>,
        due_date: Option<DateTime<Utc>>,
    ) -> CoreResult<Self> {
        if !customer.selectable() {
            return Err(CoreError::stale("Customer", customer.id.clone()));
        }
        require_items("SalesInvoice", &items)?;

        Ok(SalesInvoiceDraft {
            delivery_order_id: None,
            customer_id: customer.id.clone(),
            order_type: role.effective_order_type(requested_type),
            items,
            due_date,
        })
    }

    pub fn totals(&self) -> DocumentTotals {
        pricing::document_totals(&self.items)
    }
}

impl SalesInvoice {
    /// Draft → Approved. Locks the financials.
    pub fn approve(&mut self) -> CoreResult<()> {
        if self.status != InvoiceStatus::Draft {
            return Err(CoreError::invalid_transition(
                "SalesInvoice",
                self.status,
                "approve",
            ));
        }
        require_items("SalesInvoice", &self.items)?;
        self.status = InvoiceStatus::Approved;
        Ok(())
    }

    /// Approved → Sent.
    pub fn send(&mut self) -> CoreResult<()> {
        if self.status != InvoiceStatus::Approved {
            return Err(CoreError::invalid_transition(
                "SalesInvoice",
                self.status,
                "send",
            ));
        }
        self.status = InvoiceStatus::Sent;
        Ok(())
    }

    /// Applies a payment, maintaining `amount_paid + amount_due == total`.
    ///
    /// ## Rules
    /// - amount must be strictly positive
    /// - the invoice must be Sent, Partial, or Overdue
    /// - overpayment is rejected; `amount_paid` only ever grows
    ///
    /// Status recomputes to Paid when the balance reaches zero, Partial
    /// otherwise.
    pub fn apply_payment(&mut self, amount: Money) -> CoreResult<()> {
        validation::validate_payment_amount(amount)?;

        if !self.status.accepts_payment() {
            return Err(CoreError::invalid_transition(
                "SalesInvoice",
                self.status,
                "apply a payment",
            ));
        }

        if amount > self.amount_due {
            return Err(CoreError::PaymentExceedsBalance {
                amount,
                amount_due: self.amount_due,
            });
        }

        self.amount_paid += amount;
        self.amount_due -= amount;
        self.status = if self.amount_due.is_zero() {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Partial
        };
        Ok(())
    }

    /// The status as it should be displayed *right now*.
    ///
    /// Overdue is derived, never stored: an issued invoice whose due date
    /// has passed with an outstanding balance reads as Overdue.
    pub fn effective_status(&self, now: DateTime<Utc>) -> InvoiceStatus {
        if self.status.accepts_payment() && self.amount_due.is_positive() {
            if let Some(due) = self.due_date {
                if due < now {
                    return InvoiceStatus::Overdue;
                }
            }
        }
        self.status
    }

    /// Cancels an invoice. Permitted only while nothing has been paid.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.status.is_terminal() || !self.amount_paid.is_zero() {
            return Err(CoreError::invalid_transition(
                "SalesInvoice",
                self.status,
                "cancel",
            ));
        }
        self.status = InvoiceStatus::Cancelled;
        self.amount_due = Money::zero();
        Ok(())
    }

    /// Reverses part of the invoice after a refunded return.
    ///
    /// Both `total` and `amount_paid` shrink by the refund, so
    /// `amount_paid + amount_due == total` keeps holding. The refund must
    /// not exceed what was actually paid.
    pub fn apply_refund(&mut self, refund: Money) -> CoreResult<()> {
        validation::validate_payment_amount(refund)?;

        if refund > self.amount_paid {
            return Err(CoreError::PaymentExceedsBalance {
                amount: refund,
                amount_due: self.amount_paid,
            });
        }

        self.amount_paid -= refund;
        self.total -= refund;
        Ok(())
    }

    /// Quantity of a product across all invoice lines.
    pub fn invoiced_quantity(&self, product_id: &str) -> i64 {
        self.items
            .iter()
            .filter(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .sum()
    }
}

// =============================================================================
// Customer Receipts
// =============================================================================

impl ReceiptDraft {
    /// A receipt applied against one invoice.
    pub fn for_invoice(
        invoice: &SalesInvoice,
        amount: Money,
        method: PaymentMethod,
    ) -> CoreResult<Self> {
        validation::validate_payment_amount(amount)?;

        if !invoice.status.accepts_payment() {
            return Err(CoreError::invalid_transition(
                "SalesInvoice",
                invoice.status,
                "apply a payment",
            ));
        }
        if amount > invoice.amount_due {
            return Err(CoreError::PaymentExceedsBalance {
                amount,
                amount_due: invoice.amount_due,
            });
        }

        Ok(ReceiptDraft {
            customer_id: invoice.customer_id.clone(),
            invoice_id: Some(invoice.id.clone()),
            amount,
            method,
            reference: None,
        })
    }

    /// A payment on account: no invoice link, reduces the customer balance
    /// directly.
    pub fn on_account(customer: &Customer, amount: Money, method: PaymentMethod) -> CoreResult<Self> {
        validation::validate_payment_amount(amount)?;

        Ok(ReceiptDraft {
            customer_id: customer.id.clone(),
            invoice_id: None,
            amount,
            method,
            reference: None,
        })
    }
}

impl Customer {
    /// Applies an on-account payment to the running balance.
    pub fn receive_on_account(&mut self, amount: Money) -> CoreResult<()> {
        validation::validate_payment_amount(amount)?;
        self.balance -= amount;
        Ok(())
    }
}

// =============================================================================
// Sales Return
// =============================================================================

/// The side effects a refunded return requires.
///
/// Produced by [`SalesReturn::refund`]; the caller must apply every field
/// through the API: reverse the invoice, credit the customer balance, and
/// append the reversing stock movements.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundCascade {
    pub invoice_id: String,
    pub customer_id: String,
    /// Amount to pay back to the customer.
    pub refund_amount: Money,
    /// Reversing "in" movements, one per returned line.
    pub movements: Vec<MovementDraft>,
}

impl SalesReturnDraft {
    /// Opens a return against a fulfilled invoice.
    ///
    /// ## Rules
    /// - the invoice must have been issued (Sent / Partial / Paid / Overdue)
    /// - every returned quantity must be positive and no more than the
    ///   invoiced quantity for that product
    /// - the refund must be positive and no more than the invoice total
    pub fn from_invoice(
        invoice: &SalesInvoice,
        items: Vec<ReturnLine>,
        refund_amount: Money,
        reason: Option<String>,
    ) -> CoreResult<Self> {
        if !matches!(
            invoice.status,
            InvoiceStatus::Sent
                | InvoiceStatus::Partial
                | InvoiceStatus::Paid
                | InvoiceStatus::Overdue
        ) {
            return Err(CoreError::invalid_transition(
                "SalesInvoice",
                invoice.status,
                "open a return",
            ));
        }

        if items.is_empty() {
            return Err(CoreError::EmptyDocument {
                document: "SalesReturn",
            });
        }

        for line in &items {
            validation::validate_quantity(line.quantity)?;

            let invoiced = invoice.invoiced_quantity(&line.product_id);
            if invoiced == 0 {
                return Err(CoreError::ProductNotFound(line.product_id.clone()));
            }
            if line.quantity > invoiced {
                return Err(CoreError::QuantityExceedsInvoiced {
                    product_id: line.product_id.clone(),
                    invoiced,
                    requested: line.quantity,
                });
            }
        }

        if !refund_amount.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "refund amount",
            }
            .into());
        }
        if refund_amount > invoice.total {
            return Err(CoreError::RefundExceedsInvoice {
                refund: refund_amount,
                invoice_total: invoice.total,
            });
        }

        Ok(SalesReturnDraft {
            invoice_id: invoice.id.clone(),
            customer_id: invoice.customer_id.clone(),
            items,
            refund_amount,
            reason,
        })
    }
}

impl SalesReturn {
    /// pending → approved.
    pub fn approve(&mut self) -> CoreResult<()> {
        if self.status != ReturnStatus::Pending {
            return Err(CoreError::invalid_transition(
                "SalesReturn",
                self.status,
                "approve",
            ));
        }
        self.status = ReturnStatus::Approved;
        Ok(())
    }

    /// pending → rejected (terminal).
    pub fn reject(&mut self) -> CoreResult<()> {
        if self.status != ReturnStatus::Pending {
            return Err(CoreError::invalid_transition(
                "SalesReturn",
                self.status,
                "reject",
            ));
        }
        self.status = ReturnStatus::Rejected;
        Ok(())
    }

    /// approved → refunded (terminal). Returns the required cascade.
    pub fn refund(&mut self) -> CoreResult<RefundCascade> {
        if self.status != ReturnStatus::Approved {
            return Err(CoreError::invalid_transition(
                "SalesReturn",
                self.status,
                "refund",
            ));
        }

        let movements = self
            .items
            .iter()
            .map(|line| MovementDraft {
                product_id: line.product_id.clone(),
                kind: MovementKind::In,
                quantity: line.quantity,
                reference: self.number.clone(),
                reason: Some(format!("Return {} refunded", self.number)),
            })
            .collect();

        self.status = ReturnStatus::Refunded;
        Ok(RefundCascade {
            invoice_id: self.invoice_id.clone(),
            customer_id: self.customer_id.clone(),
            refund_amount: self.refund_amount,
            movements,
        })
    }
}

// =============================================================================
// Purchase Order
// =============================================================================

impl PurchaseOrderDraft {
    pub fn new(supplier_id: impl Into<String>, items: Vec<PurchaseLine>) -> CoreResult<Self> {
        if items.is_empty() {
            return Err(CoreError::EmptyDocument {
                document: "PurchaseOrder",
            });
        }
        for line in &items {
            validation::validate_quantity(line.quantity)?;
            validation::validate_unit_price(line.unit_cost)?;
        }

        Ok(PurchaseOrderDraft {
            supplier_id: supplier_id.into(),
            items,
            expected_date: None,
            notes: None,
        })
    }
}

impl PurchaseOrder {
    /// pending → received. Returns the "in" movement for every line.
    pub fn receive(&mut self) -> CoreResult<Vec<MovementDraft>> {
        if self.status != PurchaseOrderStatus::Pending {
            return Err(CoreError::invalid_transition(
                "PurchaseOrder",
                self.status,
                "receive",
            ));
        }

        let movements = self
            .items
            .iter()
            .map(|line| MovementDraft {
                product_id: line.product_id.clone(),
                kind: MovementKind::In,
                quantity: line.quantity,
                reference: self.number.clone(),
                reason: Some(format!("Purchase order {} received", self.number)),
            })
            .collect();

        self.status = PurchaseOrderStatus::Received;
        Ok(movements)
    }

    /// pending → cancelled.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.status != PurchaseOrderStatus::Pending {
            return Err(CoreError::invalid_transition(
                "PurchaseOrder",
                self.status,
                "cancel",
            ));
        }
        self.status = PurchaseOrderStatus::Cancelled;
        Ok(())
    }

    /// Only pending purchase orders may be deleted.
    pub fn ensure_deletable(&self) -> CoreResult<()> {
        if self.status != PurchaseOrderStatus::Pending {
            return Err(CoreError::invalid_transition(
                "PurchaseOrder",
                self.status,
                "delete",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
