//! # Commerce Documents
//!
//! The document types that flow through the order-to-cash pipeline, and the
//! status enums that drive their lifecycles.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Order-to-Cash Document Pipeline                            │
//! │                                                                         │
//! │  SalesOrder ──► DeliveryOrder ──► SalesInvoice ──► CustomerReceipt     │
//! │   (Draft →       (Pending →        (Draft →          (applies           │
//! │    Confirmed)     Approved →        Approved →         payment)         │
//! │                   Delivered)        Sent → Paid)          │             │
//! │                                        ▲                  │             │
//! │                                        └── SalesReturn ◄──┘             │
//! │                                            (reverses part)              │
//! │                                                                         │
//! │  PurchaseOrder ──► (received) ──► stock ledger "in" movements          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Modeling
//! Every document kind gets its own tagged enum - never a free-form string.
//! The external API is inconsistent about casing (`"pending"` vs
//! `"Pending"`), so each variant also accepts the other casings via serde
//! aliases. Transition rules live in the `lifecycle` module.
//!
//! ## Snapshot Pattern
//! Line items freeze the product data (sku, name, resolved unit price,
//! color) at the moment they are added. Children created from a parent
//! document copy lines **by value**: later edits to the parent never
//! retroactively affect already-created children.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Order Type
// =============================================================================

/// Commercial classification of a sales document.
///
/// `Tax` orders are restricted to privileged roles - see
/// [`crate::access::Role::can_use_tax_order_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderType {
    #[default]
    #[serde(alias = "general", alias = "GENERAL")]
    General,
    #[serde(alias = "tax", alias = "TAX")]
    Tax,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a customer receipt was tendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
    Check,
    BankTransfer,
}

// =============================================================================
// Status Enums (one per document kind)
// =============================================================================

/// Sales order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SalesOrderStatus {
    #[default]
    #[serde(alias = "draft", alias = "DRAFT")]
    Draft,
    #[serde(alias = "confirmed", alias = "CONFIRMED")]
    Confirmed,
    #[serde(alias = "processing", alias = "PROCESSING")]
    Processing,
    #[serde(alias = "completed", alias = "COMPLETED")]
    Completed,
    #[serde(alias = "cancelled", alias = "CANCELLED")]
    Cancelled,
}

impl SalesOrderStatus {
    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SalesOrderStatus::Completed | SalesOrderStatus::Cancelled)
    }
}

impl fmt::Display for SalesOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SalesOrderStatus::Draft => "Draft",
            SalesOrderStatus::Confirmed => "Confirmed",
            SalesOrderStatus::Processing => "Processing",
            SalesOrderStatus::Completed => "Completed",
            SalesOrderStatus::Cancelled => "Cancelled",
        })
    }
}

/// Delivery order lifecycle status. Strictly forward-moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DeliveryStatus {
    #[default]
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "approved", alias = "APPROVED")]
    Approved,
    #[serde(rename = "In Transit", alias = "in transit", alias = "in_transit", alias = "InTransit")]
    InTransit,
    #[serde(alias = "delivered", alias = "DELIVERED")]
    Delivered,
    #[serde(alias = "cancelled", alias = "CANCELLED")]
    Cancelled,
}

impl DeliveryStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Cancelled)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::Approved => "Approved",
            DeliveryStatus::InTransit => "In Transit",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Cancelled => "Cancelled",
        })
    }
}

/// Invoice lifecycle status.
///
/// `Overdue` is a DERIVED status: it is never stored, only computed by
/// [`crate::lifecycle`] when the due date has passed with an outstanding
/// balance. The API may still echo it back on reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InvoiceStatus {
    #[default]
    #[serde(alias = "draft", alias = "DRAFT")]
    Draft,
    #[serde(alias = "approved", alias = "APPROVED")]
    Approved,
    #[serde(alias = "sent", alias = "SENT")]
    Sent,
    #[serde(alias = "partial", alias = "PARTIAL")]
    Partial,
    #[serde(alias = "paid", alias = "PAID")]
    Paid,
    #[serde(alias = "overdue", alias = "OVERDUE")]
    Overdue,
    #[serde(alias = "cancelled", alias = "CANCELLED")]
    Cancelled,
}

impl InvoiceStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }

    /// Statuses in which a payment may be applied.
    pub fn accepts_payment(&self) -> bool {
        matches!(
            self,
            InvoiceStatus::Sent | InvoiceStatus::Partial | InvoiceStatus::Overdue
        )
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Approved => "Approved",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Partial => "Partial",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
        })
    }
}

/// Sales return lifecycle status. The API uses lowercase here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ReturnStatus {
    #[default]
    #[serde(alias = "Pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "Approved", alias = "APPROVED")]
    Approved,
    #[serde(alias = "Rejected", alias = "REJECTED")]
    Rejected,
    #[serde(alias = "Refunded", alias = "REFUNDED")]
    Refunded,
}

impl ReturnStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReturnStatus::Rejected | ReturnStatus::Refunded)
    }
}

impl fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReturnStatus::Pending => "pending",
            ReturnStatus::Approved => "approved",
            ReturnStatus::Rejected => "rejected",
            ReturnStatus::Refunded => "refunded",
        })
    }
}

/// Purchase order lifecycle status. The API uses lowercase here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    #[default]
    #[serde(alias = "Pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "Received", alias = "RECEIVED")]
    Received,
    #[serde(alias = "Cancelled", alias = "CANCELLED")]
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PurchaseOrderStatus::Pending)
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PurchaseOrderStatus::Pending => "pending",
            PurchaseOrderStatus::Received => "received",
            PurchaseOrderStatus::Cancelled => "cancelled",
        })
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// One product entry within a sales-side document.
///
/// Uses the snapshot pattern: sku, name, and unit price are frozen at the
/// moment the line is built by the pricing resolver. `tax` and `line_total`
/// are computed there too and stored on the line - never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Client-side line identifier (UUID v4). Unlike entity ids this one
    /// is generated locally: it only has to be unique within the document.
    pub line_id: String,

    pub product_id: String,

    /// SKU at the time the line was added (frozen).
    pub sku: String,

    /// Product name at the time the line was added (frozen).
    pub name: String,

    /// Variant color, when the product has a color dimension.
    pub color_id: Option<String>,

    /// Quantity ordered. Invariant: > 0.
    pub quantity: i64,

    /// Resolved unit price at the time the line was added (frozen).
    #[ts(as = "String")]
    pub unit_price: Money,

    /// Absolute discount applied to this line.
    #[ts(as = "String")]
    pub discount: Money,

    /// Tax computed on (line subtotal − discount).
    #[ts(as = "String")]
    pub tax: Money,

    /// line subtotal − discount + tax.
    #[ts(as = "String")]
    pub line_total: Money,
}

impl LineItem {
    /// Quantity × unit price, before discount and tax.
    #[inline]
    pub fn line_subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// One returned product entry within a sales return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnLine {
    pub product_id: String,
    pub sku: String,
    /// Quantity returned. Invariant: > 0 and ≤ the invoiced quantity.
    pub quantity: i64,
    /// Unit price as invoiced (frozen).
    #[ts(as = "String")]
    pub unit_price: Money,
}

/// One product entry within a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    pub product_id: String,
    pub sku: String,
    /// Quantity ordered from the supplier. Invariant: > 0.
    pub quantity: i64,
    /// Agreed unit cost (frozen).
    #[ts(as = "String")]
    pub unit_cost: Money,
}

impl PurchaseLine {
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_cost.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Documents
// =============================================================================

/// A sales order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: String,
    /// Server-assigned document number (e.g., "SO-000123"). The client
    /// never invents one.
    pub number: String,
    /// Immutable after creation.
    pub customer_id: String,
    pub order_type: OrderType,
    pub status: SalesOrderStatus,
    pub items: Vec<LineItem>,
    #[ts(as = "String")]
    pub subtotal: Money,
    #[ts(as = "String")]
    pub discount: Money,
    #[ts(as = "String")]
    pub tax: Money,
    #[ts(as = "String")]
    pub total: Money,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A delivery order, either derived from a sales order or entered directly.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOrder {
    pub id: String,
    pub number: String,
    /// Present when derived from a sales order; `None` for direct delivery.
    pub sales_order_id: Option<String>,
    pub customer_id: String,
    /// Inherited from the source sales order when there is one.
    pub order_type: OrderType,
    pub status: DeliveryStatus,
    pub items: Vec<LineItem>,
    #[ts(as = "Option<String>")]
    pub delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A sales invoice.
///
/// ## Invariant
/// `amount_paid + amount_due == total` at all times, with `amount_paid`
/// monotonically non-decreasing via receipts.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesInvoice {
    pub id: String,
    pub number: String,
    /// Present when derived from a delivery order.
    pub delivery_order_id: Option<String>,
    pub customer_id: String,
    pub order_type: OrderType,
    pub status: InvoiceStatus,
    pub items: Vec<LineItem>,
    #[ts(as = "String")]
    pub subtotal: Money,
    #[ts(as = "String")]
    pub discount: Money,
    #[ts(as = "String")]
    pub tax: Money,
    #[ts(as = "String")]
    pub total: Money,
    #[ts(as = "String")]
    pub amount_paid: Money,
    #[ts(as = "String")]
    pub amount_due: Money,
    #[ts(as = "Option<String>")]
    pub due_date: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A customer receipt (payment).
///
/// Linked to one invoice, or unlinked ("payment on account") in which case
/// it reduces the customer balance directly.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReceipt {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    pub invoice_id: Option<String>,
    /// Invariant: > 0.
    #[ts(as = "String")]
    pub amount: Money,
    pub method: PaymentMethod,
    /// External reference (check number, transfer id, ...).
    pub reference: Option<String>,
    #[ts(as = "String")]
    pub received_at: DateTime<Utc>,
}

/// A sales return against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReturn {
    pub id: String,
    pub number: String,
    pub invoice_id: String,
    pub customer_id: String,
    pub items: Vec<ReturnLine>,
    /// Invariant: ≤ the referenced invoice's total.
    #[ts(as = "String")]
    pub refund_amount: Money,
    pub reason: Option<String>,
    pub status: ReturnStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A purchase order to a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,
    pub number: String,
    pub supplier_id: String,
    pub status: PurchaseOrderStatus,
    pub items: Vec<PurchaseLine>,
    #[ts(as = "Option<String>")]
    pub expected_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    /// Σ quantity × unit cost over all lines.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }
}

// =============================================================================
// Draft Types (authoring payloads)
// =============================================================================
// Drafts deliberately carry NO id and NO document number: numbering is
// server-owned, and a client-invented number could collide.

/// Payload for creating a sales order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderDraft {
    pub customer_id: String,
    pub order_type: OrderType,
    pub items: Vec<LineItem>,
    pub notes: Option<String>,
}

/// Payload for creating a delivery order (derived or direct).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOrderDraft {
    pub sales_order_id: Option<String>,
    pub customer_id: String,
    pub order_type: OrderType,
    pub items: Vec<LineItem>,
    pub notes: Option<String>,
}

/// Payload for creating an invoice (derived or standalone).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesInvoiceDraft {
    pub delivery_order_id: Option<String>,
    pub customer_id: String,
    pub order_type: OrderType,
    pub items: Vec<LineItem>,
    #[ts(as = "Option<String>")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Payload for recording a customer receipt.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDraft {
    pub customer_id: String,
    /// `None` = payment on account.
    pub invoice_id: Option<String>,
    #[ts(as = "String")]
    pub amount: Money,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

/// Payload for opening a sales return.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReturnDraft {
    pub invoice_id: String,
    pub customer_id: String,
    pub items: Vec<ReturnLine>,
    #[ts(as = "String")]
    pub refund_amount: Money,
    pub reason: Option<String>,
}

/// Payload for creating a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDraft {
    pub supplier_id: String,
    pub items: Vec<PurchaseLine>,
    #[ts(as = "Option<String>")]
    pub expected_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
