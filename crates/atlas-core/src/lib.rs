//! # atlas-core: Pure Business Logic for Atlas ERP
//!
//! This crate is the **heart** of the Atlas ERP admin console. It contains
//! the commerce workflow rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atlas ERP Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Browser Console (TypeScript)                    │   │
//! │  │   Catalog ──► Orders ──► Deliveries ──► Invoices ──► Payments  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    atlas-client                                 │   │
//! │  │    session, typed resources, per-entity response cache          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atlas-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │ lifecycle │  │  ledger   │  │  access   │  │   │
//! │  │   │ unit price│  │ Draft ──► │  │ movements │  │ role ──►  │  │   │
//! │  │   │ tax/totals│  │ Confirmed │  │ stock fold│  │ policy    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Master data (Product, Customer, Supplier, Color, ...)
//! - [`document`] - Commerce documents and their status enums
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Unit-price resolution and total computation
//! - [`lifecycle`] - Allowed status transitions and cross-document derivation
//! - [`ledger`] - Append-only stock movement log and derived stock levels
//! - [`access`] - Role-based operation gating
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and wall-clock access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Server Is the Authority**: this crate validates and derives; the
//!    external API owns persistence, numbering, and final say on every total
//!
//! ## Example Usage
//!
//! ```rust
//! use atlas_core::money::Money;
//! use atlas_core::pricing;
//! use atlas_core::STANDARD_TAX_RATE;
//!
//! // Price a line: qty 3 at $90.00 with a $10.00 discount
//! let amounts = pricing::price_line(
//!     3,
//!     Money::from_cents(9000),
//!     Money::from_cents(1000),
//!     STANDARD_TAX_RATE,
//! ).unwrap();
//!
//! assert_eq!(amounts.line_subtotal.cents(), 27000); // $270.00
//! assert_eq!(amounts.tax.cents(), 2600);            // ($270 - $10) × 10%
//! assert_eq!(amounts.total.cents(), 28600);         // $286.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod document;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use atlas_core::Money` instead of
// `use atlas_core::money::Money`

pub use access::Role;
pub use document::*;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{MovementDraft, MovementKind, StockCondition, StockLedger, StockMovement};
pub use lifecycle::RefundCascade;
pub use money::{Money, TaxRate};
pub use pricing::DocumentTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The uniform tax rate applied to every taxable line: 10% (1000 bps).
///
/// ## Known Limitation
/// Tax is a single policy constant, not a per-product or per-region rate.
/// Documents of `OrderType::General` still carry tax at this rate; the rate
/// itself is what would become configurable in a future version.
pub const STANDARD_TAX_RATE: TaxRate = TaxRate::from_bps(1000);

/// Maximum line items allowed on a single document.
///
/// ## Business Reason
/// Prevents runaway documents and keeps payloads reasonable for the API.
pub const MAX_DOCUMENT_LINES: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100000 instead of 100).
pub const MAX_LINE_QUANTITY: i64 = 9_999;
