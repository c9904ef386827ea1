//! # Error Types
//!
//! Domain-specific error types for atlas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atlas-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule / lifecycle violations           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  atlas-client errors (separate crate)                                  │
//! │  └── ApiError         - Transport, auth, and server failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Console                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (document kind, status, id)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message naming the entity
//!    and operation that failed - never a generic "something went wrong"

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// A rejected operation never partially applies: every mutating method in
/// this crate checks its preconditions before touching any state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status transition outside the lifecycle table was attempted.
    ///
    /// ## When This Occurs
    /// - Editing a Confirmed sales order
    /// - Deleting an Approved delivery order
    /// - Refunding a return that was never approved
    #[error("{document} is {status}, cannot {action}")]
    InvalidTransition {
        document: &'static str,
        status: String,
        action: &'static str,
    },

    /// An operation referenced an entity that no longer exists or was
    /// deactivated since the last fetch.
    ///
    /// ## When This Occurs
    /// - Adding a line for a product deactivated by another user
    /// - Authoring a document for a customer marked inactive
    ///
    /// The caller should refresh its data and re-prompt.
    #[error("{entity} {id} no longer exists or was deactivated")]
    StaleReference { entity: &'static str, id: String },

    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A document was created or submitted with no line items.
    #[error("{document} must have at least one line item")]
    EmptyDocument { document: &'static str },

    /// A return line asked for more than the invoice ever carried.
    #[error("Cannot return {requested} of product {product_id}: only {invoiced} invoiced")]
    QuantityExceedsInvoiced {
        product_id: String,
        invoiced: i64,
        requested: i64,
    },

    /// The refund on a return exceeds the referenced invoice's total.
    #[error("Refund {refund} exceeds invoice total {invoice_total}")]
    RefundExceedsInvoice {
        refund: Money,
        invoice_total: Money,
    },

    /// A payment larger than the invoice's outstanding balance.
    #[error("Payment {amount} exceeds amount due {amount_due}")]
    PaymentExceedsBalance { amount: Money, amount_due: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidTransition error.
    ///
    /// ## Example
    /// ```rust
    /// use atlas_core::error::CoreError;
    ///
    /// let err = CoreError::invalid_transition("SalesOrder", "Confirmed", "edit items");
    /// assert_eq!(err.to_string(), "SalesOrder is Confirmed, cannot edit items");
    /// ```
    pub fn invalid_transition(
        document: &'static str,
        status: impl ToString,
        action: &'static str,
    ) -> Self {
        CoreError::InvalidTransition {
            document,
            status: status.to_string(),
            action,
        }
    }

    /// Creates a StaleReference error.
    pub fn stale(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::StaleReference {
            entity,
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any network call is attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Monetary value must not be negative.
    ///
    /// Negative quantities and prices are rejected outright, never
    /// silently clamped to zero.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: &'static str },

    /// Adjustments carry their own sign and therefore must be non-zero.
    #[error("{field} must be non-zero")]
    MustBeNonZero { field: &'static str },

    /// A discount larger than the line subtotal would yield negative tax.
    #[error("Discount {discount} exceeds line subtotal {subtotal}")]
    DiscountExceedsSubtotal { discount: Money, subtotal: Money },

    /// Invalid format (e.g., bad characters in a SKU).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value is not in the allowed set for this entity.
    #[error("{field} '{value}' is not allowed here")]
    NotAllowed { field: &'static str, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
