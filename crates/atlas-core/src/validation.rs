//! # Validation Module
//!
//! Input validation utilities for Atlas ERP.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser console (TypeScript)                                 │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any network call)                        │
//! │  ├── Range and sign checks                                             │
//! │  └── Business rule validation (discount vs subtotal, ...)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: External API (authoritative)                                 │
//! │  └── The server re-validates everything; a request that fails here    │
//! │      must never be sent at all                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::{MAX_DOCUMENT_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use atlas_core::validation::validate_sku;
///
/// assert!(validate_sku("JAR-1L").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required { field: "sku" });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku",
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku",
            reason: "must contain only letters, numbers, hyphens, and underscores",
        });
    }

    Ok(())
}

/// Validates an entity display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 200,
        });
    }

    Ok(())
}

/// Validates a movement reference string (document number, PO number, ...).
pub fn validate_reference(reference: &str) -> ValidationResult<()> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required { field: "reference" });
    }

    if reference.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "reference",
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (> 0) - direction never hides in the sign
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an adjustment quantity.
///
/// Adjustments carry their own sign, so zero is the only invalid value.
pub fn validate_adjustment_quantity(qty: i64) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBeNonZero {
            field: "adjustment quantity",
        });
    }

    if qty.abs() > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "adjustment quantity",
            min: -MAX_LINE_QUANTITY,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price or cost.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (free items)
/// - Negative values are rejected outright, never clamped
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative { field: "unit price" });
    }

    Ok(())
}

/// Validates a line discount against its line subtotal.
///
/// ## Rules
/// - Must be non-negative
/// - Must not exceed the line subtotal (would yield negative tax)
///
/// ## Example
/// ```rust
/// use atlas_core::money::Money;
/// use atlas_core::validation::validate_discount;
///
/// let subtotal = Money::from_cents(27000);
/// assert!(validate_discount(Money::from_cents(1000), subtotal).is_ok());
/// assert!(validate_discount(Money::from_cents(28000), subtotal).is_err());
/// ```
pub fn validate_discount(discount: Money, line_subtotal: Money) -> ValidationResult<()> {
    if discount.is_negative() {
        return Err(ValidationError::MustNotBeNegative { field: "discount" });
    }

    if discount > line_subtotal {
        return Err(ValidationError::DiscountExceedsSubtotal {
            discount,
            subtotal: line_subtotal,
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be strictly positive; zero and negative receipts are rejected
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount",
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a document's line count before adding one more.
pub fn validate_line_count(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_DOCUMENT_LINES {
        return Err(ValidationError::OutOfRange {
            field: "line items",
            min: 0,
            max: MAX_DOCUMENT_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("JAR-1L").is_ok());
        assert!(validate_sku("ABC123").is_ok());
        assert!(validate_sku("raw_material_7").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(10_000).is_err());
    }

    #[test]
    fn test_validate_adjustment_quantity() {
        assert!(validate_adjustment_quantity(-3).is_ok());
        assert!(validate_adjustment_quantity(3).is_ok());
        assert!(validate_adjustment_quantity(0).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(0)).is_ok());
        assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_discount() {
        let subtotal = Money::from_cents(1000);
        assert!(validate_discount(Money::zero(), subtotal).is_ok());
        assert!(validate_discount(Money::from_cents(1000), subtotal).is_ok());
        assert!(validate_discount(Money::from_cents(1001), subtotal).is_err());
        assert!(validate_discount(Money::from_cents(-5), subtotal).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(Money::from_cents(1)).is_ok());
        assert!(validate_payment_amount(Money::zero()).is_err());
        assert!(validate_payment_amount(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_line_count() {
        assert!(validate_line_count(0).is_ok());
        assert!(validate_line_count(99).is_ok());
        assert!(validate_line_count(100).is_err());
    }
}
