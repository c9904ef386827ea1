//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! `TaxRate` policy type.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    All arithmetic is exact; rounding happens in exactly one place       │
//! │    (tax computation), with a documented rule.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Wire Problem
//! The external API serializes money as decimal-as-string (`"12.50"`) or as
//! a bare JSON number (`12.5`), depending on the endpoint. `Money`
//! deserializes **leniently**: any of those forms parse, anything
//! non-numeric parses as zero, and `NaN` can never enter a total.
//!
//! ## Usage
//! ```rust
//! use atlas_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // $21.98
//! let total = price + Money::from_cents(500);   // $15.99
//!
//! // Parse from the wire
//! assert_eq!(Money::from_decimal_str("12.50"), Some(Money::from_cents(1250)));
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Custom serde**: Serializes as a decimal string (`"12.34"`),
///   deserializes leniently from string, number, or garbage (garbage = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use atlas_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Parses a decimal string like `"12.50"` into Money.
    ///
    /// ## Rules
    /// - Leading/trailing whitespace is ignored
    /// - An optional leading `-` or `+` sign is honored
    /// - The first two fraction digits are cents; a third digit rounds
    ///   half-up (`"1.005"` → 101 cents)
    /// - Anything else (empty, letters, double dots) returns `None`
    ///
    /// ## Example
    /// ```rust
    /// use atlas_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal_str("100"), Some(Money::from_cents(10000)));
    /// assert_eq!(Money::from_decimal_str("-5.5"), Some(Money::from_cents(-550)));
    /// assert_eq!(Money::from_decimal_str("abc"), None);
    /// ```
    pub fn from_decimal_str(s: &str) -> Option<Money> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let whole: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };

        let mut frac = frac_part.bytes().map(|b| (b - b'0') as i64);
        let d1 = frac.next().unwrap_or(0);
        let d2 = frac.next().unwrap_or(0);
        let d3 = frac.next().unwrap_or(0);

        let mut cents = whole.checked_mul(100)?.checked_add(d1 * 10 + d2)?;
        if d3 >= 5 {
            cents = cents.checked_add(1)?;
        }

        Some(Money(if negative { -cents } else { cents }))
    }

    /// Formats the value as a plain decimal string (`"12.34"`, `"-5.50"`).
    ///
    /// This is the wire format sent to the external API.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }

    /// Calculates tax on this amount.
    ///
    /// ## Rounding
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`,
    /// computed in `i128` to prevent overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use atlas_core::money::{Money, TaxRate};
    ///
    /// let base = Money::from_cents(26000);      // $260.00
    /// let rate = TaxRate::from_bps(1000);       // 10%
    /// assert_eq!(base.calculate_tax(rate).cents(), 2600);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Serde: lenient in, decimal string out
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or a number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        // Bare integers on the wire are whole currency units, not cents
        Ok(Money(v.saturating_mul(100)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let units = i64::try_from(v).unwrap_or(i64::MAX / 100);
        Ok(Money(units.saturating_mul(100)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Ok(Money::zero());
        }
        Ok(Money((v * 100.0).round() as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        // Non-numeric payloads parse as zero, never as an error: a missing
        // or malformed money field must not poison a whole document fetch
        Ok(Money::from_decimal_str(v).unwrap_or_default())
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

// =============================================================================
// Display & Arithmetic
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for messages and debugging. The console formats for display
/// itself to handle localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10.00% (the standard rate, see [`crate::STANDARD_TAX_RATE`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_decimal_parsing() {
        assert_eq!(Money::from_decimal_str("12.50"), Some(Money::from_cents(1250)));
        assert_eq!(Money::from_decimal_str("100"), Some(Money::from_cents(10000)));
        assert_eq!(Money::from_decimal_str(".5"), Some(Money::from_cents(50)));
        assert_eq!(Money::from_decimal_str("-5.5"), Some(Money::from_cents(-550)));
        assert_eq!(Money::from_decimal_str(" 7.25 "), Some(Money::from_cents(725)));
        // third fraction digit rounds half-up
        assert_eq!(Money::from_decimal_str("1.005"), Some(Money::from_cents(101)));
        assert_eq!(Money::from_decimal_str("1.004"), Some(Money::from_cents(100)));

        assert_eq!(Money::from_decimal_str(""), None);
        assert_eq!(Money::from_decimal_str("abc"), None);
        assert_eq!(Money::from_decimal_str("1.2.3"), None);
        assert_eq!(Money::from_decimal_str("."), None);
    }

    #[test]
    fn test_to_decimal_string() {
        assert_eq!(Money::from_cents(1250).to_decimal_string(), "12.50");
        assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
    }

    #[test]
    fn test_lenient_deserialization() {
        // decimal string
        let m: Money = serde_json::from_value(serde_json::json!("12.50")).unwrap();
        assert_eq!(m.cents(), 1250);

        // JSON number (currency units)
        let m: Money = serde_json::from_value(serde_json::json!(12.5)).unwrap();
        assert_eq!(m.cents(), 1250);
        let m: Money = serde_json::from_value(serde_json::json!(100)).unwrap();
        assert_eq!(m.cents(), 10000);

        // garbage parses as zero, never an error and never NaN
        let m: Money = serde_json::from_value(serde_json::json!("N/A")).unwrap();
        assert_eq!(m.cents(), 0);
        let m: Money = serde_json::from_value(serde_json::json!(null)).unwrap();
        assert_eq!(m.cents(), 0);
    }

    #[test]
    fn test_serialization_is_decimal_string() {
        let s = serde_json::to_value(Money::from_cents(28600)).unwrap();
        assert_eq!(s, serde_json::json!("286.00"));
    }

    #[test]
    fn test_tax_calculation_basic() {
        // $10.00 at 10% = $1.00
        let amount = Money::from_cents(1000);
        let rate = TaxRate::from_bps(1000);
        assert_eq!(amount.calculate_tax(rate).cents(), 100);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // $10.05 at 10% = $1.005 → $1.01 (half-up)
        let amount = Money::from_cents(1005);
        let rate = TaxRate::from_bps(1000);
        assert_eq!(amount.calculate_tax(rate).cents(), 101);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    }
}
