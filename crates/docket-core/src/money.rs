//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On an invoice:                                                         │
//! │    ₹10.00 at 18% GST split CGST/SGST = ₹0.90 + ₹0.90, not ₹0.899...    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    All values stored as paise/cents (i64). Division rounds once,       │
//! │    explicitly, where the business rule says so.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use docket_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let fee = Money::from_minor(125_050); // ₹1,250.50
//!
//! // Arithmetic operations
//! let doubled = fee * 2;
//! let total = fee + Money::from_minor(500);
//!
//! // NEVER from floats - no such constructor exists.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR, cents
/// for USD/EUR/GBP, fils for AED - uniformly "minor units" here).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credit notes and refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Currency-agnostic**: The document header carries the currency; Money
///   is just the magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use docket_core::money::Money;
    ///
    /// let fee = Money::from_minor(125_050); // ₹1,250.50
    /// assert_eq!(fee.minor(), 125_050);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (whole rupees/dollars) portion.
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion, always 0-99 (absolute value).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Computes a percentage of this amount, expressed in basis points,
    /// with round-half-up integer arithmetic.
    ///
    /// Carries the full-rate percentages in the system: IGST (1800 bps =
    /// 18%) and percentage discounts. Intra-state halves go through
    /// [`Money::half_percentage_of`].
    ///
    /// ## Implementation
    /// Integer math in i128 to avoid overflow: `(amount * bps + 5000) / 10000`.
    /// The +5000 rounds the half-unit up exactly once.
    ///
    /// ## Example
    /// ```rust
    /// use docket_core::money::Money;
    ///
    /// let taxable = Money::from_minor(100_000); // ₹1,000.00
    /// assert_eq!(taxable.percentage_of(1800).minor(), 18_000); // 18% GST
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_minor(part as i64)
    }

    /// Computes half of a basis-point percentage of this amount, i.e.
    /// `amount × bps / 20000`, with the same round-half-up.
    ///
    /// This is the intra-state GST half (`taxable × rate / 200` per side).
    /// Halving the amount of the rate, not the rate itself, keeps odd rates
    /// exact: the 0.25% slab (25 bps) must not lose its odd basis point to
    /// integer truncation before it is applied.
    ///
    /// ## Example
    /// ```rust
    /// use docket_core::money::Money;
    ///
    /// let taxable = Money::from_minor(100_000); // ₹1,000.00
    /// assert_eq!(taxable.half_percentage_of(1800).minor(), 9_000); // 9% side
    /// assert_eq!(taxable.half_percentage_of(25).minor(), 125);     // 0.125% side
    /// ```
    pub fn half_percentage_of(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 10_000) / 20_000;
        Money::from_minor(part as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// Used for line amounts: `amount = unit_price × quantity`.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the plain decimal magnitude ("1250.50").
///
/// Currency symbols are the caller's concern; the document knows its
/// currency, Money does not.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.minor_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
