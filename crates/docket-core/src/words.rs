//! # Amount-in-Words Formatter
//!
//! Renders a monetary amount as a worded currency string using the Indian
//! numbering scale, for the "Amount in words" line every document carries.
//!
//! ## Indian Scale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   12,34,56,789  =  12 Crore  34 Lakh  56 Thousand  789                  │
//! │                     ──────    ──────   ──────────   ───                 │
//! │                     10^7      10^5     10^3         hundreds/units      │
//! │                                                                         │
//! │   Crore counts recurse: 1,00,00,00,000 = "One Hundred Crore"            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Output Shape
//! - `1250.50 INR` → `"One Thousand Two Hundred Fifty Rupees and Fifty Paise Only"`
//! - `500.00 USD` → `"Five Hundred Dollars Only"`
//! - `0`          → `"Zero Only"` (no currency name)

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Currency;

// =============================================================================
// Word Tables
// =============================================================================

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

// =============================================================================
// Public API
// =============================================================================

/// Renders an amount as a worded currency string.
///
/// ## Errors
/// Negative amounts are rejected; there is no sensible wording for them and
/// upstream validation should never have let one through.
///
/// ## Example
/// ```rust
/// use docket_core::money::Money;
/// use docket_core::types::Currency;
/// use docket_core::words::amount_in_words;
///
/// let s = amount_in_words(Money::from_minor(125_050), Currency::Inr).unwrap();
/// assert_eq!(s, "One Thousand Two Hundred Fifty Rupees and Fifty Paise Only");
/// ```
pub fn amount_in_words(amount: Money, currency: Currency) -> Result<String, ValidationError> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "amount".to_string(),
        });
    }

    if amount.is_zero() {
        return Ok("Zero Only".to_string());
    }

    let whole = amount.major_part();
    let fraction = amount.minor_part();

    let mut out = format!("{} {}", integer_words(whole), currency.unit_name());

    if fraction > 0 {
        out.push_str(&format!(
            " and {} {} Only",
            integer_words(fraction),
            currency.minor_unit_name()
        ));
    } else {
        out.push_str(" Only");
    }

    Ok(out)
}

// =============================================================================
// Internals
// =============================================================================

/// Words for a non-negative integer on the Indian scale.
fn integer_words(n: i64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut parts: Vec<String> = Vec::new();

    let crore = n / 10_000_000;
    let mut rest = n % 10_000_000;
    if crore > 0 {
        // Crore counts recurse so "One Hundred Crore" comes out right
        parts.push(integer_words(crore));
        parts.push("Crore".to_string());
    }

    let lakh = rest / 100_000;
    rest %= 100_000;
    if lakh > 0 {
        parts.push(below_hundred(lakh));
        parts.push("Lakh".to_string());
    }

    let thousand = rest / 1000;
    rest %= 1000;
    if thousand > 0 {
        parts.push(below_hundred(thousand));
        parts.push("Thousand".to_string());
    }

    let hundred = rest / 100;
    let units = rest % 100;
    if hundred > 0 {
        parts.push(below_hundred(hundred));
        parts.push("Hundred".to_string());
    }
    if units > 0 {
        parts.push(below_hundred(units));
    }

    parts.join(" ")
}

/// Words for 1-99.
fn below_hundred(n: i64) -> String {
    debug_assert!((1..100).contains(&n));

    if n < 20 {
        ONES[n as usize].to_string()
    } else {
        let tens = TENS[(n / 10) as usize];
        let ones = n % 10;
        if ones == 0 {
            tens.to_string()
        } else {
            format!("{} {}", tens, ONES[ones as usize])
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn inr(minor: i64) -> String {
        amount_in_words(Money::from_minor(minor), Currency::Inr).unwrap()
    }

    #[test]
    fn test_rupees_and_paise() {
        assert_eq!(
            inr(125_050),
            "One Thousand Two Hundred Fifty Rupees and Fifty Paise Only"
        );
        assert_eq!(inr(0), "Zero Only");
    }

    #[test]
    fn test_whole_amounts() {
        assert_eq!(inr(100), "One Rupees Only");
        assert_eq!(inr(1_700), "Seventeen Rupees Only");
        assert_eq!(inr(4_500), "Forty Five Rupees Only");
        assert_eq!(inr(50_000), "Five Hundred Rupees Only");
    }

    #[test]
    fn test_fraction_only() {
        assert_eq!(inr(50), "Zero Rupees and Fifty Paise Only");
        assert_eq!(inr(5), "Zero Rupees and Five Paise Only");
    }

    #[test]
    fn test_indian_scale_boundaries() {
        assert_eq!(inr(100_000_00), "One Lakh Rupees Only");
        assert_eq!(
            inr(123_456_700),
            "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Rupees Only"
        );
        assert_eq!(inr(10_000_000_00), "One Crore Rupees Only");
        assert_eq!(
            inr(12_34_56_789_00),
            "Twelve Crore Thirty Four Lakh Fifty Six Thousand Seven Hundred Eighty Nine Rupees Only"
        );
    }

    #[test]
    fn test_crore_recursion() {
        // 100,00,00,000 = One Hundred Crore
        assert_eq!(inr(1_000_000_000_00), "One Hundred Crore Rupees Only");
    }

    #[test]
    fn test_other_currencies() {
        let usd = amount_in_words(Money::from_minor(125_050), Currency::Usd).unwrap();
        assert_eq!(usd, "One Thousand Two Hundred Fifty Dollars and Fifty Cents Only");

        let aed = amount_in_words(Money::from_minor(7_500), Currency::Aed).unwrap();
        assert_eq!(aed, "Seventy Five Dirhams Only");
    }

    #[test]
    fn test_negative_rejected() {
        let err = amount_in_words(Money::from_minor(-1), Currency::Inr);
        assert!(matches!(
            err,
            Err(ValidationError::MustBeNonNegative { .. })
        ));
    }

    #[test]
    fn test_teens_and_tens() {
        assert_eq!(integer_words(11), "Eleven");
        assert_eq!(integer_words(20), "Twenty");
        assert_eq!(integer_words(21), "Twenty One");
        assert_eq!(integer_words(99), "Ninety Nine");
        assert_eq!(integer_words(105), "One Hundred Five");
        assert_eq!(integer_words(999), "Nine Hundred Ninety Nine");
    }
}
