//! # Validation Module
//!
//! Input validation for document creation and update.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (HTTP layer, out of scope here)                       │
//! │  ├── Shape checks, authentication                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Runs before compute_totals, so the calculator never sees          │
//! │  │   negative quantities, negative prices, or >100% rates              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL, UNIQUE (document number), foreign keys                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{Discount, LineItemDraft};
use crate::{MAX_LINE_ITEMS, MAX_LINE_QUANTITY, MAX_UNIT_PRICE_MINOR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a client name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "client_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "client_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a quantity value.
///
/// Zero is allowed - a line can be listed at no quantity (e.g., an optional
/// service shown for reference) - but negatives are not.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in minor units.
///
/// Zero is allowed (complimentary line); negatives are not. The upper bound
/// keeps `quantity × unit_price` and the document subtotal inside `i64` even
/// at the quantity and item-count caps.
pub fn validate_unit_price(minor: i64) -> ValidationResult<()> {
    if minor < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }

    if minor > MAX_UNIT_PRICE_MINOR {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_MINOR,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - Real GST slabs are 0-2800; the bound only rejects nonsense
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates a full set of line items for one document.
pub fn validate_items(items: &[LineItemDraft]) -> ValidationResult<()> {
    if items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::TooManyItems { max: MAX_LINE_ITEMS });
    }

    for item in items {
        if item.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "item.name".to_string(),
            });
        }
        validate_quantity(item.quantity)?;
        validate_unit_price(item.unit_price_minor)?;
        validate_tax_rate_bps(item.rate_bps())?;
    }

    Ok(())
}

// =============================================================================
// Discount Validators
// =============================================================================

/// Validates a discount against the subtotal it will apply to.
///
/// ## Rules
/// - Percentage: 0-10000 bps (0%-100%)
/// - Flat: non-negative and no larger than the subtotal
pub fn validate_discount(discount: Discount, subtotal_minor: i64) -> ValidationResult<()> {
    match discount {
        Discount::None => Ok(()),
        Discount::Percentage(bps) => {
            if bps > 10_000 {
                return Err(ValidationError::OutOfRange {
                    field: "discount_percentage".to_string(),
                    min: 0,
                    max: 10_000,
                });
            }
            Ok(())
        }
        Discount::Flat(minor) => {
            if minor < 0 {
                return Err(ValidationError::MustBeNonNegative {
                    field: "discount".to_string(),
                });
            }
            if minor > subtotal_minor {
                return Err(ValidationError::DiscountExceedsSubtotal {
                    discount_minor: minor,
                    subtotal_minor,
                });
            }
            Ok(())
        }
    }
}

// =============================================================================
// Payment Validators
// =============================================================================

/// Validates a payment amount in minor units. Must be strictly positive.
pub fn validate_payment_amount(minor: i64) -> ValidationResult<()> {
    if minor <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
