//! # Error Types
//!
//! Domain-specific error types for docket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  docket-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  docket-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (number, ID, field)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Document cannot be found.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Document has been locked and rejects further edits.
    ///
    /// ## When This Occurs
    /// - Editing an invoice after it was sent
    /// - Editing a quotation after it was accepted or converted
    /// - Editing a settled (paid) invoice
    #[error("Document {id} is {status}, cannot be edited")]
    DocumentLocked { id: String, status: String },

    /// Numbering configuration is missing a required piece.
    ///
    /// Numbering always produces a value when configured (defaulting the
    /// sequence to 1), so this is the only way it can fail.
    #[error("Numbering configuration missing: {field}")]
    MissingNumberingConfig { field: String },

    /// A quotation-only operation was attempted on some other document type.
    #[error("Document {id} is a {actual}, expected a quotation")]
    NotAQuotation { id: String, actual: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before totals are computed or rows written.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., invalid UUID, malformed template).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A flat discount larger than the subtotal it applies to.
    #[error("discount of {discount_minor} exceeds subtotal of {subtotal_minor}")]
    DiscountExceedsSubtotal {
        discount_minor: i64,
        subtotal_minor: i64,
    },

    /// Too many line items on one document.
    #[error("document cannot have more than {max} line items")]
    TooManyItems { max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
