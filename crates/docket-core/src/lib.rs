//! # docket-core: Pure Business Logic for Docket
//!
//! This crate is the **heart** of Docket, a business-document system for a
//! small services company: tax invoices, quotations, proposals, and offer
//! letters. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Docket Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Callers (HTTP layer, CLI, jobs)                   │   │
//! │  │    create_document, update_document, record_payment, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ docket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌────────┐ ┌────────┐ │   │
//! │  │   │  types  │ │   tax   │ │ numbering │ │ words  │ │ money  │ │   │
//! │  │   └─────────┘ └─────────┘ └───────────┘ └────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   docket-db (Database Layer)                    │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Document, LineItem, TaxDetails, Payment, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`tax`] - Tax & total calculator (GST split, discounts)
//! - [`numbering`] - Sequential document-number formatting and parsing
//! - [`words`] - Amount-in-words rendering (Indian numbering scale)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are minor units (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use docket_core::money::Money;
//! use docket_core::types::TaxRate;
//!
//! // Create money from paise (never from floats!)
//! let fee = Money::from_minor(250_000); // ₹2,500.00
//!
//! // 18% GST split evenly across CGST and SGST for intra-state supply
//! let rate = TaxRate::from_bps(1800);
//! let half = fee.percentage_of(rate.bps() / 2);
//! assert_eq!(half.minor(), 22_500); // ₹225.00 each side
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod numbering;
pub mod tax;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use docket_core::Money` instead of
// `use docket_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use tax::{compute_totals, TaxContext, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default GST rate applied when a line item carries no rate of its own.
///
/// 1800 basis points = 18%, the standard services rate.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Maximum line items allowed on a single document.
///
/// Prevents runaway documents; these are invoices for a small services
/// company, not purchase orders for a warehouse.
pub const MAX_LINE_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
pub const MAX_LINE_QUANTITY: i64 = 99_999;

/// Maximum unit price in minor units (₹1,00,00,00,000.00 — one billion).
///
/// Together with [`MAX_LINE_QUANTITY`] and [`MAX_LINE_ITEMS`] this keeps
/// every line amount and document subtotal comfortably inside `i64`, so the
/// `quantity × unit_price` multiplication can never overflow.
pub const MAX_UNIT_PRICE_MINOR: i64 = 100_000_000_000;

/// Country whose GST rules the calculator applies. Clients outside it are
/// zero-rated regardless of protocol.
pub const HOME_COUNTRY: &str = "India";
