//! # Domain Types
//!
//! Core domain types used throughout Docket.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Document     │   │    LineItem     │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  number         │   │  document_id    │   │  document_id    │       │
//! │  │  status         │   │  quantity       │   │  method         │       │
//! │  │  total_minor    │   │  amount_minor   │   │  amount_minor   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   TaxDetails    │   │ DocumentStatus │   │   TaxProtocol   │       │
//! │  │  cgst/sgst/igst │   │  Draft → Sent   │   │  Gst / Export   │       │
//! │  │  place of supply│   │  → Accepted ... │   │  / NoTax        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every document has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `number`: business identifier ("GROVYN/2024/INV/0003") - human-readable,
//!   unique, assigned once at creation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::DEFAULT_TAX_RATE_BPS;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (standard Indian services GST)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
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
        TaxRate::from_bps(DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Document Type
// =============================================================================

/// The kind of business document.
///
/// Each type owns a numbering series: invoices and credit notes never share
/// sequence numbers with quotations, even under the same prefix and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    TaxInvoice,
    CreditNote,
    Quotation,
    Proposal,
    OfferLetter,
}

impl DocumentType {
    /// Short code used in document numbers ("Tax Invoice" → "INV").
    pub const fn type_code(&self) -> &'static str {
        match self {
            DocumentType::TaxInvoice => "INV",
            DocumentType::CreditNote => "CN",
            DocumentType::Quotation => "QTN",
            DocumentType::Proposal => "PRO",
            DocumentType::OfferLetter => "OFR",
        }
    }

    /// Human-readable name for headers and drafts.
    pub const fn display_name(&self) -> &'static str {
        match self {
            DocumentType::TaxInvoice => "Tax Invoice",
            DocumentType::CreditNote => "Credit Note",
            DocumentType::Quotation => "Quotation",
            DocumentType::Proposal => "Proposal",
            DocumentType::OfferLetter => "Offer Letter",
        }
    }
}

// =============================================================================
// Document Status
// =============================================================================

/// The lifecycle status of a document.
///
/// ```text
///  Draft ──► Sent ──► Accepted ──► Converted (quotations)
///    ▲         │
///    │         └────► Declined ──► (editable again, resend)
///    │
///    └─ financial fields recomputed on every edit while here
///
///  Sent/Accepted invoices ──► Paid (once payments cover the total)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Being drafted; items and totals still mutable.
    Draft,
    /// Issued to the client. Locked.
    Sent,
    /// Client accepted (quotations/proposals). Locked.
    Accepted,
    /// Client declined. Unlocked so the document can be revised and resent.
    Declined,
    /// Quotation was converted into an invoice. Locked.
    Converted,
    /// Fully settled by recorded payments. Locked.
    Paid,
}

impl DocumentStatus {
    /// Whether this status rejects edits to financial fields.
    pub const fn is_locked(&self) -> bool {
        matches!(
            self,
            DocumentStatus::Sent
                | DocumentStatus::Accepted
                | DocumentStatus::Converted
                | DocumentStatus::Paid
        )
    }

    /// Lowercase name as stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Sent => "sent",
            DocumentStatus::Accepted => "accepted",
            DocumentStatus::Declined => "declined",
            DocumentStatus::Converted => "converted",
            DocumentStatus::Paid => "paid",
        }
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Draft
    }
}

// =============================================================================
// Tax Protocol
// =============================================================================

/// Enumerated mode governing whether standard GST, export zero-rating, or no
/// tax applies to a document.
///
/// A document may carry no protocol at all (legacy rows); resolution then
/// falls back to the `export_marked` boolean on [`TaxDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum TaxProtocol {
    /// Standard Indian GST: CGST+SGST intra-state, IGST inter-state.
    Gst,
    /// Zero-rated export supply.
    Export,
    /// No tax at all (e.g., exempt client).
    NoTax,
}

// =============================================================================
// Currency
// =============================================================================

/// Supported billing currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
    Usd,
    Eur,
    Gbp,
    Aed,
}

impl Currency {
    /// Parses an ISO-like code. Unrecognized codes fall back to INR, the
    /// company's home currency.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "AED" => Currency::Aed,
            _ => Currency::Inr,
        }
    }

    /// The ISO-like code ("INR").
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aed => "AED",
        }
    }

    /// Currency name used in worded amounts ("Rupees").
    pub const fn unit_name(&self) -> &'static str {
        match self {
            Currency::Inr => "Rupees",
            Currency::Usd => "Dollars",
            Currency::Eur => "Euros",
            Currency::Gbp => "Pounds",
            Currency::Aed => "Dirhams",
        }
    }

    /// Fractional unit name used in worded amounts ("Paise"/"Cents").
    pub const fn minor_unit_name(&self) -> &'static str {
        match self {
            Currency::Inr => "Paise",
            _ => "Cents",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Inr
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Document-level discount. Line items carry no discounts of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Discount {
    /// No discount.
    None,
    /// Percentage of the subtotal, in basis points (1000 = 10%).
    Percentage(u32),
    /// Flat amount in minor units.
    Flat(i64),
}

impl Default for Discount {
    fn default() -> Self {
        Discount::None
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// Caller-supplied line item for document creation or update.
///
/// The stored [`LineItem`] is materialized from this once the document row
/// exists; the computed amount is always `quantity × unit_price`, never
/// caller-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDraft {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    /// Unit price in minor units.
    pub unit_price_minor: i64,
    /// Per-item GST rate in bps. Defaults to 18% when absent.
    pub tax_rate_bps: Option<u32>,
    /// HSN/SAC classification code, when the client requires it.
    pub hsn_code: Option<String>,
}

impl LineItemDraft {
    /// Line amount before document-level discount and tax.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_minor(self.unit_price_minor).multiply_quantity(self.quantity)
    }

    /// Effective tax rate for this line.
    #[inline]
    pub fn rate_bps(&self) -> u32 {
        self.tax_rate_bps.unwrap_or(DEFAULT_TAX_RATE_BPS)
    }
}

/// A stored line item, owned by exactly one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub document_id: String,
    /// Order on the printed document.
    pub position: i64,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub unit_price_minor: i64,
    pub tax_rate_bps: u32,
    pub hsn_code: Option<String>,
    /// Computed: quantity × unit_price. Discount and tax are applied at the
    /// document level, never per line.
    pub amount_minor: i64,
}

impl LineItem {
    /// Returns the line amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_minor(self.amount_minor)
    }
}

// =============================================================================
// Tax Details
// =============================================================================

/// Tax treatment and computed split amounts for one document.
///
/// ## Invariant
/// Exactly one of the following holds, depending on protocol and place of
/// supply:
/// - intra-state: `cgst` and `sgst` non-zero, `igst` zero
/// - inter-state: `igst` non-zero, `cgst` and `sgst` zero
/// - zero-rated / no-tax: all three zero
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxDetails {
    /// Tax mode. `None` on legacy rows, which fall back to `export_marked`.
    pub protocol: Option<TaxProtocol>,
    /// Jurisdiction determining intra- vs inter-state treatment. Unset means
    /// the supply happens in the company's own state.
    pub place_of_supply: Option<String>,
    /// Legacy export flag, honoured only when `protocol` is unset.
    pub export_marked: bool,
    /// Central GST component (intra-state half), minor units.
    pub cgst_minor: i64,
    /// State GST component (intra-state half), minor units.
    pub sgst_minor: i64,
    /// Integrated GST component (inter-state), minor units.
    pub igst_minor: i64,
}

// =============================================================================
// Document
// =============================================================================

/// A business document: invoice, credit note, quotation, proposal, or offer
/// letter. Owns its line items and tax details; nothing is shared between
/// documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub doc_type: DocumentType,
    /// Business number, unique across all documents ("GROVYN/2024/INV/0003").
    pub number: String,
    pub status: DocumentStatus,
    /// Explicit lock flag, kept in sync with status transitions.
    pub locked: bool,
    pub client_name: String,
    /// Client's state, compared against place of supply for the GST split.
    pub client_state: Option<String>,
    /// Client's country. Anything other than India zero-rates the document.
    pub client_country: String,
    pub currency: Currency,
    pub discount: Discount,
    pub subtotal_minor: i64,
    pub discount_total_minor: i64,
    pub tax: TaxDetails,
    pub tax_amount_minor: i64,
    pub total_minor: i64,
    /// Human-readable total ("One Thousand ... Rupees Only").
    pub amount_in_words: String,
    pub notes: Option<String>,
    pub items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Whether edits to financial fields are rejected.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked || self.status.is_locked()
    }

    /// Grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total_minor)
    }
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Upi,
    Cash,
    Card,
}

/// A payment received against a document.
/// A document can accumulate multiple partial payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub document_id: String,
    pub method: PaymentMethod,
    /// Amount received in minor units.
    pub amount_minor: i64,
    /// External reference (UTR number, transaction id).
    pub reference: Option<String>,
    pub received_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_minor(self.amount_minor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        assert_eq!(DocumentType::TaxInvoice.type_code(), "INV");
        assert_eq!(DocumentType::CreditNote.type_code(), "CN");
        assert_eq!(DocumentType::Quotation.type_code(), "QTN");
    }

    #[test]
    fn test_status_lock() {
        assert!(!DocumentStatus::Draft.is_locked());
        assert!(!DocumentStatus::Declined.is_locked());
        assert!(DocumentStatus::Sent.is_locked());
        assert!(DocumentStatus::Converted.is_locked());
        assert!(DocumentStatus::Paid.is_locked());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Currency::Usd);
        assert_eq!(Currency::from_code("usd"), Currency::Usd);
        assert_eq!(Currency::from_code("INR"), Currency::Inr);
        // Unknown codes fall back to the home currency
        assert_eq!(Currency::from_code("XYZ"), Currency::Inr);
        assert_eq!(Currency::from_code(""), Currency::Inr);
    }

    #[test]
    fn test_currency_word_names() {
        assert_eq!(Currency::Inr.unit_name(), "Rupees");
        assert_eq!(Currency::Inr.minor_unit_name(), "Paise");
        assert_eq!(Currency::Usd.minor_unit_name(), "Cents");
    }

    #[test]
    fn test_line_item_draft_amount() {
        let draft = LineItemDraft {
            name: "Consulting".to_string(),
            description: None,
            quantity: 3,
            unit_price_minor: 50_000,
            tax_rate_bps: None,
            hsn_code: None,
        };
        assert_eq!(draft.amount().minor(), 150_000);
        assert_eq!(draft.rate_bps(), 1800);
    }

    #[test]
    fn test_tax_rate_default_is_18_percent() {
        assert_eq!(TaxRate::default().bps(), 1800);
        assert_eq!(TaxRate::from_percentage(18.0).bps(), 1800);
    }
}
