//! # Tax & Total Calculator
//!
//! The single pure function that derives every financial field on a document.
//! Both the creation and the update flow call [`compute_totals`]; stored
//! totals are never trusted or reused.
//!
//! ## Computation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items[]                                                                │
//! │     │  Σ quantity × unit_price                                          │
//! │     ▼                                                                   │
//! │  subtotal ──► discount (pct of subtotal, or flat) ──► taxable          │
//! │                                                          │              │
//! │                     ┌────────────────────────────────────┤              │
//! │                     ▼                                    ▼              │
//! │          no-tax / export / foreign client        GST (rate of first    │
//! │                 all components 0                  item, default 18%)   │
//! │                                                          │              │
//! │                                   client_state == place_of_supply?     │
//! │                                   ┌──────────┴──────────┐              │
//! │                                   ▼                     ▼              │
//! │                         CGST = SGST = rate/2     IGST = full rate      │
//! │                                                          │              │
//! │                     total = taxable + cgst + sgst + igst               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! At most one of {CGST+SGST, IGST} is non-zero; the other side is exactly
//! zero. Zero-rated documents have all three at zero.

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Discount, LineItemDraft, TaxProtocol};
use crate::validation;
use crate::{DEFAULT_TAX_RATE_BPS, HOME_COUNTRY};

// =============================================================================
// Inputs
// =============================================================================

/// Tax-relevant context for one document: protocol plus jurisdiction fields.
///
/// Borrowed views into the document header; the calculator never mutates
/// its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxContext<'a> {
    /// Tax mode; `None` on legacy documents that predate the protocol field.
    pub protocol: Option<TaxProtocol>,
    /// Legacy export flag, honoured only when `protocol` is unset.
    pub export_marked: bool,
    /// Jurisdiction of supply. Unset means the company's own state.
    pub place_of_supply: Option<&'a str>,
    /// Client's state, compared against place of supply.
    pub client_state: Option<&'a str>,
    /// Client's country. Unset defaults to India.
    pub client_country: Option<&'a str>,
}

impl TaxContext<'_> {
    /// Resolves the protocol and jurisdiction into "apply no tax at all".
    ///
    /// Matches the legacy resolution order: an explicit protocol wins; with
    /// no protocol the boolean export flag decides; a client outside India
    /// zero-rates the document regardless.
    fn is_zero_rated(&self) -> bool {
        let protocol_zero = match self.protocol {
            Some(TaxProtocol::NoTax) | Some(TaxProtocol::Export) => true,
            Some(TaxProtocol::Gst) => false,
            None => self.export_marked,
        };

        protocol_zero
            || self
                .client_country
                .map_or(false, |c| !c.trim().eq_ignore_ascii_case(HOME_COUNTRY))
    }

    /// Whether the supply stays inside the client's own state.
    ///
    /// An unset place of supply is treated as intra-state, matching the
    /// historical behavior for documents issued before the field existed.
    fn is_intra_state(&self) -> bool {
        match (self.client_state, self.place_of_supply) {
            (_, None) => true,
            (Some(state), Some(pos)) => state.trim().eq_ignore_ascii_case(pos.trim()),
            (None, Some(_)) => false,
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// Every derived financial field for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Money,
    pub discount_total: Money,
    /// Subtotal after discount; the base for all tax components.
    pub taxable: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    /// Sum of whichever tax components were set.
    pub tax_amount: Money,
    pub total: Money,
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes subtotal, discount, GST split, and grand total for a document.
///
/// Pure and idempotent: calling it twice on the same inputs yields identical
/// outputs, and it must re-run on every mutation of items, discount, or
/// tax-relevant fields.
///
/// ## Errors
/// Rejects negative quantities or prices, rates above 100%, and flat
/// discounts exceeding the subtotal, before any arithmetic happens.
///
/// ## Example
/// ```rust
/// use docket_core::tax::{compute_totals, TaxContext};
/// use docket_core::types::{Discount, LineItemDraft, TaxProtocol};
///
/// let items = vec![LineItemDraft {
///     name: "Retainer".into(),
///     description: None,
///     quantity: 1,
///     unit_price_minor: 100_000, // ₹1,000.00
///     tax_rate_bps: None,        // defaults to 18%
///     hsn_code: None,
/// }];
/// let ctx = TaxContext {
///     protocol: Some(TaxProtocol::Gst),
///     client_state: Some("Karnataka"),
///     place_of_supply: Some("Karnataka"),
///     client_country: Some("India"),
///     ..Default::default()
/// };
///
/// let totals = compute_totals(&items, Discount::None, &ctx).unwrap();
/// assert_eq!(totals.cgst.minor(), 9_000);  // 9%
/// assert_eq!(totals.sgst.minor(), 9_000);  // 9%
/// assert_eq!(totals.total.minor(), 118_000);
/// ```
pub fn compute_totals(
    items: &[LineItemDraft],
    discount: Discount,
    ctx: &TaxContext<'_>,
) -> CoreResult<Totals> {
    validation::validate_items(items)?;

    let subtotal: Money = items
        .iter()
        .fold(Money::zero(), |acc, item| acc + item.amount());

    validation::validate_discount(discount, subtotal.minor())?;

    let discount_total = match discount {
        Discount::None => Money::zero(),
        Discount::Percentage(bps) => subtotal.percentage_of(bps),
        Discount::Flat(minor) => Money::from_minor(minor),
    };

    let taxable = subtotal - discount_total;

    let (cgst, sgst, igst) = if ctx.is_zero_rated() {
        (Money::zero(), Money::zero(), Money::zero())
    } else {
        // The whole document is taxed at the first line's rate. Changing
        // this would re-total already-issued documents, so it needs product
        // sign-off first.
        // TODO: per-item rate aggregation once the single-rate policy is
        // confirmed or rejected.
        let rate_bps = items
            .first()
            .map(LineItemDraft::rate_bps)
            .unwrap_or(DEFAULT_TAX_RATE_BPS);

        if ctx.is_intra_state() {
            // taxable × rate / 200 each side; 20000 denominator so odd bps
            // rates (the 0.25% slab) are not truncated before applying
            let half = taxable.half_percentage_of(rate_bps);
            (half, half, Money::zero())
        } else {
            (Money::zero(), Money::zero(), taxable.percentage_of(rate_bps))
        }
    };

    let tax_amount = cgst + sgst + igst;

    Ok(Totals {
        subtotal,
        discount_total,
        taxable,
        cgst,
        sgst,
        igst,
        tax_amount,
        total: taxable + tax_amount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: i64, unit_price_minor: i64, rate_bps: Option<u32>) -> LineItemDraft {
        LineItemDraft {
            name: "Service".to_string(),
            description: None,
            quantity: qty,
            unit_price_minor,
            tax_rate_bps: rate_bps,
            hsn_code: None,
        }
    }

    fn gst_ctx<'a>(state: &'a str, pos: Option<&'a str>) -> TaxContext<'a> {
        TaxContext {
            protocol: Some(TaxProtocol::Gst),
            export_marked: false,
            place_of_supply: pos,
            client_state: Some(state),
            client_country: Some("India"),
        }
    }

    #[test]
    fn test_intra_state_splits_evenly() {
        let items = vec![item(1, 100_000, Some(1800))];
        let ctx = gst_ctx("Karnataka", Some("Karnataka"));

        let t = compute_totals(&items, Discount::None, &ctx).unwrap();
        assert_eq!(t.subtotal.minor(), 100_000);
        assert_eq!(t.cgst.minor(), 9_000);
        assert_eq!(t.sgst.minor(), 9_000);
        assert_eq!(t.igst.minor(), 0);
        assert_eq!(t.tax_amount.minor(), 18_000);
        assert_eq!(t.total.minor(), 118_000);
    }

    #[test]
    fn test_inter_state_uses_igst() {
        let items = vec![item(1, 100_000, Some(1800))];
        let ctx = gst_ctx("Karnataka", Some("Maharashtra"));

        let t = compute_totals(&items, Discount::None, &ctx).unwrap();
        assert_eq!(t.cgst.minor(), 0);
        assert_eq!(t.sgst.minor(), 0);
        assert_eq!(t.igst.minor(), 18_000);
        assert_eq!(t.total.minor(), 118_000);
    }

    #[test]
    fn test_odd_bps_rate_splits_exactly() {
        // The 0.25% slab (rough diamonds): 25 bps doesn't halve in integer
        // bps, so each side must be computed as taxable × rate / 200
        let items = vec![item(1, 100_000, Some(25))];

        let t = compute_totals(&items, Discount::None, &gst_ctx("Karnataka", Some("Karnataka")))
            .unwrap();
        assert_eq!(t.cgst.minor(), 125);
        assert_eq!(t.sgst.minor(), 125);
        assert_eq!(t.tax_amount.minor(), 250);

        // Same rate inter-state charges the same total tax
        let t = compute_totals(&items, Discount::None, &gst_ctx("Karnataka", Some("Maharashtra")))
            .unwrap();
        assert_eq!(t.igst.minor(), 250);
    }

    #[test]
    fn test_unset_place_of_supply_is_intra_state() {
        let items = vec![item(1, 100_000, None)];
        let ctx = gst_ctx("Karnataka", None);

        let t = compute_totals(&items, Discount::None, &ctx).unwrap();
        assert_eq!(t.cgst.minor(), 9_000);
        assert_eq!(t.sgst.minor(), 9_000);
        assert_eq!(t.igst.minor(), 0);
    }

    #[test]
    fn test_percentage_discount_applied_before_tax() {
        let items = vec![item(2, 50_000, Some(1800))]; // subtotal 100_000
        let ctx = gst_ctx("Karnataka", Some("Karnataka"));

        let t = compute_totals(&items, Discount::Percentage(1000), &ctx).unwrap();
        assert_eq!(t.discount_total.minor(), 10_000); // exactly 10%
        assert_eq!(t.taxable.minor(), 90_000);
        assert_eq!(t.cgst.minor(), 8_100); // 9% of 90,000
        assert_eq!(t.total.minor(), 106_200);
    }

    #[test]
    fn test_flat_discount() {
        let items = vec![item(1, 100_000, Some(1800))];
        let ctx = gst_ctx("Karnataka", Some("Maharashtra"));

        let t = compute_totals(&items, Discount::Flat(25_000), &ctx).unwrap();
        assert_eq!(t.discount_total.minor(), 25_000);
        assert_eq!(t.igst.minor(), 13_500); // 18% of 75,000
        assert_eq!(t.total.minor(), 88_500);
    }

    #[test]
    fn test_no_tax_protocol_zeroes_everything() {
        let items = vec![item(1, 100_000, Some(1800))];
        let ctx = TaxContext {
            protocol: Some(TaxProtocol::NoTax),
            ..gst_ctx("Karnataka", Some("Karnataka"))
        };

        let t = compute_totals(&items, Discount::Flat(10_000), &ctx).unwrap();
        assert_eq!(t.tax_amount.minor(), 0);
        assert_eq!(t.total.minor(), 90_000); // subtotal - discount
    }

    #[test]
    fn test_export_protocol_zero_rates() {
        let items = vec![item(1, 100_000, Some(1800))];
        let ctx = TaxContext {
            protocol: Some(TaxProtocol::Export),
            ..gst_ctx("Karnataka", Some("Karnataka"))
        };

        let t = compute_totals(&items, Discount::None, &ctx).unwrap();
        assert_eq!(t.tax_amount.minor(), 0);
        assert_eq!(t.total.minor(), 100_000);
    }

    #[test]
    fn test_legacy_export_flag_without_protocol() {
        let items = vec![item(1, 100_000, Some(1800))];
        let ctx = TaxContext {
            protocol: None,
            export_marked: true,
            ..gst_ctx("Karnataka", Some("Karnataka"))
        };

        let t = compute_totals(&items, Discount::None, &ctx).unwrap();
        assert_eq!(t.tax_amount.minor(), 0);

        // ...but the flag is ignored once a protocol is present
        let ctx = TaxContext {
            protocol: Some(TaxProtocol::Gst),
            export_marked: true,
            ..gst_ctx("Karnataka", Some("Karnataka"))
        };
        let t = compute_totals(&items, Discount::None, &ctx).unwrap();
        assert_eq!(t.tax_amount.minor(), 18_000);
    }

    #[test]
    fn test_foreign_client_zero_rated() {
        let items = vec![item(1, 100_000, Some(1800))];
        let ctx = TaxContext {
            client_country: Some("Singapore"),
            ..gst_ctx("Karnataka", Some("Karnataka"))
        };

        let t = compute_totals(&items, Discount::None, &ctx).unwrap();
        assert_eq!(t.tax_amount.minor(), 0);
        assert_eq!(t.total.minor(), 100_000);
    }

    #[test]
    fn test_first_item_rate_governs_document() {
        // Second item's 5% rate is ignored - documented simplification
        let items = vec![item(1, 50_000, Some(1800)), item(1, 50_000, Some(500))];
        let ctx = gst_ctx("Karnataka", Some("Maharashtra"));

        let t = compute_totals(&items, Discount::None, &ctx).unwrap();
        assert_eq!(t.igst.minor(), 18_000); // 18% of the whole 100,000
    }

    #[test]
    fn test_default_rate_when_first_item_has_none() {
        let items = vec![item(1, 100_000, None)];
        let ctx = gst_ctx("Karnataka", Some("Maharashtra"));

        let t = compute_totals(&items, Discount::None, &ctx).unwrap();
        assert_eq!(t.igst.minor(), 18_000);
    }

    #[test]
    fn test_empty_items_yield_zero_totals() {
        let ctx = gst_ctx("Karnataka", Some("Karnataka"));
        let t = compute_totals(&[], Discount::None, &ctx).unwrap();
        assert_eq!(t.subtotal.minor(), 0);
        assert_eq!(t.total.minor(), 0);
    }

    #[test]
    fn test_idempotent() {
        let items = vec![item(3, 33_333, Some(1800))];
        let ctx = gst_ctx("Karnataka", Some("Karnataka"));

        let a = compute_totals(&items, Discount::Percentage(750), &ctx).unwrap();
        let b = compute_totals(&items, Discount::Percentage(750), &ctx).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let ctx = gst_ctx("Karnataka", Some("Karnataka"));

        assert!(compute_totals(&[item(-1, 100, None)], Discount::None, &ctx).is_err());
        assert!(compute_totals(&[item(1, -100, None)], Discount::None, &ctx).is_err());
        assert!(compute_totals(&[item(1, 100, Some(10_001))], Discount::None, &ctx).is_err());
        assert!(compute_totals(&[item(1, 100, None)], Discount::Flat(101), &ctx).is_err());
    }

    #[test]
    fn test_total_never_negative_for_valid_inputs() {
        let ctx = gst_ctx("Karnataka", Some("Karnataka"));
        for pct in [0u32, 100, 2500, 5000, 9999, 10_000] {
            let t = compute_totals(&[item(1, 99_999, None)], Discount::Percentage(pct), &ctx)
                .unwrap();
            assert!(t.total.minor() >= 0, "negative total at {pct} bps");
        }
    }
}
