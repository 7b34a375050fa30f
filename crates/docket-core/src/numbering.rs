//! # Document Numbering
//!
//! Formatting and parsing for sequential document numbers, scoped by prefix,
//! year, and document type.
//!
//! ## Number Anatomy
//! ```text
//!        GROVYN / 2024 / INV / 0003
//!        ──────   ────   ───   ────
//!        prefix   year   type  sequence (zero-padded to 4)
//! ```
//!
//! The pure half lives here: template substitution, suffix parsing, and
//! next-sequence computation. Persistent allocation (the counter table that
//! makes concurrent creations safe) lives in `docket-db`.
//!
//! ## Ordering
//! Sequences are compared **numerically**, never lexicographically. The
//! original system sorted number strings and relied on fixed-width zero
//! padding; one hand-inserted `INV/123` would have silently broken the
//! series. Parsing the suffix to an integer removes that fragility.

use crate::error::{CoreError, CoreResult};
use crate::types::DocumentType;

// =============================================================================
// Configuration
// =============================================================================

/// Default number template. Tokens: `{PREFIX}`, `{YEAR}`, `{TYPE}`, `{NUMBER}`.
pub const DEFAULT_NUMBER_TEMPLATE: &str = "{PREFIX}/{YEAR}/{TYPE}/{NUMBER}";

/// Width the sequence is zero-padded to.
pub const SEQUENCE_PAD: usize = 4;

/// Numbering configuration: company prefix plus the format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingConfig {
    /// Company prefix, e.g. "GROVYN".
    pub prefix: String,
    /// Template with `{PREFIX}`/`{YEAR}`/`{TYPE}`/`{NUMBER}` tokens.
    pub template: String,
}

impl NumberingConfig {
    /// Creates a configuration with the default template.
    pub fn new(prefix: impl Into<String>) -> Self {
        NumberingConfig {
            prefix: prefix.into(),
            template: DEFAULT_NUMBER_TEMPLATE.to_string(),
        }
    }

    /// Overrides the template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Checks that the configuration can actually produce numbers.
    ///
    /// This is the only way numbering fails: an empty prefix or a template
    /// with no `{NUMBER}` token. Everything else defaults (sequence to 1).
    pub fn validate(&self) -> CoreResult<()> {
        if self.prefix.trim().is_empty() {
            return Err(CoreError::MissingNumberingConfig {
                field: "prefix".to_string(),
            });
        }
        if self.template.trim().is_empty() {
            return Err(CoreError::MissingNumberingConfig {
                field: "template".to_string(),
            });
        }
        if !self.template.contains("{NUMBER}") {
            return Err(CoreError::MissingNumberingConfig {
                field: "template {NUMBER} token".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Renders a document number from the template.
///
/// ## Example
/// ```rust
/// use docket_core::numbering::{format_number, NumberingConfig};
/// use docket_core::types::DocumentType;
///
/// let cfg = NumberingConfig::new("GROVYN");
/// let number = format_number(&cfg, DocumentType::TaxInvoice, 2024, 3);
/// assert_eq!(number, "GROVYN/2024/INV/0003");
/// ```
pub fn format_number(
    cfg: &NumberingConfig,
    doc_type: DocumentType,
    year: i32,
    seq: u32,
) -> String {
    cfg.template
        .replace("{PREFIX}", cfg.prefix.trim())
        .replace("{YEAR}", &year.to_string())
        .replace("{TYPE}", doc_type.type_code())
        .replace("{NUMBER}", &format!("{:0width$}", seq, width = SEQUENCE_PAD))
}

/// The series prefix all numbers of one (prefix, year, type) scope share,
/// e.g. `"GROVYN/2024/INV/"`. Used to scan legacy rows when seeding a
/// counter.
pub fn series_prefix(cfg: &NumberingConfig, doc_type: DocumentType, year: i32) -> String {
    format!("{}/{}/{}/", cfg.prefix.trim(), year, doc_type.type_code())
}

// =============================================================================
// Parsing
// =============================================================================

/// Extracts the trailing numeric sequence from a document number.
///
/// Returns `None` for numbers without a numeric suffix, which are simply
/// skipped when computing the next sequence.
///
/// ## Example
/// ```rust
/// use docket_core::numbering::parse_sequence;
///
/// assert_eq!(parse_sequence("GROVYN/2024/INV/0003"), Some(3));
/// assert_eq!(parse_sequence("GROVYN/2024/INV/123"), Some(123)); // unpadded still parses
/// assert_eq!(parse_sequence("GROVYN/2024/INV/draft"), None);
/// ```
pub fn parse_sequence(number: &str) -> Option<u32> {
    let tail: String = number
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .chars()
        .rev()
        .collect();

    if tail.is_empty() {
        return None;
    }

    tail.parse().ok()
}

/// Computes the next sequence given every previously issued number in the
/// series. Defaults to 1 when the series is empty.
///
/// Comparison is numeric: `INV/123` sorts after `INV/0099` even though a
/// string sort would say otherwise.
pub fn next_sequence<'a>(existing: impl IntoIterator<Item = &'a str>) -> u32 {
    existing
        .into_iter()
        .filter_map(parse_sequence)
        .max()
        .map_or(1, |max| max + 1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        let cfg = NumberingConfig::new("GROVYN");
        assert_eq!(
            format_number(&cfg, DocumentType::TaxInvoice, 2024, 3),
            "GROVYN/2024/INV/0003"
        );
        assert_eq!(
            format_number(&cfg, DocumentType::Quotation, 2026, 42),
            "GROVYN/2026/QTN/0042"
        );
        // Sequences past four digits widen rather than truncate
        assert_eq!(
            format_number(&cfg, DocumentType::CreditNote, 2024, 12345),
            "GROVYN/2024/CN/12345"
        );
    }

    #[test]
    fn test_custom_template() {
        let cfg = NumberingConfig::new("ACME").with_template("{TYPE}-{YEAR}-{NUMBER} ({PREFIX})");
        assert_eq!(
            format_number(&cfg, DocumentType::OfferLetter, 2025, 7),
            "OFR-2025-0007 (ACME)"
        );
    }

    #[test]
    fn test_series_prefix() {
        let cfg = NumberingConfig::new("GROVYN");
        assert_eq!(
            series_prefix(&cfg, DocumentType::TaxInvoice, 2024),
            "GROVYN/2024/INV/"
        );
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence("GROVYN/2024/INV/0001"), Some(1));
        assert_eq!(parse_sequence("GROVYN/2024/INV/0042"), Some(42));
        assert_eq!(parse_sequence("GROVYN/2024/INV/123"), Some(123));
        assert_eq!(parse_sequence("GROVYN/2024/INV/"), None);
        assert_eq!(parse_sequence("no digits here"), None);
        assert_eq!(parse_sequence(""), None);
    }

    #[test]
    fn test_next_sequence_continues_series() {
        // Existing GROVYN/2024/INV/0001 and 0002 → next is 3
        let existing = ["GROVYN/2024/INV/0001", "GROVYN/2024/INV/0002"];
        assert_eq!(next_sequence(existing), 3);
    }

    #[test]
    fn test_next_sequence_defaults_to_one() {
        assert_eq!(next_sequence([]), 1);
        // Numbers without numeric suffixes are skipped, not errors
        assert_eq!(next_sequence(["GROVYN/2024/INV/draft"]), 1);
    }

    #[test]
    fn test_next_sequence_is_numeric_not_lexicographic() {
        // A string sort would call "0099" the max; numerically 123 wins
        let existing = ["GROVYN/2024/INV/123", "GROVYN/2024/INV/0099"];
        assert_eq!(next_sequence(existing), 124);
    }

    #[test]
    fn test_config_validation() {
        assert!(NumberingConfig::new("GROVYN").validate().is_ok());
        assert!(NumberingConfig::new("").validate().is_err());
        assert!(NumberingConfig::new("   ").validate().is_err());
        assert!(NumberingConfig::new("GROVYN")
            .with_template("")
            .validate()
            .is_err());
        assert!(NumberingConfig::new("GROVYN")
            .with_template("{PREFIX}/{YEAR}")
            .validate()
            .is_err());
    }
}
