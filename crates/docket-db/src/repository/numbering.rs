//! # Number Allocation
//!
//! Transactional allocation of sequential document numbers.
//!
//! ## Why a Counter Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE RACE THIS REPLACES                                                 │
//! │                                                                         │
//! │  Writer A: read max number → 0002 ─┐                                   │
//! │  Writer B: read max number → 0002 ─┤ both compute 0003                 │
//! │                                    ▼                                    │
//! │  A inserts 0003 ✓   B inserts 0003 ✗ UNIQUE violation, no retry        │
//! │                                                                         │
//! │  WITH THE COUNTER                                                       │
//! │                                                                         │
//! │  Each writer runs one atomic upsert inside its insert transaction:     │
//! │    last_seq = last_seq + 1 RETURNING last_seq                          │
//! │  SQLite serializes the writes; A gets 3, B gets 4. No duplicates.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UNIQUE index on `documents.number` stays as a backstop. Hitting it
//! means numbers were inserted outside this path; the violation surfaces to
//! the caller as-is.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use docket_core::numbering::{self, NumberingConfig};
use docket_core::DocumentType;

/// Allocates document numbers against the `document_counters` table.
///
/// Stateless: every method takes the caller's connection so the allocation
/// commits or rolls back together with the document insert.
pub struct NumberAllocator;

impl NumberAllocator {
    /// Allocates the next sequence in the (prefix, year, type) series and
    /// returns it with the formatted number.
    ///
    /// Must be called inside the same transaction that inserts the document;
    /// rolling back the insert releases the sequence too.
    pub async fn allocate(
        conn: &mut SqliteConnection,
        cfg: &NumberingConfig,
        doc_type: DocumentType,
        year: i32,
    ) -> DbResult<(u32, String)> {
        cfg.validate()?;

        Self::seed_if_missing(conn, cfg, doc_type, year).await?;

        let seq: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO document_counters (prefix, year, type_code, last_seq)
            VALUES (?1, ?2, ?3, 1)
            ON CONFLICT (prefix, year, type_code)
            DO UPDATE SET last_seq = last_seq + 1
            RETURNING last_seq
            "#,
        )
        .bind(cfg.prefix.trim())
        .bind(year)
        .bind(doc_type.type_code())
        .fetch_one(&mut *conn)
        .await?;

        let seq = seq as u32;
        let number = numbering::format_number(cfg, doc_type, year, seq);

        debug!(number = %number, "Allocated document number");

        Ok((seq, number))
    }

    /// Returns the last issued sequence for a series (0 when none).
    pub async fn last_issued(
        conn: &mut SqliteConnection,
        cfg: &NumberingConfig,
        doc_type: DocumentType,
        year: i32,
    ) -> DbResult<u32> {
        let last: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT last_seq FROM document_counters
            WHERE prefix = ?1 AND year = ?2 AND type_code = ?3
            "#,
        )
        .bind(cfg.prefix.trim())
        .bind(year)
        .bind(doc_type.type_code())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(last.unwrap_or(0) as u32)
    }

    /// Seeds a missing counter row from legacy document numbers.
    ///
    /// Databases that predate the counter table have their high-water mark
    /// only in the issued numbers themselves. The scan parses suffixes
    /// numerically; a hand-inserted unpadded number still seeds correctly.
    async fn seed_if_missing(
        conn: &mut SqliteConnection,
        cfg: &NumberingConfig,
        doc_type: DocumentType,
        year: i32,
    ) -> DbResult<()> {
        let exists: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM document_counters
            WHERE prefix = ?1 AND year = ?2 AND type_code = ?3
            "#,
        )
        .bind(cfg.prefix.trim())
        .bind(year)
        .bind(doc_type.type_code())
        .fetch_optional(&mut *conn)
        .await?;

        if exists.is_some() {
            return Ok(());
        }

        let series = numbering::series_prefix(cfg, doc_type, year);
        let existing: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT number FROM documents WHERE number LIKE ?1 || '%'
            "#,
        )
        .bind(&series)
        .fetch_all(&mut *conn)
        .await?;

        // next_sequence - 1 is the high-water mark; 0 for an empty series
        let seed = numbering::next_sequence(existing.iter().map(String::as_str)) - 1;

        if seed > 0 {
            debug!(series = %series, seed, "Seeding counter from legacy numbers");
        }

        sqlx::query(
            r#"
            INSERT OR IGNORE INTO document_counters (prefix, year, type_code, last_seq)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(cfg.prefix.trim())
        .bind(year)
        .bind(doc_type.type_code())
        .bind(seed as i64)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
