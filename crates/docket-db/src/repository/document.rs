//! # Document Repository
//!
//! Database operations for documents and their line items.
//!
//! ## Document Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Document Lifecycle                                │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create() → totals computed, number allocated, rows inserted    │
//! │         (all inside one transaction)                                   │
//! │                                                                         │
//! │  2. EDIT (drafts and declined documents only)                          │
//! │     └── update() → line items replaced, totals recomputed              │
//! │                                                                         │
//! │  3. ISSUE                                                              │
//! │     └── mark_sent() → status Sent, locked                              │
//! │     └── mark_accepted() / mark_declined()                              │
//! │                                                                         │
//! │  4. CONVERT (quotations)                                               │
//! │     └── convert_to_invoice() → new invoice with its own INV number,    │
//! │         quotation becomes Converted                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived financial fields (subtotal, discount, GST split, total, amount in
//! words) are never written directly by callers. Every save path recomputes
//! them from the submitted line items via `docket_core::compute_totals`.

use chrono::{DateTime, Datelike, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::numbering::NumberAllocator;
use docket_core::numbering::NumberingConfig;
use docket_core::words::amount_in_words;
use docket_core::{
    compute_totals, validation, CoreError, Currency, Discount, Document, DocumentStatus,
    DocumentType, LineItem, LineItemDraft, TaxContext, TaxDetails, TaxProtocol, Totals,
    HOME_COUNTRY,
};

// =============================================================================
// Input
// =============================================================================

/// Caller-supplied fields for creating or updating a document.
///
/// Everything derived (number, status, totals, amount in words) is computed
/// server-side; the input carries only what the user actually typed.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub client_name: String,
    pub client_state: Option<String>,
    /// Defaults to India when absent.
    pub client_country: Option<String>,
    pub place_of_supply: Option<String>,
    pub currency: Currency,
    pub tax_protocol: Option<TaxProtocol>,
    /// Legacy export flag, honoured only when `tax_protocol` is unset.
    pub export_marked: bool,
    pub discount: Discount,
    pub items: Vec<LineItemDraft>,
    pub notes: Option<String>,
}

impl DocumentInput {
    fn country(&self) -> &str {
        self.client_country.as_deref().unwrap_or(HOME_COUNTRY)
    }

    fn tax_context(&self) -> TaxContext<'_> {
        TaxContext {
            protocol: self.tax_protocol,
            export_marked: self.export_marked,
            place_of_supply: self.place_of_supply.as_deref(),
            client_state: self.client_state.as_deref(),
            client_country: Some(self.country()),
        }
    }
}

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    doc_type: DocumentType,
    number: String,
    status: DocumentStatus,
    locked: bool,
    client_name: String,
    client_state: Option<String>,
    client_country: String,
    place_of_supply: Option<String>,
    currency: Currency,
    tax_protocol: Option<TaxProtocol>,
    export_marked: bool,
    discount_pct_bps: Option<i64>,
    discount_flat_minor: Option<i64>,
    subtotal_minor: i64,
    discount_total_minor: i64,
    cgst_minor: i64,
    sgst_minor: i64,
    igst_minor: i64,
    tax_amount_minor: i64,
    total_minor: i64,
    amount_in_words: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_document(self, items: Vec<LineItem>) -> Document {
        let discount = match (self.discount_pct_bps, self.discount_flat_minor) {
            (Some(bps), _) => Discount::Percentage(bps as u32),
            (None, Some(minor)) => Discount::Flat(minor),
            (None, None) => Discount::None,
        };

        Document {
            id: self.id,
            doc_type: self.doc_type,
            number: self.number,
            status: self.status,
            locked: self.locked,
            client_name: self.client_name,
            client_state: self.client_state,
            client_country: self.client_country,
            currency: self.currency,
            discount,
            subtotal_minor: self.subtotal_minor,
            discount_total_minor: self.discount_total_minor,
            tax: TaxDetails {
                protocol: self.tax_protocol,
                place_of_supply: self.place_of_supply,
                export_marked: self.export_marked,
                cgst_minor: self.cgst_minor,
                sgst_minor: self.sgst_minor,
                igst_minor: self.igst_minor,
            },
            tax_amount_minor: self.tax_amount_minor,
            total_minor: self.total_minor,
            amount_in_words: self.amount_in_words,
            notes: self.notes,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    id: String,
    document_id: String,
    position: i64,
    name: String,
    description: Option<String>,
    quantity: i64,
    unit_price_minor: i64,
    tax_rate_bps: i64,
    hsn_code: Option<String>,
    amount_minor: i64,
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        LineItem {
            id: row.id,
            document_id: row.document_id,
            position: row.position,
            name: row.name,
            description: row.description,
            quantity: row.quantity,
            unit_price_minor: row.unit_price_minor,
            tax_rate_bps: row.tax_rate_bps as u32,
            hsn_code: row.hsn_code,
            amount_minor: row.amount_minor,
        }
    }
}

/// Header-only view for listings; line items are not loaded.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DocumentSummary {
    pub id: String,
    pub doc_type: DocumentType,
    pub number: String,
    pub status: DocumentStatus,
    pub client_name: String,
    pub total_minor: i64,
    pub created_at: DateTime<Utc>,
}

const DOCUMENT_COLUMNS: &str = r#"
    id, doc_type, number, status, locked,
    client_name, client_state, client_country, place_of_supply,
    currency, tax_protocol, export_marked,
    discount_pct_bps, discount_flat_minor,
    subtotal_minor, discount_total_minor,
    cgst_minor, sgst_minor, igst_minor, tax_amount_minor, total_minor,
    amount_in_words, notes, created_at, updated_at
"#;

// =============================================================================
// Repository
// =============================================================================

/// Repository for document database operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Creates a new DocumentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DocumentRepository { pool }
    }

    /// Creates a document: computes totals, allocates the next number in the
    /// (prefix, year, type) series, and inserts header plus line items, all
    /// in one transaction.
    pub async fn create(
        &self,
        cfg: &NumberingConfig,
        doc_type: DocumentType,
        input: DocumentInput,
    ) -> DbResult<Document> {
        validation::validate_client_name(&input.client_name).map_err(CoreError::from)?;
        let totals = compute_totals(&input.items, input.discount, &input.tax_context())?;
        let words = amount_in_words(totals.total, input.currency).map_err(CoreError::from)?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let year = now.year();

        let mut tx = self.pool.begin().await?;

        let (_, number) = NumberAllocator::allocate(&mut *tx, cfg, doc_type, year).await?;

        self.insert_header(&mut tx, &id, doc_type, &number, DocumentStatus::Draft, false, &input, &totals, &words, now)
            .await?;
        let items = Self::insert_items(&mut tx, &id, &input.items).await?;

        tx.commit().await?;

        info!(id = %id, number = %number, "Created document");

        Ok(self.assemble(id, doc_type, number, DocumentStatus::Draft, input, totals, words, items, now))
    }

    /// Gets a document with its line items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Document>> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.get_items(id).await?;
        Ok(Some(row.into_document(items)))
    }

    /// Gets a document by its business number.
    pub async fn get_by_number(&self, number: &str) -> DbResult<Option<Document>> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE number = ?1"
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.get_items(&row.id).await?;
        Ok(Some(row.into_document(items)))
    }

    /// Lists document headers, newest first, optionally filtered by type
    /// and/or status.
    pub async fn list(
        &self,
        doc_type: Option<DocumentType>,
        status: Option<DocumentStatus>,
        limit: i64,
    ) -> DbResult<Vec<DocumentSummary>> {
        let rows: Vec<DocumentSummary> = sqlx::query_as(
            r#"
            SELECT id, doc_type, number, status, client_name, total_minor, created_at
            FROM documents
            WHERE (?1 IS NULL OR doc_type = ?1)
              AND (?2 IS NULL OR status = ?2)
            ORDER BY created_at DESC
            LIMIT ?3
            "#,
        )
        .bind(doc_type)
        .bind(status)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Updates a document in place: replaces the line items and recomputes
    /// every derived financial field.
    ///
    /// Rejected with [`CoreError::DocumentLocked`] for sent, accepted,
    /// converted, or paid documents. Declined documents stay editable so
    /// they can be revised and resent.
    pub async fn update(&self, id: &str, input: DocumentInput) -> DbResult<Document> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Document", id))?;

        if existing.is_locked() {
            return Err(CoreError::DocumentLocked {
                id: id.to_string(),
                status: existing.status.as_str().to_string(),
            }
            .into());
        }

        validation::validate_client_name(&input.client_name).map_err(CoreError::from)?;
        let totals = compute_totals(&input.items, input.discount, &input.tax_context())?;
        let words = amount_in_words(totals.total, input.currency).map_err(CoreError::from)?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let (pct_bps, flat_minor) = discount_columns(input.discount);
        sqlx::query(
            r#"
            UPDATE documents SET
                client_name = ?2, client_state = ?3, client_country = ?4,
                place_of_supply = ?5, currency = ?6, tax_protocol = ?7,
                export_marked = ?8, discount_pct_bps = ?9, discount_flat_minor = ?10,
                subtotal_minor = ?11, discount_total_minor = ?12,
                cgst_minor = ?13, sgst_minor = ?14, igst_minor = ?15,
                tax_amount_minor = ?16, total_minor = ?17,
                amount_in_words = ?18, notes = ?19, updated_at = ?20
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.client_name)
        .bind(&input.client_state)
        .bind(input.country())
        .bind(&input.place_of_supply)
        .bind(input.currency)
        .bind(input.tax_protocol)
        .bind(input.export_marked)
        .bind(pct_bps)
        .bind(flat_minor)
        .bind(totals.subtotal.minor())
        .bind(totals.discount_total.minor())
        .bind(totals.cgst.minor())
        .bind(totals.sgst.minor())
        .bind(totals.igst.minor())
        .bind(totals.tax_amount.minor())
        .bind(totals.total.minor())
        .bind(&words)
        .bind(&input.notes)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM line_items WHERE document_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let items = Self::insert_items(&mut tx, id, &input.items).await?;

        tx.commit().await?;

        debug!(id = %id, "Updated document");

        let mut doc = self.assemble(
            id.to_string(),
            existing.doc_type,
            existing.number,
            existing.status,
            input,
            totals,
            words,
            items,
            now,
        );
        doc.created_at = existing.created_at;
        Ok(doc)
    }

    /// Deletes a draft. Anything past Draft is immutable history.
    pub async fn delete_draft(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?1 AND status = 'draft'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return match self.status_of(id).await? {
                Some(status) => Err(CoreError::DocumentLocked {
                    id: id.to_string(),
                    status: status.as_str().to_string(),
                }
                .into()),
                None => Err(DbError::not_found("Document", id)),
            };
        }

        Ok(())
    }

    // =========================================================================
    // Status Transitions
    // =========================================================================

    /// Marks a draft (or previously declined) document as sent and locks it.
    pub async fn mark_sent(&self, id: &str) -> DbResult<()> {
        self.transition(id, &[DocumentStatus::Draft, DocumentStatus::Declined], DocumentStatus::Sent, true)
            .await
    }

    /// Marks a sent document as accepted. Stays locked.
    pub async fn mark_accepted(&self, id: &str) -> DbResult<()> {
        self.transition(id, &[DocumentStatus::Sent], DocumentStatus::Accepted, true)
            .await
    }

    /// Marks a sent document as declined and unlocks it for revision.
    pub async fn mark_declined(&self, id: &str) -> DbResult<()> {
        self.transition(id, &[DocumentStatus::Sent], DocumentStatus::Declined, false)
            .await
    }

    /// Status transition with an in-SQL guard on the expected current status.
    ///
    /// The guard makes concurrent transitions safe: two racing `mark_sent`
    /// calls cannot both succeed, because the second UPDATE matches no row.
    async fn transition(
        &self,
        id: &str,
        from: &[DocumentStatus],
        to: DocumentStatus,
        lock: bool,
    ) -> DbResult<()> {
        let current = self
            .status_of(id)
            .await?
            .ok_or_else(|| DbError::not_found("Document", id))?;

        if !from.contains(&current) {
            return Err(CoreError::DocumentLocked {
                id: id.to_string(),
                status: current.as_str().to_string(),
            }
            .into());
        }

        let result = sqlx::query(
            r#"
            UPDATE documents SET status = ?2, locked = ?3, updated_at = ?4
            WHERE id = ?1 AND status = ?5
            "#,
        )
        .bind(id)
        .bind(to)
        .bind(lock)
        .bind(Utc::now())
        .bind(current)
        .execute(&self.pool)
        .await?;

        // Lost a race with another transition
        if result.rows_affected() == 0 {
            return Err(CoreError::DocumentLocked {
                id: id.to_string(),
                status: to.as_str().to_string(),
            }
            .into());
        }

        info!(id = %id, status = to.as_str(), "Document status changed");

        Ok(())
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    /// Converts an accepted quotation into a tax invoice.
    ///
    /// The invoice is a fresh document with its own number from the INV
    /// series; totals are recomputed from the quotation's line items rather
    /// than copied. The quotation becomes Converted in the same transaction.
    pub async fn convert_to_invoice(
        &self,
        cfg: &NumberingConfig,
        quotation_id: &str,
    ) -> DbResult<Document> {
        let quotation = self
            .get_by_id(quotation_id)
            .await?
            .ok_or_else(|| DbError::not_found("Document", quotation_id))?;

        if quotation.doc_type != DocumentType::Quotation {
            return Err(CoreError::NotAQuotation {
                id: quotation_id.to_string(),
                actual: quotation.doc_type.display_name().to_string(),
            }
            .into());
        }
        if quotation.status != DocumentStatus::Accepted {
            return Err(CoreError::DocumentLocked {
                id: quotation_id.to_string(),
                status: quotation.status.as_str().to_string(),
            }
            .into());
        }

        let input = DocumentInput {
            client_name: quotation.client_name.clone(),
            client_state: quotation.client_state.clone(),
            client_country: Some(quotation.client_country.clone()),
            place_of_supply: quotation.tax.place_of_supply.clone(),
            currency: quotation.currency,
            tax_protocol: quotation.tax.protocol,
            export_marked: quotation.tax.export_marked,
            discount: quotation.discount,
            items: quotation
                .items
                .iter()
                .map(|item| LineItemDraft {
                    name: item.name.clone(),
                    description: item.description.clone(),
                    quantity: item.quantity,
                    unit_price_minor: item.unit_price_minor,
                    tax_rate_bps: Some(item.tax_rate_bps),
                    hsn_code: item.hsn_code.clone(),
                })
                .collect(),
            notes: quotation.notes.clone(),
        };

        let totals = compute_totals(&input.items, input.discount, &input.tax_context())?;
        let words = amount_in_words(totals.total, input.currency).map_err(CoreError::from)?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE documents SET status = 'converted', locked = 1, updated_at = ?2
            WHERE id = ?1 AND status = 'accepted'
            "#,
        )
        .bind(quotation_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::DocumentLocked {
                id: quotation_id.to_string(),
                status: DocumentStatus::Converted.as_str().to_string(),
            }
            .into());
        }

        let (_, number) =
            NumberAllocator::allocate(&mut *tx, cfg, DocumentType::TaxInvoice, now.year()).await?;

        self.insert_header(&mut tx, &id, DocumentType::TaxInvoice, &number, DocumentStatus::Draft, false, &input, &totals, &words, now)
            .await?;
        let items = Self::insert_items(&mut tx, &id, &input.items).await?;

        tx.commit().await?;

        info!(
            quotation = %quotation.number,
            invoice = %number,
            "Converted quotation to invoice"
        );

        Ok(self.assemble(id, DocumentType::TaxInvoice, number, DocumentStatus::Draft, input, totals, words, items, now))
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    async fn status_of(&self, id: &str) -> DbResult<Option<DocumentStatus>> {
        let status: Option<DocumentStatus> =
            sqlx::query_scalar("SELECT status FROM documents WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(status)
    }

    async fn get_items(&self, document_id: &str) -> DbResult<Vec<LineItem>> {
        let rows: Vec<LineItemRow> = sqlx::query_as(
            r#"
            SELECT id, document_id, position, name, description,
                   quantity, unit_price_minor, tax_rate_bps, hsn_code, amount_minor
            FROM line_items
            WHERE document_id = ?1
            ORDER BY position
            "#,
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LineItem::from).collect())
    }

    #[allow(clippy::too_many_arguments)]
    async fn insert_header(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        id: &str,
        doc_type: DocumentType,
        number: &str,
        status: DocumentStatus,
        locked: bool,
        input: &DocumentInput,
        totals: &Totals,
        words: &str,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        let (pct_bps, flat_minor) = discount_columns(input.discount);

        sqlx::query(
            r#"
            INSERT INTO documents (
                id, doc_type, number, status, locked,
                client_name, client_state, client_country, place_of_supply,
                currency, tax_protocol, export_marked,
                discount_pct_bps, discount_flat_minor,
                subtotal_minor, discount_total_minor,
                cgst_minor, sgst_minor, igst_minor, tax_amount_minor, total_minor,
                amount_in_words, notes, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9,
                ?10, ?11, ?12,
                ?13, ?14,
                ?15, ?16,
                ?17, ?18, ?19, ?20, ?21,
                ?22, ?23, ?24, ?25
            )
            "#,
        )
        .bind(id)
        .bind(doc_type)
        .bind(number)
        .bind(status)
        .bind(locked)
        .bind(&input.client_name)
        .bind(&input.client_state)
        .bind(input.country())
        .bind(&input.place_of_supply)
        .bind(input.currency)
        .bind(input.tax_protocol)
        .bind(input.export_marked)
        .bind(pct_bps)
        .bind(flat_minor)
        .bind(totals.subtotal.minor())
        .bind(totals.discount_total.minor())
        .bind(totals.cgst.minor())
        .bind(totals.sgst.minor())
        .bind(totals.igst.minor())
        .bind(totals.tax_amount.minor())
        .bind(totals.total.minor())
        .bind(words)
        .bind(&input.notes)
        .bind(now)
        .bind(now)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn insert_items(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        document_id: &str,
        drafts: &[LineItemDraft],
    ) -> DbResult<Vec<LineItem>> {
        let mut items = Vec::with_capacity(drafts.len());

        for (position, draft) in drafts.iter().enumerate() {
            let item = LineItem {
                id: Uuid::new_v4().to_string(),
                document_id: document_id.to_string(),
                position: position as i64,
                name: draft.name.clone(),
                description: draft.description.clone(),
                quantity: draft.quantity,
                unit_price_minor: draft.unit_price_minor,
                tax_rate_bps: draft.rate_bps(),
                hsn_code: draft.hsn_code.clone(),
                amount_minor: draft.amount().minor(),
            };

            sqlx::query(
                r#"
                INSERT INTO line_items (
                    id, document_id, position, name, description,
                    quantity, unit_price_minor, tax_rate_bps, hsn_code, amount_minor
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(&item.id)
            .bind(&item.document_id)
            .bind(item.position)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price_minor)
            .bind(item.tax_rate_bps as i64)
            .bind(&item.hsn_code)
            .bind(item.amount_minor)
            .execute(&mut **tx)
            .await?;

            items.push(item);
        }

        Ok(items)
    }

    /// Builds the in-memory Document matching the rows just written, saving
    /// a round trip after create/update.
    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        id: String,
        doc_type: DocumentType,
        number: String,
        status: DocumentStatus,
        input: DocumentInput,
        totals: Totals,
        words: String,
        items: Vec<LineItem>,
        now: DateTime<Utc>,
    ) -> Document {
        let client_country = input.country().to_string();
        Document {
            id,
            doc_type,
            number,
            status,
            locked: status.is_locked(),
            client_name: input.client_name,
            client_state: input.client_state,
            client_country,
            currency: input.currency,
            discount: input.discount,
            subtotal_minor: totals.subtotal.minor(),
            discount_total_minor: totals.discount_total.minor(),
            tax: TaxDetails {
                protocol: input.tax_protocol,
                place_of_supply: input.place_of_supply,
                export_marked: input.export_marked,
                cgst_minor: totals.cgst.minor(),
                sgst_minor: totals.sgst.minor(),
                igst_minor: totals.igst.minor(),
            },
            tax_amount_minor: totals.tax_amount.minor(),
            total_minor: totals.total.minor(),
            amount_in_words: words,
            notes: input.notes,
            items,
            created_at: now,
            updated_at: now,
        }
    }
}

fn discount_columns(discount: Discount) -> (Option<i64>, Option<i64>) {
    match discount {
        Discount::None => (None, None),
        Discount::Percentage(bps) => (Some(bps as i64), None),
        Discount::Flat(minor) => (None, Some(minor)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn cfg() -> NumberingConfig {
        NumberingConfig::new("GROVYN")
    }

    fn intra_state_input() -> DocumentInput {
        DocumentInput {
            client_name: "Acme Traders".to_string(),
            client_state: Some("Karnataka".to_string()),
            client_country: None,
            place_of_supply: Some("Karnataka".to_string()),
            currency: Currency::Inr,
            tax_protocol: Some(TaxProtocol::Gst),
            export_marked: false,
            discount: Discount::None,
            items: vec![LineItemDraft {
                name: "Consulting".to_string(),
                description: None,
                quantity: 1,
                unit_price_minor: 100_000,
                tax_rate_bps: None,
                hsn_code: None,
            }],
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_allocates_number_and_computes_totals() {
        let db = test_db().await;
        let repo = db.documents();
        let year = Utc::now().year();

        let doc = repo
            .create(&cfg(), DocumentType::TaxInvoice, intra_state_input())
            .await
            .unwrap();

        assert_eq!(doc.number, format!("GROVYN/{year}/INV/0001"));
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert_eq!(doc.subtotal_minor, 100_000);
        assert_eq!(doc.tax.cgst_minor, 9_000);
        assert_eq!(doc.tax.sgst_minor, 9_000);
        assert_eq!(doc.tax.igst_minor, 0);
        assert_eq!(doc.total_minor, 118_000);
        assert_eq!(
            doc.amount_in_words,
            "One Thousand One Hundred Eighty Rupees Only"
        );

        // Round-trips through the database
        let fetched = repo.get_by_id(&doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.number, doc.number);
        assert_eq!(fetched.total_minor, doc.total_minor);
        assert_eq!(fetched.items.len(), 1);
        assert_eq!(fetched.items[0].amount_minor, 100_000);
    }

    #[tokio::test]
    async fn test_numbers_increment_per_series() {
        let db = test_db().await;
        let repo = db.documents();
        let year = Utc::now().year();

        let first = repo
            .create(&cfg(), DocumentType::TaxInvoice, intra_state_input())
            .await
            .unwrap();
        let second = repo
            .create(&cfg(), DocumentType::TaxInvoice, intra_state_input())
            .await
            .unwrap();
        let quotation = repo
            .create(&cfg(), DocumentType::Quotation, intra_state_input())
            .await
            .unwrap();

        assert_eq!(first.number, format!("GROVYN/{year}/INV/0001"));
        assert_eq!(second.number, format!("GROVYN/{year}/INV/0002"));
        // Quotations have their own series
        assert_eq!(quotation.number, format!("GROVYN/{year}/QTN/0001"));
    }

    #[tokio::test]
    async fn test_update_recomputes_totals() {
        let db = test_db().await;
        let repo = db.documents();

        let doc = repo
            .create(&cfg(), DocumentType::TaxInvoice, intra_state_input())
            .await
            .unwrap();

        let mut input = intra_state_input();
        input.items[0].quantity = 2;
        input.discount = Discount::Percentage(1000); // 10%

        let updated = repo.update(&doc.id, input).await.unwrap();
        assert_eq!(updated.number, doc.number); // number never changes
        assert_eq!(updated.subtotal_minor, 200_000);
        assert_eq!(updated.discount_total_minor, 20_000);
        assert_eq!(updated.tax.cgst_minor, 16_200); // 9% of 180,000
        assert_eq!(updated.total_minor, 212_400);
    }

    #[tokio::test]
    async fn test_sent_document_rejects_edits() {
        let db = test_db().await;
        let repo = db.documents();

        let doc = repo
            .create(&cfg(), DocumentType::TaxInvoice, intra_state_input())
            .await
            .unwrap();
        repo.mark_sent(&doc.id).await.unwrap();

        let result = repo.update(&doc.id, intra_state_input()).await;
        assert!(matches!(
            result,
            Err(DbError::Domain(CoreError::DocumentLocked { .. }))
        ));
    }

    #[tokio::test]
    async fn test_declined_document_is_editable_again() {
        let db = test_db().await;
        let repo = db.documents();

        let doc = repo
            .create(&cfg(), DocumentType::Quotation, intra_state_input())
            .await
            .unwrap();
        repo.mark_sent(&doc.id).await.unwrap();
        repo.mark_declined(&doc.id).await.unwrap();

        let mut input = intra_state_input();
        input.items[0].unit_price_minor = 90_000;
        let revised = repo.update(&doc.id, input).await.unwrap();
        assert_eq!(revised.subtotal_minor, 90_000);

        // And can be resent
        repo.mark_sent(&doc.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_transition_rejected() {
        let db = test_db().await;
        let repo = db.documents();

        let doc = repo
            .create(&cfg(), DocumentType::Quotation, intra_state_input())
            .await
            .unwrap();

        // Draft cannot be accepted without being sent first
        let result = repo.mark_accepted(&doc.id).await;
        assert!(matches!(
            result,
            Err(DbError::Domain(CoreError::DocumentLocked { .. }))
        ));
    }

    #[tokio::test]
    async fn test_convert_quotation_to_invoice() {
        let db = test_db().await;
        let repo = db.documents();
        let year = Utc::now().year();

        let quotation = repo
            .create(&cfg(), DocumentType::Quotation, intra_state_input())
            .await
            .unwrap();
        repo.mark_sent(&quotation.id).await.unwrap();
        repo.mark_accepted(&quotation.id).await.unwrap();

        let invoice = repo.convert_to_invoice(&cfg(), &quotation.id).await.unwrap();

        assert_eq!(invoice.doc_type, DocumentType::TaxInvoice);
        assert_eq!(invoice.number, format!("GROVYN/{year}/INV/0001"));
        assert_eq!(invoice.total_minor, quotation.total_minor);
        assert_eq!(invoice.status, DocumentStatus::Draft);

        let converted = repo.get_by_id(&quotation.id).await.unwrap().unwrap();
        assert_eq!(converted.status, DocumentStatus::Converted);
        assert!(converted.locked);

        // Converting twice fails
        let again = repo.convert_to_invoice(&cfg(), &quotation.id).await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn test_convert_rejects_non_quotations() {
        let db = test_db().await;
        let repo = db.documents();

        let invoice = repo
            .create(&cfg(), DocumentType::TaxInvoice, intra_state_input())
            .await
            .unwrap();

        let result = repo.convert_to_invoice(&cfg(), &invoice.id).await;
        assert!(matches!(
            result,
            Err(DbError::Domain(CoreError::NotAQuotation { .. }))
        ));
    }

    #[tokio::test]
    async fn test_delete_draft_only() {
        let db = test_db().await;
        let repo = db.documents();

        let doc = repo
            .create(&cfg(), DocumentType::TaxInvoice, intra_state_input())
            .await
            .unwrap();
        repo.mark_sent(&doc.id).await.unwrap();

        assert!(repo.delete_draft(&doc.id).await.is_err());

        let draft = repo
            .create(&cfg(), DocumentType::TaxInvoice, intra_state_input())
            .await
            .unwrap();
        repo.delete_draft(&draft.id).await.unwrap();
        assert!(repo.get_by_id(&draft.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = test_db().await;
        let repo = db.documents();

        repo.create(&cfg(), DocumentType::TaxInvoice, intra_state_input())
            .await
            .unwrap();
        let q = repo
            .create(&cfg(), DocumentType::Quotation, intra_state_input())
            .await
            .unwrap();
        repo.mark_sent(&q.id).await.unwrap();

        let all = repo.list(None, None, 50).await.unwrap();
        assert_eq!(all.len(), 2);

        let quotations = repo
            .list(Some(DocumentType::Quotation), None, 50)
            .await
            .unwrap();
        assert_eq!(quotations.len(), 1);

        let sent = repo.list(None, Some(DocumentStatus::Sent), 50).await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, q.id);
    }
}
