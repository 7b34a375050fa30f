//! # Payment Repository
//!
//! Payments recorded against issued invoices. A document can accumulate
//! multiple partial payments; once the recorded total covers the invoice
//! total, the document flips to Paid in the same transaction.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use docket_core::{validation, CoreError, DocumentStatus, Payment, PaymentMethod};

/// Repository for payment database operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: String,
    document_id: String,
    method: PaymentMethod,
    amount_minor: i64,
    reference: Option<String>,
    received_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            document_id: row.document_id,
            method: row.method,
            amount_minor: row.amount_minor,
            reference: row.reference,
            received_at: row.received_at,
            created_at: row.created_at,
        }
    }
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Records a payment against a document.
    ///
    /// Only issued documents accept payments (drafts have no commitment to
    /// settle). When recorded payments reach the invoice total the document
    /// becomes Paid, permanently locked.
    pub async fn record(
        &self,
        document_id: &str,
        method: PaymentMethod,
        amount_minor: i64,
        reference: Option<String>,
        received_at: DateTime<Utc>,
    ) -> DbResult<Payment> {
        validation::validate_payment_amount(amount_minor).map_err(CoreError::from)?;

        let mut tx = self.pool.begin().await?;

        let target: Option<(DocumentStatus, i64)> =
            sqlx::query_as("SELECT status, total_minor FROM documents WHERE id = ?1")
                .bind(document_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (status, total_minor) =
            target.ok_or_else(|| DbError::not_found("Document", document_id))?;

        // Drafts and declined documents carry no commitment to settle; a
        // converted quotation's debt lives on the invoice it became
        if matches!(
            status,
            DocumentStatus::Draft | DocumentStatus::Declined | DocumentStatus::Converted
        ) {
            return Err(CoreError::DocumentLocked {
                id: document_id.to_string(),
                status: status.as_str().to_string(),
            }
            .into());
        }

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            document_id: document_id.to_string(),
            method,
            amount_minor,
            reference,
            received_at,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO payments (id, document_id, method, amount_minor, reference, received_at, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.document_id)
        .bind(payment.method)
        .bind(payment.amount_minor)
        .bind(&payment.reference)
        .bind(payment.received_at)
        .bind(payment.created_at)
        .execute(&mut *tx)
        .await?;

        let paid: Option<i64> =
            sqlx::query_scalar("SELECT SUM(amount_minor) FROM payments WHERE document_id = ?1")
                .bind(document_id)
                .fetch_one(&mut *tx)
                .await?;
        let paid = paid.unwrap_or(0);

        if paid >= total_minor {
            sqlx::query(
                r#"
                UPDATE documents SET status = 'paid', locked = 1, updated_at = ?2
                WHERE id = ?1 AND status != 'paid'
                "#,
            )
            .bind(document_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

            info!(document_id = %document_id, paid, "Document fully settled");
        }

        tx.commit().await?;

        Ok(payment)
    }

    /// Gets all payments for a document, oldest first.
    pub async fn for_document(&self, document_id: &str) -> DbResult<Vec<Payment>> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, document_id, method, amount_minor, reference, received_at, created_at
            FROM payments
            WHERE document_id = ?1
            ORDER BY received_at ASC
            "#,
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }

    /// Total paid against a document (0 when no payments exist).
    pub async fn total_paid(&self, document_id: &str) -> DbResult<i64> {
        let paid: Option<i64> =
            sqlx::query_scalar("SELECT SUM(amount_minor) FROM payments WHERE document_id = ?1")
                .bind(document_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(paid.unwrap_or(0))
    }

    /// Outstanding balance. Negative means an overpayment.
    pub async fn balance_due(&self, document_id: &str) -> DbResult<i64> {
        let total: Option<i64> =
            sqlx::query_scalar("SELECT total_minor FROM documents WHERE id = ?1")
                .bind(document_id)
                .fetch_optional(&self.pool)
                .await?;
        let total = total.ok_or_else(|| DbError::not_found("Document", document_id))?;

        Ok(total - self.total_paid(document_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::document::DocumentInput;
    use docket_core::numbering::NumberingConfig;
    use docket_core::{Currency, Discount, DocumentType, LineItemDraft, TaxProtocol};

    async fn issued_invoice(db: &Database) -> docket_core::Document {
        let input = DocumentInput {
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
        };

        let doc = db
            .documents()
            .create(&NumberingConfig::new("GROVYN"), DocumentType::TaxInvoice, input)
            .await
            .unwrap();
        db.documents().mark_sent(&doc.id).await.unwrap();
        doc
    }

    #[tokio::test]
    async fn test_partial_payments_accumulate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let doc = issued_invoice(&db).await; // total 118,000
        let payments = db.payments();

        payments
            .record(&doc.id, PaymentMethod::Upi, 50_000, None, Utc::now())
            .await
            .unwrap();

        assert_eq!(payments.total_paid(&doc.id).await.unwrap(), 50_000);
        assert_eq!(payments.balance_due(&doc.id).await.unwrap(), 68_000);

        // Still not settled
        let fetched = db.documents().get_by_id(&doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, DocumentStatus::Sent);
    }

    #[tokio::test]
    async fn test_full_payment_settles_document() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let doc = issued_invoice(&db).await;
        let payments = db.payments();

        payments
            .record(&doc.id, PaymentMethod::BankTransfer, 100_000, Some("UTR123".to_string()), Utc::now())
            .await
            .unwrap();
        payments
            .record(&doc.id, PaymentMethod::Upi, 18_000, None, Utc::now())
            .await
            .unwrap();

        let fetched = db.documents().get_by_id(&doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, DocumentStatus::Paid);
        assert!(fetched.locked);
        assert_eq!(payments.balance_due(&doc.id).await.unwrap(), 0);

        let history = payments.for_document(&doc.id).await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_drafts_reject_payments() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let input = DocumentInput {
            client_name: "Acme Traders".to_string(),
            client_state: None,
            client_country: None,
            place_of_supply: None,
            currency: Currency::Inr,
            tax_protocol: Some(TaxProtocol::Gst),
            export_marked: false,
            discount: Discount::None,
            items: vec![],
            notes: None,
        };
        let draft = db
            .documents()
            .create(&NumberingConfig::new("GROVYN"), DocumentType::TaxInvoice, input)
            .await
            .unwrap();

        let result = db
            .payments()
            .record(&draft.id, PaymentMethod::Cash, 1_000, None, Utc::now())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_converted_quotation_rejects_payments() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let documents = db.documents();
        let cfg = NumberingConfig::new("GROVYN");

        let input = DocumentInput {
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
        };
        let quotation = documents
            .create(&cfg, DocumentType::Quotation, input)
            .await
            .unwrap();
        documents.mark_sent(&quotation.id).await.unwrap();
        documents.mark_accepted(&quotation.id).await.unwrap();
        let invoice = documents
            .convert_to_invoice(&cfg, &quotation.id)
            .await
            .unwrap();

        // The quotation's debt moved to the invoice; paying the quotation
        // would settle a document nobody owes money on
        let result = db
            .payments()
            .record(&quotation.id, PaymentMethod::Upi, 118_000, None, Utc::now())
            .await;
        assert!(result.is_err());

        // The invoice takes the payment once issued
        documents.mark_sent(&invoice.id).await.unwrap();
        db.payments()
            .record(&invoice.id, PaymentMethod::Upi, 118_000, None, Utc::now())
            .await
            .unwrap();

        let settled = documents.get_by_id(&invoice.id).await.unwrap().unwrap();
        assert_eq!(settled.status, DocumentStatus::Paid);
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let doc = issued_invoice(&db).await;

        let result = db
            .payments()
            .record(&doc.id, PaymentMethod::Cash, 0, None, Utc::now())
            .await;
        assert!(result.is_err());
    }
}
