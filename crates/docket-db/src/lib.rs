//! # docket-db: Database Layer for Docket
//!
//! This crate provides database access for the Docket document system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Docket Data Flow                                │
//! │                                                                         │
//! │  Caller (create_document, record_payment)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     docket-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (document.rs) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ DocumentRepo  │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ PaymentRepo   │    │ ...          │  │   │
//! │  │   │ Management    │    │ NumberAlloc   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                  ~/.local/share/docket/docket.db                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (document, payment, numbering)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docket_db::{Database, DbConfig};
//! use docket_core::numbering::NumberingConfig;
//! use docket_core::DocumentType;
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/docket.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let cfg = NumberingConfig::new("GROVYN");
//! let doc = db.documents().create(&cfg, DocumentType::TaxInvoice, input).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::document::{DocumentInput, DocumentRepository, DocumentSummary};
pub use repository::numbering::NumberAllocator;
pub use repository::payment::PaymentRepository;
