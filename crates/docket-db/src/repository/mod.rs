//! # Repository Module
//!
//! Database repository implementations for Docket.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Caller (service layer, jobs)                                          │
//! │       │                                                                 │
//! │       │  db.documents().create(&cfg, DocumentType::TaxInvoice, input)  │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  DocumentRepository                                                    │
//! │  ├── create(&self, cfg, doc_type, input)                               │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── update(&self, id, input)                                          │
//! │  └── mark_sent(&self, id)                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (in-memory SQLite)                                     │
//! │  • SQL is isolated in one place                                        │
//! │  • Number allocation and document insert share one transaction        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`DocumentRepository`] - Document lifecycle: create, update, status
//!   transitions, conversion
//! - [`PaymentRepository`] - Payments against invoices, auto-settle
//! - [`NumberAllocator`] - Transactional number allocation (used internally
//!   by [`DocumentRepository`])

pub mod document;
pub mod numbering;
pub mod payment;

pub use document::{DocumentInput, DocumentRepository};
pub use numbering::NumberAllocator;
pub use payment::PaymentRepository;
