//! # docket-draft: Language-Model Draft Generation
//!
//! Generates first-draft body text for proposals and offer letters. The
//! generated text is a starting point the user edits; nothing from this
//! crate touches financial fields, which stay owned by docket-core.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Draft Generation Flow                           │
//! │                                                                         │
//! │  Caller ("draft a proposal for Acme")                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   docket-draft (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   DraftRequest ──► DraftProvider (trait)                        │   │
//! │  │                        │                                        │   │
//! │  │          ┌─────────────┴────────────┐                           │   │
//! │  │          ▼                          ▼                           │   │
//! │  │   GeminiDraftProvider        MockDraftProvider                  │   │
//! │  │   (reqwest, real API)        (tests, no network)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docket_draft::{DraftProvider, DraftRequest, DraftTone, GeminiConfig, GeminiDraftProvider};
//! use docket_core::DocumentType;
//!
//! let provider = GeminiDraftProvider::new(GeminiConfig::new(api_key, "gemini-2.0-flash"))?;
//! let response = provider.draft(&DraftRequest {
//!     doc_type: DocumentType::Proposal,
//!     client_name: "Acme Traders".into(),
//!     service_summary: "Quarterly infrastructure audit".into(),
//!     tone: DraftTone::Formal,
//! }).await?;
//! ```

pub mod gemini;
pub mod mock;
pub mod provider;

pub use gemini::{GeminiConfig, GeminiDraftProvider};
pub use mock::MockDraftProvider;
pub use provider::{DraftError, DraftProvider, DraftRequest, DraftResponse, DraftTone};
