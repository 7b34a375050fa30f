//! Provider abstraction for draft generation.
//!
//! This module provides a trait-based abstraction over language-model
//! backends, allowing easy swapping between the real Gemini provider and the
//! mock used in tests.

use async_trait::async_trait;
use thiserror::Error;

use docket_core::DocumentType;

/// Error type for provider operations.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Empty response from provider")]
    EmptyResponse,

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for DraftError {
    fn from(err: reqwest::Error) -> Self {
        DraftError::Network(err.to_string())
    }
}

/// Requested register for the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftTone {
    #[default]
    Formal,
    Friendly,
    Persuasive,
}

impl DraftTone {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DraftTone::Formal => "formal",
            DraftTone::Friendly => "friendly",
            DraftTone::Persuasive => "persuasive",
        }
    }
}

/// What the caller wants drafted.
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub doc_type: DocumentType,
    pub client_name: String,
    /// One or two sentences describing the engagement or role.
    pub service_summary: String,
    pub tone: DraftTone,
}

impl DraftRequest {
    /// Builds the prompt sent to the model.
    ///
    /// Kept as a pure function of the request so tests can assert on prompt
    /// content without a provider.
    pub fn prompt(&self) -> String {
        format!(
            "Write the body text of a {doc} addressed to {client}. \
             Engagement summary: {summary}. \
             Tone: {tone}. \
             Do not invent prices, dates, or document numbers; leave \
             placeholders like [AMOUNT] and [DATE] where specifics belong. \
             Return plain text only, no markdown.",
            doc = self.doc_type.display_name(),
            client = self.client_name,
            summary = self.service_summary,
            tone = self.tone.as_str(),
        )
    }
}

/// Generated draft plus usage accounting.
#[derive(Debug, Clone)]
pub struct DraftResponse {
    pub text: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
}

/// Trait for draft-generation providers.
#[async_trait]
pub trait DraftProvider: Send + Sync {
    /// Generates draft body text for a document.
    async fn draft(&self, request: &DraftRequest) -> Result<DraftResponse, DraftError>;

    /// Health check against the backing service.
    async fn health_check(&self) -> Result<(), DraftError>;
}
