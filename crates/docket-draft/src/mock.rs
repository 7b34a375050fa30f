//! Mock provider for tests.

use async_trait::async_trait;

use crate::provider::{DraftError, DraftProvider, DraftRequest, DraftResponse};

/// Deterministic draft provider: no network, canned text.
pub struct MockDraftProvider {
    enabled: bool,
}

impl MockDraftProvider {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl DraftProvider for MockDraftProvider {
    async fn draft(&self, request: &DraftRequest) -> Result<DraftResponse, DraftError> {
        if !self.enabled {
            return Err(DraftError::NotConfigured(
                "Mock draft provider not enabled".to_string(),
            ));
        }

        let prompt = request.prompt();
        Ok(DraftResponse {
            text: format!(
                "Dear {},\n\nThis {} covers: {}.\n\n[AMOUNT] due by [DATE].",
                request.client_name,
                request.doc_type.display_name(),
                request.service_summary
            ),
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: 24,
        })
    }

    async fn health_check(&self) -> Result<(), DraftError> {
        if self.enabled {
            Ok(())
        } else {
            Err(DraftError::NotConfigured(
                "Mock draft provider not enabled".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DraftTone;
    use docket_core::DocumentType;

    fn request() -> DraftRequest {
        DraftRequest {
            doc_type: DocumentType::Proposal,
            client_name: "Acme Traders".to_string(),
            service_summary: "Quarterly infrastructure audit".to_string(),
            tone: DraftTone::Formal,
        }
    }

    #[tokio::test]
    async fn test_mock_returns_draft() {
        let provider = MockDraftProvider::new(true);
        let response = provider.draft(&request()).await.unwrap();

        assert!(response.text.contains("Acme Traders"));
        assert!(response.text.contains("Proposal"));
        assert!(response.output_tokens > 0);
    }

    #[tokio::test]
    async fn test_disabled_mock_errors() {
        let provider = MockDraftProvider::new(false);
        assert!(matches!(
            provider.draft(&request()).await,
            Err(DraftError::NotConfigured(_))
        ));
        assert!(provider.health_check().await.is_err());
    }
}
