//! Gemini provider implementation.
//!
//! Calls Google's Gemini generateContent API over HTTPS. Non-streaming only;
//! a draft is a single short body of text.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::provider::{DraftError, DraftProvider, DraftRequest, DraftResponse};

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request timeout. Drafts are short; anything slower than this is a stall.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        GeminiConfig {
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

/// Draft provider backed by the Gemini API.
pub struct GeminiDraftProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiDraftProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, DraftError> {
        if config.api_key.trim().is_empty() {
            return Err(DraftError::NotConfigured("api_key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| DraftError::NotConfigured(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            GEMINI_API_BASE, self.config.model, method, self.config.api_key
        )
    }
}

#[async_trait]
impl DraftProvider for GeminiDraftProvider {
    async fn draft(&self, request: &DraftRequest) -> Result<DraftResponse, DraftError> {
        let prompt = request.prompt();

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ContentPart {
                    text: prompt.clone(),
                }],
            }],
        };

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending draft request to Gemini"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(DraftError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DraftError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(DraftError::EmptyResponse)?;

        let usage = parsed.usage_metadata.unwrap_or_default();

        Ok(DraftResponse {
            text,
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
        })
    }

    async fn health_check(&self) -> Result<(), DraftError> {
        // Listing the model is the cheapest authenticated call
        let url = format!(
            "{}/models/{}?key={}",
            GEMINI_API_BASE, self.config.model, self.config.api_key
        );
        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DraftError::Api {
                status: response.status().as_u16(),
                message: "health check failed".to_string(),
            })
        }
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: i32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        let result = GeminiDraftProvider::new(GeminiConfig::new("", "gemini-2.0-flash"));
        assert!(matches!(result, Err(DraftError::NotConfigured(_))));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Dear Acme,"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 42, "candidatesTokenCount": 7}
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.candidates[0].content.parts[0].text, "Dear Acme,");
        assert_eq!(parsed.usage_metadata.unwrap().prompt_token_count, 42);
    }
}
