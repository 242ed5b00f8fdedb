//! Anthropic Messages API provider adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ModelDescriptor, Provider, ProviderError};
use crate::domain::enhancement::EnhancementPrompt;
use crate::domain::{ProcessingRequest, ProviderId};

use super::{classify_http_failure, MAX_OUTPUT_TOKENS, REQUEST_TIMEOUT};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Pinned API revision, sent on every call
const ANTHROPIC_VERSION: &str = "2023-06-01";

// Request types for the Messages API

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    kind: String,
    media_type: String,
    data: String,
}

// Response types

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Option<Vec<ResponseBlock>>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
    display_name: Option<String>,
    /// RFC 3339 release timestamp
    created_at: Option<String>,
}

impl ModelEntry {
    fn into_descriptor(self) -> ModelDescriptor {
        let created = self
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc));
        let display_name = self.display_name.unwrap_or_else(|| self.id.clone());

        ModelDescriptor {
            id: self.id,
            display_name,
            created,
        }
    }
}

/// Claude provider over the Anthropic Messages API
pub struct ClaudeProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl ClaudeProvider {
    /// Create a Claude provider. A None or empty key is allowed here; calls
    /// fail with a credential error before touching the network.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the adapter at a different endpoint (test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn credential(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::MissingCredential(ProviderId::Claude))
    }

    /// Build the request body. An attached screenshot becomes a leading
    /// base64 image block ahead of the text block.
    fn build_request(&self, request: &ProcessingRequest) -> MessagesRequest {
        let mut content = Vec::new();

        if let Some(screenshot) = &request.screenshot {
            content.push(ContentBlock::Image {
                source: ImageSource {
                    kind: "base64".to_string(),
                    media_type: screenshot.media_type().to_string(),
                    data: screenshot.to_base64(),
                },
            });
        }

        content.push(ContentBlock::Text {
            text: EnhancementPrompt::compose(request),
        });

        MessagesRequest {
            model: request.model.clone(),
            max_tokens: MAX_OUTPUT_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content,
            }],
        }
    }

    /// Extract the joined text blocks from a response
    fn extract_text(response: &MessagesResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .content
            .as_ref()?
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }
}

#[async_trait]
impl Provider for ClaudeProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Claude
    }

    fn is_configured(&self) -> bool {
        self.credential().is_ok()
    }

    async fn enhance(&self, request: &ProcessingRequest) -> Result<String, ProviderError> {
        let key = self.credential()?;
        let body = self.build_request(request);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_http_failure(ProviderId::Claude, status, body_text));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let text = Self::extract_text(&parsed).ok_or(ProviderError::NoContent)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ProviderError::NoContent);
        }

        Ok(trimmed.to_string())
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        let key = self.credential()?;

        let response = self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_http_failure(ProviderId::Claude, status, body_text));
        }

        let parsed: ModelsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let now = Utc::now();
        let mut models: Vec<ModelDescriptor> = parsed
            .data
            .into_iter()
            .map(ModelEntry::into_descriptor)
            .collect();
        models.retain(|model| model.is_recent(now));

        Ok(models)
    }
}
