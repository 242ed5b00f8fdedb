//! OpenAI Chat Completions provider adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ModelDescriptor, Provider, ProviderError};
use crate::domain::enhancement::EnhancementPrompt;
use crate::domain::{ProcessingRequest, ProviderId};

use super::{classify_http_failure, MAX_OUTPUT_TOKENS, REQUEST_TIMEOUT};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

// Request types for the Chat Completions API

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

// Response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
    /// Unix seconds
    created: Option<i64>,
}

impl ModelEntry {
    fn into_descriptor(self) -> ModelDescriptor {
        let created = self
            .created
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

        ModelDescriptor {
            display_name: self.id.clone(),
            id: self.id,
            created,
        }
    }
}

/// OpenAI provider over the Chat Completions API
pub struct OpenAiProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create an OpenAI provider. A None or empty key is allowed here; calls
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
            .ok_or(ProviderError::MissingCredential(ProviderId::OpenAi))
    }

    /// Build the request body. An attached screenshot rides along as an
    /// `image_url` part carrying a data URL.
    fn build_request(&self, request: &ProcessingRequest) -> ChatRequest {
        let mut content = vec![ContentPart::Text {
            text: EnhancementPrompt::compose(request),
        }];

        if let Some(screenshot) = &request.screenshot {
            content.push(ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: screenshot.to_data_url(),
                },
            });
        }

        ChatRequest {
            model: request.model.clone(),
            max_tokens: MAX_OUTPUT_TOKENS,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content,
            }],
        }
    }

    fn extract_text(response: ChatResponse) -> Option<String> {
        response
            .choices?
            .into_iter()
            .next()?
            .message?
            .content
            .filter(|content| !content.is_empty())
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn is_configured(&self) -> bool {
        self.credential().is_ok()
    }

    async fn enhance(&self, request: &ProcessingRequest) -> Result<String, ProviderError> {
        let key = self.credential()?;
        let body = self.build_request(request);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(key)
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
            return Err(classify_http_failure(ProviderId::OpenAi, status, body_text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let text = Self::extract_text(parsed).ok_or(ProviderError::NoContent)?;
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
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_http_failure(ProviderId::OpenAi, status, body_text));
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
