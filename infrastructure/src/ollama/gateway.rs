//! Ollama gateway: [`LlmGateway`] adapter over the native Ollama HTTP API.
//!
//! Uses `/api/chat` (non-streaming) for conversation rounds and `/api/tags`
//! for model listing. The HTTP client is built without a request timeout:
//! local models can legitimately take minutes on the first token, and the
//! conversation loop has no bounded wait on the model by design.

use async_trait::async_trait;
use devmate_application::ports::llm_gateway::{GatewayError, LlmGateway, ModelInfo};
use devmate_domain::{Message, Model, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default base URL of a local Ollama server
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Gateway to an Ollama server
pub struct OllamaGateway {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaGateway {
    /// Create a gateway against the given base URL (e.g. `http://localhost:11434`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a gateway against the default local server
    pub fn local() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::System => "system".into(),
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                },
                content: m.content.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl LlmGateway for OllamaGateway {
    async fn chat(&self, model: &Model, messages: &[Message]) -> Result<Message, GatewayError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: model.as_str(),
            messages: Self::to_api_messages(messages),
            stream: false,
        };

        debug!(model = %model, messages = messages.len(), "Sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Chat request failed");
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        Ok(Message::assistant(parsed.message.content))
    }

    async fn available_models(&self) -> Result<Vec<ModelInfo>, GatewayError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let parsed: TagsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        Ok(parsed
            .models
            .into_iter()
            .map(|m| ModelInfo {
                name: m.name,
                size_bytes: m.size,
                modified_at: m.modified_at,
            })
            .collect())
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ApiModel>,
}

#[derive(Debug, Deserialize)]
struct ApiModel {
    name: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    modified_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = OllamaGateway::new("http://localhost:11434/");
        assert_eq!(gateway.base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_message_conversion() {
        let messages = vec![Message::system("rules"), Message::user("hello")];
        let api = OllamaGateway::to_api_messages(&messages);

        assert_eq!(api.len(), 2);
        assert_eq!(api[0].role, "system");
        assert_eq!(api[1].role, "user");
        assert_eq!(api[1].content, "hello");
    }

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatRequest {
            model: "qwen3-coder:30b",
            messages: vec![ApiMessage {
                role: "user".into(),
                content: "hi".into(),
            }],
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "qwen3-coder:30b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_chat_response_parsing() {
        let data = r#"{"model":"m","message":{"role":"assistant","content":"Hello"},"done":true}"#;
        let parsed: ChatResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.message.content, "Hello");
    }

    #[test]
    fn test_tags_response_parsing() {
        let data = r#"{"models":[{"name":"qwen3-coder:30b","size":19000000000,"modified_at":"2025-06-01T10:00:00Z"}]}"#;
        let parsed: TagsResponse = serde_json::from_str(data).unwrap();

        assert_eq!(parsed.models.len(), 1);
        assert_eq!(parsed.models[0].name, "qwen3-coder:30b");
        assert_eq!(parsed.models[0].size, 19_000_000_000);
    }

    #[test]
    fn test_tags_response_parsing_empty() {
        let parsed: TagsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.models.is_empty());
    }
}
