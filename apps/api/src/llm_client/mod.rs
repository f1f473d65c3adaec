//! LLM Client: the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion endpoint directly.
//! Pipelines depend on `CompletionBackend`; `main` wires in `LlmClient`.
//!
//! Every call is one request: no retry, no backoff, no timeout override.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;

pub mod prompts;
#[cfg(test)]
pub mod stub;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed completion response (status {status}): {body}")]
    MalformedResponse { status: u16, body: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling knobs for a single completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// The slice of the completion response we actually read.
/// Every field is optional so a short or odd body decodes and is judged by `text()`.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Trimmed content of the first choice, or `None` when it is missing or blank.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Anything that can answer a system + user prompt pair with text.
///
/// Carried in `AppState` as `Arc<dyn CompletionBackend>`.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Whether a credential is available. Callers use this to fail before doing
    /// expensive local work.
    fn is_configured(&self) -> bool;

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        options: CompletionOptions,
    ) -> Result<String, LlmError>;
}

/// OpenAI-compatible chat-completion client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        options: CompletionOptions,
    ) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingCredential)?;

        let request_body = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        debug!(
            "LLM call: model={}, temperature={}, max_tokens={}, prompt_chars={}",
            self.config.model,
            options.temperature,
            options.max_tokens,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("LLM API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: upstream_error_message(body),
            });
        }

        parse_completion_body(status.as_u16(), &body)
    }
}

/// Decodes a successful completion body and pulls out the first choice's text.
pub fn parse_completion_body(status: u16, body: &str) -> Result<String, LlmError> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|_| LlmError::MalformedResponse {
            status,
            body: body.to_string(),
        })?;

    response
        .text()
        .map(str::to_string)
        .ok_or(LlmError::EmptyContent)
}

/// Prefers the provider's `{"error":{"message":..}}` text over the raw body.
fn upstream_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Strips a ```json ... ``` or ``` ... ``` wrapper from model output.
/// Text without a leading fence is returned trimmed and otherwise untouched.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Language tag on the opening fence line.
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest)
        .trim_start();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;

    use super::*;

    /// Authorization header and JSON body of the last request the local endpoint saw.
    type Seen = Arc<Mutex<Option<(Option<String>, Value)>>>;

    /// Serves `/v1/chat/completions` on an ephemeral port with a canned reply.
    /// Returns a client pointed at it.
    async fn local_endpoint(status: StatusCode, reply: &'static str) -> (LlmClient, Seen) {
        let seen: Seen = Arc::new(Mutex::new(None));
        let recorder = seen.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorder = recorder.clone();
                async move {
                    let auth = headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    *recorder.lock().unwrap() = Some((auth, body));
                    (status, reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config = LlmConfig::new(Some("sk-test".to_string()));
        config.base_url = format!("http://{addr}/v1/");
        (LlmClient::new(config).unwrap(), seen)
    }

    const OPTIONS: CompletionOptions = CompletionOptions {
        temperature: 0.5,
        max_tokens: 10,
    };

    #[test]
    fn test_strip_json_fences_uppercase_tag_around_profile() {
        let input = "\n```JSON\n{\"name\":\"Jane Doe\",\"skills\":[\"Synergy\"]}\n```\n";
        assert_eq!(
            strip_json_fences(input),
            "{\"name\":\"Jane Doe\",\"skills\":[\"Synergy\"]}"
        );
    }

    #[test]
    fn test_strip_json_fences_keeps_inline_backticks() {
        let input = "```\n{\"about\":\"I write `code`\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"about\":\"I write `code`\"}");
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        let input = "```json\n{\"key\": 1}";
        assert_eq!(strip_json_fences(input), "{\"key\": 1}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_completion_body_reads_first_choice() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"  hi there \n"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse_completion_body(200, body).unwrap(), "hi there");
    }

    #[test]
    fn test_parse_completion_body_empty_content() {
        for body in [
            r#"{"choices":[]}"#,
            r#"{}"#,
            r#"{"choices":[{"message":{"content":"   "}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{}]}"#,
        ] {
            assert!(
                matches!(parse_completion_body(200, body), Err(LlmError::EmptyContent)),
                "body {body} should be empty content"
            );
        }
    }

    #[test]
    fn test_parse_completion_body_not_json() {
        let err = parse_completion_body(200, "<html>gateway</html>").unwrap_err();
        match err {
            LlmError::MalformedResponse { status, body } => {
                assert_eq!(status, 200);
                assert!(body.contains("gateway"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_upstream_error_message_prefers_provider_message() {
        let body = r#"{"error":{"message":"Invalid API key","type":"auth"}}"#.to_string();
        assert_eq!(upstream_error_message(body), "Invalid API key");
        assert_eq!(upstream_error_message("boom".to_string()), "boom");
    }

    #[test]
    fn test_request_serializes_to_chat_completion_shape() {
        let req = ChatCompletionRequest {
            model: "m",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "usr",
                },
            ],
            temperature: 0.5,
            max_tokens: 300,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "m");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "usr");
        assert_eq!(value["max_tokens"], 300);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = LlmConfig::new(Some("k".to_string()));
        config.base_url = "https://example.test/v1/".to_string();
        let client = LlmClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "https://example.test/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        let mut config = LlmConfig::new(None);
        // Unroutable; reaching the network would surface as Http, not MissingCredential.
        config.base_url = "http://127.0.0.1:9".to_string();
        let client = LlmClient::new(config).unwrap();
        assert!(!client.is_configured());
        let err = client.complete("sys", "user", OPTIONS).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential));
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_and_reads_first_choice() {
        let (client, seen) = local_endpoint(
            StatusCode::OK,
            r#"{"choices":[{"message":{"role":"assistant","content":" Nice headline. "}}]}"#,
        )
        .await;

        let text = client.complete("roaster", "Roast Jane", OPTIONS).await.unwrap();
        assert_eq!(text, "Nice headline.");

        let (auth, body) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], client.model());
        assert_eq!(body["messages"][0]["content"], "roaster");
        assert_eq!(body["messages"][1]["content"], "Roast Jane");
        assert_eq!(body["max_tokens"], 10);
    }

    #[tokio::test]
    async fn test_complete_rate_limited_keeps_raw_body() {
        let (client, _) = local_endpoint(StatusCode::TOO_MANY_REQUESTS, "slow down").await;
        let err = client.complete("sys", "user", OPTIONS).await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "slow down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_unauthorized_reads_provider_message() {
        let (client, _) = local_endpoint(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"bad key","type":"auth"}}"#,
        )
        .await;
        let err = client.complete("sys", "user", OPTIONS).await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "bad key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_empty_content() {
        let (client, _) = local_endpoint(StatusCode::OK, r#"{"choices":[]}"#).await;
        let err = client.complete("sys", "user", OPTIONS).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
