//! OpenAI-compatible chat-completion client (Groq by default)

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ServerConfig;
use crate::error::{Result, StudentDashboardError};

/// One prompt sent to the upstream model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

/// Anything that can answer a chat request.
///
/// `Ok(None)` means the upstream answered without any message content.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>>;
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: Option<WireChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct WireChoiceMessage {
    content: Option<String>,
}

/// Extract `choices[0].message.content` from a completion response body
fn first_content(body: &str) -> Result<Option<String>> {
    let parsed: WireResponse = serde_json::from_str(body)
        .map_err(|e| StudentDashboardError::UpstreamError(format!("Invalid response body: {}", e)))?;

    Ok(parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty()))
}

/// Chat client for an OpenAI-compatible `/chat/completions` endpoint
pub struct GroqClient {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    model: String,
}

impl fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl GroqClient {
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| StudentDashboardError::SystemError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.groq_api_key.clone(),
            api_base: config.groq_api_base.trim_end_matches('/').to_string(),
            model: config.groq_model.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ChatCompletion for GroqClient {
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(StudentDashboardError::UpstreamUnavailable)?;

        let body = WireRequest {
            model: &self.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: &request.system,
                },
                WireMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: request.max_tokens,
        };

        let url = format!("{}/chat/completions", self.api_base);
        debug!("Sending chat completion to {} (max_tokens={})", url, request.max_tokens);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| StudentDashboardError::UpstreamError(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StudentDashboardError::UpstreamError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!("Chat completion upstream returned {}", status);
            return Err(StudentDashboardError::UpstreamError(format!(
                "Upstream returned status {}",
                status
            )));
        }

        first_content(&text)
    }
}
